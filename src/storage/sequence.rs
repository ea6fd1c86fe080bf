/// Hands out `"1"`, `"2"`, ... and never repeats, even after deletions.
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        self.last += 1;
        self.last.to_string()
    }
}
