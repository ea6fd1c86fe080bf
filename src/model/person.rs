use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    pub fn new(id: String, first_name: String, last_name: String) -> Self {
        Self {
            id,
            first_name,
            last_name,
        }
    }

    /// Apply a partial update. Empty strings count as "not provided".
    pub fn apply(&mut self, patch: PersonPatch) {
        if let Some(first_name) = patch.first_name.filter(|s| !s.is_empty()) {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name.filter(|s| !s.is_empty()) {
            self.last_name = last_name;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl PersonPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.as_deref().is_none_or(str::is_empty)
            && self.last_name.as_deref().is_none_or(str::is_empty)
    }
}
