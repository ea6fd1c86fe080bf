//! Vehicle make catalog.
//!
//! Loaded once at startup from the makes dataset and never mutated. When the
//! configured file does not exist the dataset compiled into the binary is used.

use crate::error::Result;
use crate::model::{Make, MakeDataset};
use std::path::Path;
use tracing::{debug, info};

const BUNDLED_MAKES: &str = include_str!("../data/makes.json");

#[derive(Debug, Clone, Default)]
pub struct MakeCatalog {
    makes: Vec<Make>,
}

impl MakeCatalog {
    pub fn new(makes: Vec<Make>) -> Self {
        Self { makes }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let dataset: MakeDataset = serde_json::from_str(content)?;
        Ok(Self::new(dataset.results))
    }

    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_MAKES)
    }

    /// Read `path` if it exists, otherwise fall back to the bundled dataset.
    /// A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Makes file not found, using bundled dataset");
            return Self::bundled();
        }
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        info!(path = %path.display(), count = catalog.len(), "Loaded make catalog");
        Ok(catalog)
    }

    pub fn all(&self) -> &[Make] {
        &self.makes
    }

    pub fn len(&self) -> usize {
        self.makes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.makes.is_empty()
    }

    /// Case-insensitive substring match on the make name. A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<Make> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.makes.clone();
        }
        self.makes
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }
}
