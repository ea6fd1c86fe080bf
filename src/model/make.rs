use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Make {
    #[serde(rename = "Make_ID")]
    pub id: i32,

    #[serde(rename = "Make_Name")]
    pub name: String,
}

/// On-disk shape of the makes dataset, as published by vPIC.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MakeDataset {
    #[serde(rename = "Results", default)]
    pub results: Vec<Make>,
}
