use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file searched for upward from the working directory.
pub const CONFIG_FILE_NAME: &str = ".carledger.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub lookup: LookupSettings,

    #[serde(default)]
    pub validation: ValidationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_graphql_path")]
    pub path: String,

    /// Allowed browser origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_graphql_path() -> String {
    "/graphql".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_graphql_path(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn endpoint_url(&self) -> String {
        format!("http://{}{}", self.socket_addr(), self.path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_makes_file")]
    pub makes_file: PathBuf,
}

fn default_makes_file() -> PathBuf {
    PathBuf::from("makes.json")
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            makes_file: default_makes_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupSettings {
    #[serde(default = "default_vpic_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_vpic_base_url() -> String {
    "https://vpic.nhtsa.dot.gov/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            base_url: default_vpic_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Reject cars whose owner does not exist and out-of-range field values.
    #[serde(default)]
    pub strict: bool,
}

impl LedgerConfig {
    /// Load the config found upward from `start_path`, or defaults when there is none.
    ///
    /// Returns the config together with the directory it was found in, which is
    /// used to resolve relative paths such as the makes dataset.
    pub fn discover(start_path: &Path) -> Result<(Self, PathBuf)> {
        match Self::find_config_file(start_path) {
            Some(config_path) => Self::load(&config_path),
            None => Ok((Self::default(), start_path.to_path_buf())),
        }
    }

    pub fn load(config_path: &Path) -> Result<(Self, PathBuf)> {
        let content = std::fs::read_to_string(config_path)?;
        let config: LedgerConfig = if content.trim().is_empty() {
            LedgerConfig::default()
        } else {
            serde_yaml::from_str(&content)?
        };
        let root = config_path
            .parent()
            .ok_or_else(|| RegistryError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, root))
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn makes_path(&self, root: &Path) -> PathBuf {
        root.join(&self.catalog.makes_file)
    }
}
