use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Person not found: {0}")]
    PersonNotFound(String),

    #[error("Car not found: {0}")]
    CarNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RegistryError {
    /// Machine-readable code attached to GraphQL error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::PersonNotFound(_) | RegistryError::CarNotFound(_) => "NOT_FOUND",
            RegistryError::Validation(_) => "BAD_USER_INPUT",
            RegistryError::Upstream(_) => "UPSTREAM",
            _ => "INTERNAL",
        }
    }
}

impl ErrorExtensions for RegistryError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
