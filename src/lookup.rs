//! Vehicle model lookup against the NHTSA vPIC API.
//!
//! A plain pass-through: no retry, no caching. Callers that want a value to
//! show use [`models_or_placeholder`], which degrades every failure to
//! [`PLACEHOLDER_MODEL`].

use crate::config::LookupSettings;
use crate::error::{RegistryError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Returned in place of a model list when the lookup fails or finds nothing.
pub const PLACEHOLDER_MODEL: &str = "Not Available";

pub type LookupFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<String>>> + Send + 'a>>;

pub trait ModelLookup: Send + Sync {
    /// Model names for `make`. Errors are upstream failures.
    fn fetch_models<'a>(&'a self, make: &'a str) -> LookupFuture<'a>;
}

/// Model names for `make`, or the placeholder on failure or an empty answer.
/// A blank make yields no models at all.
pub async fn models_or_placeholder(lookup: &dyn ModelLookup, make: &str) -> Vec<String> {
    let make = make.trim();
    if make.is_empty() {
        return Vec::new();
    }
    match lookup.fetch_models(make).await {
        Ok(models) if !models.is_empty() => models,
        Ok(_) => {
            debug!(%make, "No models found");
            vec![PLACEHOLDER_MODEL.to_string()]
        }
        Err(e) => {
            warn!(%make, error = %e, "Model lookup failed");
            vec![PLACEHOLDER_MODEL.to_string()]
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(rename = "Results", default)]
    results: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    #[serde(rename = "Model_Name")]
    model_name: String,
}

/// HTTP client for `GET {base}/vehicles/getmodelsformake/{make}?format=json`.
#[derive(Debug, Clone)]
pub struct VpicClient {
    client: reqwest::Client,
    base_url: Url,
}

impl VpicClient {
    pub fn new(settings: &LookupSettings) -> Result<Self> {
        crate::install_crypto_provider();

        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            RegistryError::Config(format!("Invalid lookup base URL '{}': {}", settings.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RegistryError::Config(format!(
                "Lookup base URL '{}' cannot have path segments",
                settings.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| RegistryError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn models_url(&self, make: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["vehicles", "getmodelsformake", make]);
        }
        url.query_pairs_mut().append_pair("format", "json");
        url
    }

    async fn request_models(&self, make: &str) -> Result<Vec<String>> {
        let url = self.models_url(make);
        debug!(%url, "Fetching models");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| RegistryError::Upstream(e.to_string()))?;
        let body: ModelsResponse = response
            .json()
            .await
            .map_err(|e| RegistryError::Upstream(e.to_string()))?;

        Ok(body.results.into_iter().map(|m| m.model_name).collect())
    }
}

impl ModelLookup for VpicClient {
    fn fetch_models<'a>(&'a self, make: &'a str) -> LookupFuture<'a> {
        Box::pin(self.request_models(make))
    }
}

/// Fixed answers keyed by lower-cased make, for offline use and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticModelLookup {
    models: HashMap<String, Vec<String>>,
}

impl StaticModelLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_models(mut self, make: &str, models: &[&str]) -> Self {
        self.models.insert(
            make.to_lowercase(),
            models.iter().map(|m| m.to_string()).collect(),
        );
        self
    }
}

impl ModelLookup for StaticModelLookup {
    fn fetch_models<'a>(&'a self, make: &'a str) -> LookupFuture<'a> {
        let result = self
            .models
            .get(&make.to_lowercase())
            .cloned()
            .ok_or_else(|| RegistryError::Upstream(format!("No data for make {}", make)));
        Box::pin(async move { result })
    }
}
