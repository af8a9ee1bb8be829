//! # Store Configuration
//!
//! Configuration for the storage layer.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Explicit values passed by the embedding application                │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     OMTRADERS_DATA_API_URL=https://data.example.com/api/v1             │
//! │     OMTRADERS_DATA_API_KEY=...                                         │
//! │     OMTRADERS_DATA_SOURCE=Cluster0      (optional)                     │
//! │     OMTRADERS_DATABASE=om_traders       (optional)                     │
//! │                                                                         │
//! │  3. Default Values                                                     │
//! │     No remote backend → local-only operation from the start            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Missing remote credentials are not an error: the store simply runs on
//! local persistence alone, exactly as if every remote call had failed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use omtraders_core::validation::RequiredCustomerFields;

// =============================================================================
// Defaults
// =============================================================================

/// Default cluster name on the hosted document store.
pub const DEFAULT_DATA_SOURCE: &str = "Cluster0";

/// Default database name.
pub const DEFAULT_DATABASE: &str = "om_traders";

// =============================================================================
// Remote Configuration
// =============================================================================

/// Connection details for the remote document-store Data API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfig {
    /// Base URL of the Data API, e.g.
    /// `https://data.example.com/app/data-xyz/endpoint/data/v1/action`.
    /// Actions (`find`, `insertOne`, ...) are appended as path segments.
    pub endpoint: String,

    /// Credential sent as the `api-key` header on every request.
    pub api_key: String,

    /// Cluster the collections live on.
    pub data_source: String,

    /// Database holding the `products`/`invoices`/`categories` collections.
    pub database: String,
}

impl RemoteConfig {
    /// Creates a remote configuration with the default cluster and database.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        RemoteConfig {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }

    /// Overrides the cluster name.
    pub fn with_data_source(mut self, data_source: impl Into<String>) -> Self {
        self.data_source = data_source.into();
        self
    }

    /// Overrides the database name.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Reads the remote configuration from environment variables.
    ///
    /// ## Returns
    /// * `Some(RemoteConfig)` - both `OMTRADERS_DATA_API_URL` and
    ///   `OMTRADERS_DATA_API_KEY` are set
    /// * `None` - credentials are absent; the caller runs local-only
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("OMTRADERS_DATA_API_URL").ok()?;
        let api_key = std::env::var("OMTRADERS_DATA_API_KEY").ok()?;

        let mut config = RemoteConfig::new(endpoint, api_key);
        if let Ok(data_source) = std::env::var("OMTRADERS_DATA_SOURCE") {
            config.data_source = data_source;
        }
        if let Ok(database) = std::env::var("OMTRADERS_DATABASE") {
            config.database = database;
        }

        info!(endpoint = %config.endpoint, database = %config.database, "Remote backend configured from environment");
        Some(config)
    }
}

// =============================================================================
// Store Configuration
// =============================================================================

/// Configuration for the whole storage layer.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the local JSON persistence area.
    pub data_dir: PathBuf,

    /// Remote backend, when configured. `None` means local-only operation.
    pub remote: Option<RemoteConfig>,

    /// Which customer fields the billing form must collect.
    pub required_customer_fields: RequiredCustomerFields,
}

impl StoreConfig {
    /// Creates a local-only configuration.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            remote: None,
            required_customer_fields: RequiredCustomerFields::default(),
        }
    }

    /// Attaches a remote backend configuration.
    pub fn with_remote(mut self, remote: RemoteConfig) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Overrides the required customer fields for this deployment.
    pub fn with_required_customer_fields(mut self, required: RequiredCustomerFields) -> Self {
        self.required_customer_fields = required;
        self
    }

    /// Creates a configuration with the remote backend read from the
    /// environment (when present).
    pub fn from_env(data_dir: impl Into<PathBuf>) -> Self {
        let remote = RemoteConfig::from_env();
        if remote.is_none() {
            debug!("No remote credentials in environment, running local-only");
        }

        StoreConfig {
            data_dir: data_dir.into(),
            remote,
            required_customer_fields: RequiredCustomerFields::default(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_config_defaults() {
        let config = RemoteConfig::new("https://data.example.com", "secret");
        assert_eq!(config.data_source, DEFAULT_DATA_SOURCE);
        assert_eq!(config.database, DEFAULT_DATABASE);
    }

    #[test]
    fn test_remote_config_builders() {
        let config = RemoteConfig::new("https://data.example.com", "secret")
            .with_data_source("Cluster1")
            .with_database("om_traders_staging");
        assert_eq!(config.data_source, "Cluster1");
        assert_eq!(config.database, "om_traders_staging");
    }

    #[test]
    fn test_store_config_defaults_to_local_only() {
        let config = StoreConfig::new("/tmp/om-data");
        assert!(config.remote.is_none());
        assert_eq!(
            config.required_customer_fields,
            RequiredCustomerFields::all()
        );
    }
}
