//! Provider surface for the configuration engine.
//!
//! [`PelicanProvider::configure`] resolves the provider block into a typed
//! [`PelicanClient`], which is handed to each data source at construction.
//! Data sources are read-only: every read fetches the full collection and
//! replaces the previous state.

use std::marker::PhantomData;

use serde_json::Value;

use crate::client::PelicanClient;
use crate::config::ProviderConfig;
use crate::error::{PelicanError, Result};
use crate::models::User;
use crate::state::{AttributeType, Projection, StateSnapshot, StateStore};
use crate::traits::List;

/// A configuration value as delivered by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigValue {
    /// Not set in the configuration block.
    #[default]
    Null,
    /// Set, but to a value only known after apply.
    Unknown,
    /// Set to a concrete value.
    Known(String),
}

impl ConfigValue {
    fn explicit(&self) -> Option<&str> {
        match self {
            Self::Known(value) => Some(value.as_str()),
            Self::Null | Self::Unknown => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Known(value.to_string())
    }
}

/// The provider configuration block.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfigBlock {
    /// `server` attribute.
    pub server: ConfigValue,
    /// `token` attribute.
    pub token: ConfigValue,
}

/// Schema entry for one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    /// Attribute name.
    pub name: &'static str,
    /// Value type.
    pub kind: AttributeType,
    /// May be omitted from configuration.
    pub optional: bool,
    /// Set by the provider rather than the user.
    pub computed: bool,
    /// Hidden from plan output.
    pub sensitive: bool,
}

/// The `pelican` provider.
#[derive(Debug, Clone)]
pub struct PelicanProvider {
    version: String,
}

impl PelicanProvider {
    /// Provider type name; data sources are prefixed with it.
    pub const TYPE_NAME: &'static str = "pelican";

    /// Create the provider. `version` is `dev` for local builds.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Provider type name.
    pub fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    /// Provider version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Provider-level configuration schema.
    pub fn schema() -> Vec<AttributeSchema> {
        vec![
            AttributeSchema {
                name: "server",
                kind: AttributeType::String,
                optional: true,
                computed: false,
                sensitive: false,
            },
            AttributeSchema {
                name: "token",
                kind: AttributeType::String,
                optional: true,
                computed: false,
                sensitive: true,
            },
        ]
    }

    /// Resolve the configuration block and build the client.
    ///
    /// Explicit values win over `PELICAN_SERVER` / `PELICAN_TOKEN`. Fails
    /// before any network call if a value is unknown or missing.
    ///
    /// # Errors
    ///
    /// Returns [`PelicanError::Config`].
    #[tracing::instrument(skip_all, fields(version = %self.version))]
    pub fn configure(&self, block: &ProviderConfigBlock) -> Result<PelicanClient> {
        let unknown: Vec<&str> = [("server", &block.server), ("token", &block.token)]
            .into_iter()
            .filter(|(_, value)| **value == ConfigValue::Unknown)
            .map(|(name, _)| name)
            .collect();
        if !unknown.is_empty() {
            return Err(PelicanError::Config(format!(
                "provider configuration for {} is unknown; set a literal value",
                unknown.join(", ")
            )));
        }

        let config = ProviderConfig::resolve(block.server.explicit(), block.token.explicit())?;
        let client = PelicanClient::from_config(&config)?;
        tracing::info!(server = %client.base_url(), "configured pelican client");
        Ok(client)
    }

    /// The `<provider>_users` data source bound to `client`.
    pub fn users_data_source(&self, client: PelicanClient) -> UsersDataSource {
        CollectionDataSource::new(client)
    }
}

/// Read-only data source exposing a whole collection as state.
#[derive(Debug)]
pub struct CollectionDataSource<T> {
    client: PelicanClient,
    store: StateStore,
    _record: PhantomData<fn() -> T>,
}

/// The `pelican_users` data source.
pub type UsersDataSource = CollectionDataSource<User>;

impl<T> CollectionDataSource<T>
where
    T: List + Projection,
{
    /// Bind a data source to a configured client.
    pub fn new(client: PelicanClient) -> Self {
        Self {
            client,
            store: StateStore::new(),
            _record: PhantomData,
        }
    }

    /// Full type name, e.g. `pelican_users`.
    pub fn type_name(provider_type_name: &str) -> String {
        format!("{provider_type_name}_{}", T::COLLECTION)
    }

    /// Nested attributes of each record, all computed.
    pub fn schema() -> Vec<AttributeSchema> {
        T::FIELD_MAP
            .iter()
            .map(|mapping| AttributeSchema {
                name: mapping.state,
                kind: mapping.kind,
                optional: false,
                computed: true,
                sensitive: false,
            })
            .collect()
    }

    /// Refresh from the panel and return the state document.
    ///
    /// # Errors
    ///
    /// Returns the fetch or mapping error; the last good state is kept.
    pub async fn read(&self) -> Result<Value> {
        let snapshot = self
            .store
            .refresh_snapshot::<T>(&self.client, &Default::default())
            .await?;
        Ok(snapshot.to_document(T::COLLECTION))
    }

    /// Last committed snapshot, without contacting the panel.
    pub async fn state(&self) -> StateSnapshot {
        self.store.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_provider_schema_marks_token_sensitive() {
        let schema = PelicanProvider::schema();
        let token = schema.iter().find(|a| a.name == "token").unwrap();
        assert!(token.sensitive);
        assert!(token.optional);
        let server = schema.iter().find(|a| a.name == "server").unwrap();
        assert!(!server.sensitive);
    }

    #[test]
    fn test_configure_with_explicit_values() {
        let provider = PelicanProvider::new("test");
        let block = ProviderConfigBlock {
            server: "https://panel.example.com".into(),
            token: "papp_secret".into(),
        };

        let client = provider.configure(&block).unwrap();
        assert_eq!(client.base_url().as_str(), "https://panel.example.com/");
    }

    #[test]
    fn test_configure_rejects_unknown_values() {
        let provider = PelicanProvider::new("test");
        let block = ProviderConfigBlock {
            server: ConfigValue::Unknown,
            token: "papp_secret".into(),
        };

        let err = provider.configure(&block).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("server"));
    }

    #[test]
    fn test_configure_rejects_empty_values() {
        let provider = PelicanProvider::new("test");
        let block = ProviderConfigBlock {
            server: "".into(),
            token: "".into(),
        };

        let err = provider.configure(&block).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_users_data_source_schema() {
        let provider = PelicanProvider::new("dev");
        assert_eq!(provider.type_name(), "pelican");
        assert_eq!(provider.version(), "dev");
        assert_eq!(
            UsersDataSource::type_name(provider.type_name()),
            "pelican_users"
        );

        let schema = UsersDataSource::schema();
        assert_eq!(schema.len(), 12);
        assert!(schema.iter().all(|a| a.computed));
        let id = schema.iter().find(|a| a.name == "id").unwrap();
        assert_eq!(id.kind, AttributeType::Int64);
        let two_fa = schema.iter().find(|a| a.name == "two_fa").unwrap();
        assert_eq!(two_fa.kind, AttributeType::Bool);
    }
}
