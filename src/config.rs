//! Provider configuration resolution.
//!
//! Each setting may come from an explicit configuration value or from an
//! environment variable; explicit values win. Resolution happens once, when a
//! [`ProviderConfig`] is built. The client never reads the environment itself.

use std::env;

use crate::error::{PelicanError, Result};

/// Environment variable holding the panel URL.
pub const SERVER_ENV: &str = "PELICAN_SERVER";

/// Environment variable holding the application API token.
pub const TOKEN_ENV: &str = "PELICAN_TOKEN";

/// Resolve a setting from an explicit value or the environment.
///
/// An explicit value (even an empty one) takes precedence. Returns `None`
/// when neither source yields a non-empty value.
pub fn resolve(explicit: Option<&str>, env_var: &str) -> Option<String> {
    let value = match explicit {
        Some(value) => value.to_string(),
        None => env::var(env_var).ok()?,
    };
    (!value.is_empty()).then_some(value)
}

/// Fully resolved provider settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Panel base URL.
    pub server: String,
    /// Application API bearer token.
    pub token: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("server", &self.server)
            .finish_non_exhaustive()
    }
}

impl ProviderConfig {
    /// Resolve `server` and `token` against `PELICAN_SERVER` and
    /// `PELICAN_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming every missing attribute.
    pub fn resolve(server: Option<&str>, token: Option<&str>) -> Result<Self> {
        let server = resolve(server, SERVER_ENV);
        let token = resolve(token, TOKEN_ENV);

        let mut missing = Vec::new();
        if server.is_none() {
            missing.push(format!(
                "`server` is missing; set it in the provider block or via {SERVER_ENV}"
            ));
        }
        if token.is_none() {
            missing.push(format!(
                "`token` is missing; set it in the provider block or via {TOKEN_ENV}"
            ));
        }

        match (server, token) {
            (Some(server), Some(token)) => Ok(Self { server, token }),
            _ => Err(PelicanError::Config(missing.join("; "))),
        }
    }
}
