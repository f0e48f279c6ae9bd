//! Pelican panel API client and declarative state projection.
//!
//! A Rust library that reads user records from a Pelican panel's application
//! API and exposes them as read-only declarative state. Each operation (Get,
//! List) is a trait that entity types implement, and each projectable entity
//! carries an explicit field-mapping table into state.
//!
//! # Quick Start
//!
//! ```no_run
//! use pelicanapi::{PelicanClient, User, Get, List, StateStore};
//!
//! #[tokio::main]
//! async fn main() -> pelicanapi::Result<()> {
//!     // Create client from PELICAN_SERVER / PELICAN_TOKEN
//!     let client = PelicanClient::from_env()?;
//!
//!     // Get a user by ID
//!     let user = User::get(&client, 1).await?;
//!     println!("User: {}", user.username);
//!
//!     // List all users across every page
//!     let users = User::list_all(&client, &Default::default()).await?;
//!     println!("Found {} users", users.len());
//!
//!     // Replace declarative state with the panel's view
//!     let store = StateStore::new();
//!     store.refresh::<User>(&client, &Default::default()).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Leaf first:
//!
//! - [`PelicanClient`] - authenticated transport and status classification
//! - [`ListEnvelope`] / [`ItemEnvelope`] - the panel's wire envelopes
//! - [`Get`] / [`List`] - single fetch and full pagination traversal
//! - [`Projection`] / [`StateStore`] - mapping into state and full-replace commit
//!
//! # Configuration
//!
//! - `PELICAN_TOKEN` (required) - application API key
//! - `PELICAN_SERVER` (required) - panel URL, e.g. `https://panel.example.com`
//!
//! Explicit provider configuration values take precedence over both.

pub mod cli;
mod client;
pub mod config;
mod envelope;
mod error;
mod models;
pub mod output;
mod pagination;
pub mod provider;
mod state;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{PelicanClient, DEFAULT_SERVER_URL, REQUEST_TIMEOUT};
pub use config::ProviderConfig;
pub use envelope::{ItemEnvelope, ListEnvelope, ListMeta, Resource, LIST_OBJECT};
pub use error::{ErrorKind, PelicanError, Result};
pub use pagination::{Page, PaginationMeta, PaginationParams};

// Re-export traits
pub use traits::{Get, List, DEFAULT_PAGE_SIZE};

// Re-export state projection
pub use state::{
    project, AttributeType, FieldMapping, Projection, StateRecord, StateSnapshot, StateStore,
};

// Re-export models
pub use models::{User, UserListQuery};

// Re-export convenience functions
pub use models::{get_user, get_users, get_users_page};
