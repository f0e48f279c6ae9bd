//! Mock Pelican panel server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the panel's
//! application API for integration and end-to-end testing. Unlike wiremock
//! which mocks at the HTTP level per-test, this server maintains state across
//! requests and paginates like the real panel, enabling realistic sync tests.
//!
//! # Example
//!
//! ```ignore
//! use pelicanapi::mock_server::MockServer;
//! use pelicanapi::{PelicanClient, User, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = PelicanClient::new(server.url(), "test-token").unwrap();
//!
//!     // Server comes with default fixtures
//!     let user = User::get(&client, 1).await.unwrap();
//!     assert_eq!(user.username, "admin");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
