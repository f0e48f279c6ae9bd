//! HTTP request handlers for the mock server.

pub mod users;

pub use users::*;
