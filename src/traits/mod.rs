//! Trait definitions for Pelican operations.
//!
//! Each entity type implements the traits it supports, encapsulating
//! endpoint differences in the implementations.

mod get;
mod list;

pub use get::Get;
pub(crate) use get::not_found_on_404;
pub use list::{List, DEFAULT_PAGE_SIZE};
