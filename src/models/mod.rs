//! Pelican API model types.

mod user;

pub use user::*;
