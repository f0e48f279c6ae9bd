//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::User;

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// The data the default mock server starts with.
pub struct DefaultScenario {
    pub users: Vec<User>,
}

impl Fixtures {
    /// Create a plain, non-admin user with deterministic fields.
    pub fn user(id: u64, username: &str) -> User {
        User {
            id,
            external_id: String::new(),
            uuid: format!("00000000-0000-4000-8000-{id:012}"),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: String::new(),
            last_name: String::new(),
            language: "en".to_string(),
            root_admin: false,
            two_fa: false,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            updated_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    /// Create a panel administrator with every optional field set.
    pub fn admin(id: u64, username: &str) -> User {
        let mut user = Self::user(id, username);
        user.external_id = format!("ext-{id}");
        user.first_name = "Panel".to_string();
        user.last_name = "Admin".to_string();
        user.root_admin = true;
        user.two_fa = true;
        user
    }

    /// `count` plain users with IDs `1..=count`.
    pub fn users(count: u64) -> Vec<User> {
        (1..=count)
            .map(|id| Self::user(id, &format!("user{id}")))
            .collect()
    }

    /// The default scenario: one admin and two players.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            users: vec![
                Self::admin(1, "admin"),
                Self::user(2, "alice"),
                Self::user(3, "bob"),
            ],
        }
    }
}
