//! Mock server state management.
//!
//! Provides the in-memory data store for the mock panel server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{PaginationMeta, User};

/// Page size the real panel uses when `per_page` is not given.
pub const PANEL_DEFAULT_PER_PAGE: u32 = 50;

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Users indexed (and listed) by ID.
    pub users: BTreeMap<u64, User>,

    /// Optional authentication token. If set, requests must carry it as a
    /// bearer token or get a 401.
    pub required_token: Option<String>,

    /// If set, every API request fails with this status.
    pub forced_status: Option<u16>,

    /// Path and query of every API request received, in order.
    pub requests: Vec<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a user to the state.
    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id, user);
        self
    }

    /// Add several users to the state.
    pub fn with_users(mut self, users: impl IntoIterator<Item = User>) -> Self {
        for user in users {
            self.users.insert(user.id, user);
        }
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Fail every API request with `status`.
    pub fn with_forced_status(mut self, status: u16) -> Self {
        self.forced_status = Some(status);
        self
    }

    /// Whether an `Authorization` header value is acceptable.
    pub fn is_authorized(&self, authorization: Option<&str>) -> bool {
        match &self.required_token {
            None => true,
            Some(token) => authorization == Some(format!("Bearer {token}").as_str()),
        }
    }

    /// Get a user by ID.
    pub fn get_user(&self, id: u64) -> Option<&User> {
        self.users.get(&id)
    }

    /// One page of users ordered by ID, with the descriptor the panel sends.
    pub fn list_users(&self, page: u32, per_page: u32) -> (Vec<User>, PaginationMeta) {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total = self.users.len() as u64;
        let total_pages = total.div_ceil(u64::from(per_page)).max(1) as u32;

        let start = (page as usize - 1) * per_page as usize;
        let users: Vec<User> = self
            .users
            .values()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect();

        let mut links = HashMap::new();
        if page < total_pages {
            links.insert(
                "next".to_string(),
                format!("/api/application/users?page={}", page + 1),
            );
        }
        if page > 1 {
            links.insert(
                "previous".to_string(),
                format!("/api/application/users?page={}", page - 1),
            );
        }

        let pagination = PaginationMeta {
            total,
            count: users.len() as u32,
            per_page,
            current_page: page,
            total_pages,
            links,
        };

        (users, pagination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    #[test]
    fn test_state_add_and_get_user() {
        let state = MockState::new().with_user(Fixtures::user(7, "seven"));

        let user = state.get_user(7);
        assert!(user.is_some());
        assert_eq!(user.unwrap().username, "seven");
        assert!(state.get_user(8).is_none());
    }

    #[test]
    fn test_state_list_users_paginates_by_id() {
        let state = MockState::new().with_users(Fixtures::users(5));

        let (page1, meta1) = state.list_users(1, 2);
        assert_eq!(page1.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(meta1.total, 5);
        assert_eq!(meta1.total_pages, 3);
        assert!(meta1.links.contains_key("next"));
        assert!(!meta1.links.contains_key("previous"));

        let (page3, meta3) = state.list_users(3, 2);
        assert_eq!(page3.iter().map(|u| u.id).collect::<Vec<_>>(), vec![5]);
        assert_eq!(meta3.count, 1);
        assert!(!meta3.links.contains_key("next"));
    }

    #[test]
    fn test_state_empty_list_has_one_page() {
        let (users, meta) = MockState::new().list_users(1, 50);
        assert!(users.is_empty());
        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.current_page, 1);
    }

    #[test]
    fn test_state_authorization() {
        let open = MockState::new();
        assert!(open.is_authorized(None));

        let locked = MockState::new().with_required_token("secret");
        assert!(locked.is_authorized(Some("Bearer secret")));
        assert!(!locked.is_authorized(Some("Bearer other")));
        assert!(!locked.is_authorized(None));
    }
}
