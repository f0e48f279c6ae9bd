//! Shared wire fixtures for integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};

/// Attributes of a user as the panel sends them.
pub fn user_attributes(id: u64, username: &str) -> Value {
    json!({
        "id": id,
        "external_id": null,
        "uuid": format!("00000000-0000-4000-8000-{id:012}"),
        "username": username,
        "email": format!("{username}@example.com"),
        "first_name": "",
        "last_name": "",
        "language": "en",
        "root_admin": false,
        "2fa": false,
        "created_at": "2024-01-01T00:00:00+00:00",
        "updated_at": "2024-01-01T00:00:00+00:00"
    })
}

/// A single-user envelope.
pub fn user_envelope(id: u64, username: &str) -> Value {
    json!({
        "object": "user",
        "attributes": user_attributes(id, username)
    })
}

/// A list envelope for `users` on `current_page` of `total_pages`.
pub fn users_page(users: &[(u64, &str)], current_page: u32, total_pages: u32, total: u64) -> Value {
    let data: Vec<Value> = users
        .iter()
        .map(|(id, name)| user_envelope(*id, name))
        .collect();

    json!({
        "object": "list",
        "data": data,
        "meta": {
            "pagination": {
                "total": total,
                "count": users.len(),
                "per_page": 50,
                "current_page": current_page,
                "total_pages": total_pages,
                "links": {}
            }
        }
    })
}
