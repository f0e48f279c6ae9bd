//! Wire envelopes for the Pelican application API.
//!
//! Every response wraps its records in an object-tagged envelope:
//!
//! ```text
//! { "object": "list",
//!   "data": [ { "object": "user", "attributes": { ... } }, ... ],
//!   "meta": { "pagination": { ... } } }
//!
//! { "object": "user", "attributes": { ... } }
//! ```
//!
//! Nothing above this module sees the envelope shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{PelicanError, Result};
use crate::pagination::{Page, PaginationMeta};

/// Discriminator carried by collection envelopes.
pub const LIST_OBJECT: &str = "list";

/// A record type served by the application API.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Human-readable entity name used in errors (e.g. `User`).
    const ENTITY_TYPE: &'static str;

    /// `object` discriminator on each item envelope (e.g. `user`).
    const OBJECT: &'static str;

    /// Collection path relative to the panel base URL.
    const COLLECTION_PATH: &'static str;

    /// Path of a single record.
    fn item_path(id: impl std::fmt::Display) -> String {
        format!("{}/{id}", Self::COLLECTION_PATH)
    }
}

/// Envelope around a single record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEnvelope<T> {
    /// Object-type discriminator.
    pub object: String,
    /// The record itself.
    pub attributes: T,
}

impl<T> ItemEnvelope<T> {
    /// Unwrap the record after checking the discriminator.
    pub fn into_record(self, expected: &'static str) -> Result<T> {
        check_object(expected, &self.object)?;
        Ok(self.attributes)
    }
}

/// Metadata block of a collection envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMeta {
    /// Pagination descriptor.
    pub pagination: PaginationMeta,
}

/// Envelope around a page of records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    /// Object-type discriminator (`list`).
    pub object: String,
    /// Item envelopes in panel order.
    pub data: Vec<ItemEnvelope<T>>,
    /// Pagination metadata.
    pub meta: ListMeta,
}

impl<T> ListEnvelope<T> {
    /// Unwrap every item, preserving order.
    ///
    /// Fails as a whole if any item carries the wrong discriminator.
    pub fn into_records(self, expected: &'static str) -> Result<Vec<T>> {
        check_object(LIST_OBJECT, &self.object)?;
        self.data
            .into_iter()
            .map(|item| item.into_record(expected))
            .collect()
    }

    /// Unwrap every item into a [`Page`] carrying the pagination descriptor.
    pub fn into_page(self, expected: &'static str) -> Result<Page<T>> {
        let pagination = self.meta.pagination.clone();
        let items = self.into_records(expected)?;
        Ok(Page::new(items, pagination))
    }
}

fn check_object(expected: &'static str, found: &str) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(PelicanError::Envelope {
            expected,
            found: found.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: u32,
    }

    fn list_json(items: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "object": "list",
            "data": items,
            "meta": {"pagination": {
                "total": 3, "count": 3, "per_page": 50,
                "current_page": 1, "total_pages": 1, "links": {}
            }}
        })
    }

    #[test]
    fn test_into_records_preserves_order() {
        let envelope: ListEnvelope<Thing> = serde_json::from_value(list_json(serde_json::json!([
            {"object": "thing", "attributes": {"id": 3}},
            {"object": "thing", "attributes": {"id": 1}},
            {"object": "thing", "attributes": {"id": 2}}
        ])))
        .unwrap();

        let page = envelope.into_page("thing").unwrap();
        let ids: Vec<u32> = page.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn test_wrong_item_object_fails_whole_page() {
        let envelope: ListEnvelope<Thing> = serde_json::from_value(list_json(serde_json::json!([
            {"object": "thing", "attributes": {"id": 1}},
            {"object": "server", "attributes": {"id": 2}}
        ])))
        .unwrap();

        let err = envelope.into_records("thing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.to_string().contains("server"));
    }

    #[test]
    fn test_item_envelope() {
        let envelope: ItemEnvelope<Thing> =
            serde_json::from_str(r#"{"object":"thing","attributes":{"id":9}}"#).unwrap();
        assert_eq!(envelope.into_record("thing").unwrap(), Thing { id: 9 });
    }

    #[test]
    fn test_missing_attributes_does_not_decode() {
        let result = serde_json::from_str::<ItemEnvelope<Thing>>(r#"{"object":"thing"}"#);
        assert!(result.is_err());
    }
}
