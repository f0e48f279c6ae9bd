//! Declarative state projection.
//!
//! Domain records are copied field by field into the state shape consumed by
//! the configuration engine, through an explicit mapping table per record
//! type. A field the table does not mention is an error, never a silent drop.
//! Snapshots are committed as a whole: every refresh replaces the previous
//! snapshot, nothing is merged.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::client::PelicanClient;
use crate::error::{PelicanError, Result};
use crate::traits::List;

/// One record in declarative state, keyed by state field name.
pub type StateRecord = Map<String, Value>;

/// Value type of a state attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    /// 64-bit integer.
    Int64,
    /// String.
    String,
    /// Boolean.
    Bool,
}

impl AttributeType {
    /// Whether `value` is of this type.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Int64 => value.is_i64(),
            Self::String => value.is_string(),
            Self::Bool => value.is_boolean(),
        }
    }

    /// Schema name of this type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int64 => "int64",
            Self::String => "string",
            Self::Bool => "bool",
        }
    }
}

/// Mapping of one serialized domain field to one state field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field name in the record's serialized form.
    pub domain: &'static str,
    /// Field name in declarative state.
    pub state: &'static str,
    /// Value type in declarative state.
    pub kind: AttributeType,
}

impl FieldMapping {
    /// Shorthand for a table entry.
    #[must_use]
    pub const fn new(domain: &'static str, state: &'static str, kind: AttributeType) -> Self {
        Self { domain, state, kind }
    }
}

/// A record type that can be projected into declarative state.
pub trait Projection: Serialize + DeserializeOwned {
    /// Name of the list attribute holding these records (e.g. `users`).
    const COLLECTION: &'static str;

    /// Complete mapping table; every serialized field must appear exactly once.
    const FIELD_MAP: &'static [FieldMapping];

    /// Project this record into a state record.
    ///
    /// # Errors
    ///
    /// Returns [`PelicanError::Mapping`] if a serialized field has no table
    /// entry, a table entry has no field, or a value has the wrong type.
    fn project(&self) -> Result<StateRecord> {
        let domain = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(PelicanError::Mapping(format!(
                    "record serialized to {other} instead of an object"
                )))
            }
            Err(e) => return Err(PelicanError::Mapping(e.to_string())),
        };

        if let Some(unmapped) = domain
            .keys()
            .find(|key| !Self::FIELD_MAP.iter().any(|m| m.domain == key.as_str()))
        {
            return Err(PelicanError::Mapping(format!(
                "field '{unmapped}' has no state mapping"
            )));
        }

        let mut state = StateRecord::new();
        for mapping in Self::FIELD_MAP {
            let value = domain.get(mapping.domain).ok_or_else(|| {
                PelicanError::Mapping(format!("mapped field '{}' is missing", mapping.domain))
            })?;
            if !mapping.kind.accepts(value) {
                return Err(PelicanError::Mapping(format!(
                    "field '{}' is not a {}",
                    mapping.domain,
                    mapping.kind.as_str()
                )));
            }
            state.insert(mapping.state.to_string(), value.clone());
        }
        Ok(state)
    }

    /// Rebuild a record from a state record.
    ///
    /// # Errors
    ///
    /// Returns [`PelicanError::Mapping`] if the state record has unknown or
    /// missing fields, or does not deserialize.
    fn unproject(record: &StateRecord) -> Result<Self> {
        if let Some(unknown) = record
            .keys()
            .find(|key| !Self::FIELD_MAP.iter().any(|m| m.state == key.as_str()))
        {
            return Err(PelicanError::Mapping(format!(
                "state field '{unknown}' has no domain mapping"
            )));
        }

        let mut domain = Map::new();
        for mapping in Self::FIELD_MAP {
            let value = record.get(mapping.state).ok_or_else(|| {
                PelicanError::Mapping(format!("state field '{}' is missing", mapping.state))
            })?;
            domain.insert(mapping.domain.to_string(), value.clone());
        }

        serde_json::from_value(Value::Object(domain))
            .map_err(|e| PelicanError::Mapping(e.to_string()))
    }
}

/// Ordered set of state records considered authoritative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    /// Records in panel order.
    pub records: Vec<StateRecord>,
}

impl StateSnapshot {
    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render as a state document: `{ "<collection>": [ ... ] }`.
    #[must_use]
    pub fn to_document(&self, collection: &str) -> Value {
        let records = self.records.iter().cloned().map(Value::Object).collect();
        let mut document = Map::new();
        document.insert(collection.to_string(), Value::Array(records));
        Value::Object(document)
    }
}

/// Project every record, in order. Fails as a whole on the first gap.
///
/// # Errors
///
/// Returns the first mapping error.
pub fn project<T: Projection>(records: &[T]) -> Result<StateSnapshot> {
    let records = records
        .iter()
        .map(T::project)
        .collect::<Result<Vec<_>>>()?;
    Ok(StateSnapshot { records })
}

/// Holder of the last committed snapshot.
///
/// Starts empty. Only [`commit`](StateStore::commit) changes it, and only by
/// replacing it entirely.
#[derive(Debug, Default)]
pub struct StateStore {
    snapshot: RwLock<StateSnapshot>,
}

impl StateStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current snapshot.
    pub async fn snapshot(&self) -> StateSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Replace the current snapshot.
    pub async fn commit(&self, snapshot: StateSnapshot) {
        *self.snapshot.write().await = snapshot;
    }

    /// Fetch every `T`, project, and commit.
    ///
    /// On error nothing is committed and the previous snapshot stays as it
    /// was. Dropping the returned future before it completes has the same
    /// effect. Returns the number of records committed.
    ///
    /// # Errors
    ///
    /// Returns the fetch or mapping error unchanged.
    pub async fn refresh<T>(&self, client: &PelicanClient, query: &T::Query) -> Result<usize>
    where
        T: List + Projection,
    {
        Ok(self.refresh_snapshot::<T>(client, query).await?.len())
    }

    /// Like [`refresh`](StateStore::refresh), but returns the snapshot this
    /// call committed rather than whatever the store holds afterwards.
    ///
    /// # Errors
    ///
    /// Returns the fetch or mapping error unchanged.
    #[tracing::instrument(skip_all, fields(collection = T::COLLECTION))]
    pub async fn refresh_snapshot<T>(
        &self,
        client: &PelicanClient,
        query: &T::Query,
    ) -> Result<StateSnapshot>
    where
        T: List + Projection,
    {
        let records = T::list_all(client, query).await?;
        let snapshot = project(&records)?;
        self.commit(snapshot.clone()).await;
        tracing::info!(records = snapshot.len(), "committed state snapshot");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Widget {
        id: u64,
        #[serde(rename = "is-on")]
        on: bool,
    }

    impl Projection for Widget {
        const COLLECTION: &'static str = "widgets";
        const FIELD_MAP: &'static [FieldMapping] = &[
            FieldMapping::new("id", "id", AttributeType::Int64),
            FieldMapping::new("is-on", "on", AttributeType::Bool),
        ];
    }

    /// Same shape as `Widget` plus a field the table forgot.
    #[derive(Debug, Serialize, Deserialize)]
    struct LeakyWidget {
        id: u64,
        #[serde(rename = "is-on")]
        on: bool,
        colour: String,
    }

    impl Projection for LeakyWidget {
        const COLLECTION: &'static str = "widgets";
        const FIELD_MAP: &'static [FieldMapping] = Widget::FIELD_MAP;
    }

    fn record(pairs: serde_json::Value) -> StateRecord {
        match pairs {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_project_renames_fields() {
        let state = Widget { id: 4, on: true }.project().unwrap();
        assert_eq!(state, record(serde_json::json!({"id": 4, "on": true})));
        assert_eq!(Widget::unproject(&state).unwrap(), Widget { id: 4, on: true });
    }

    #[test]
    fn test_unmapped_field_is_an_error() {
        let leaky = LeakyWidget {
            id: 1,
            on: false,
            colour: "red".to_string(),
        };
        let err = leaky.project().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_int64_rejects_values_above_i64_max() {
        assert!(AttributeType::Int64.accepts(&serde_json::json!(i64::MAX)));
        assert!(AttributeType::Int64.accepts(&serde_json::json!(-1)));
        assert!(!AttributeType::Int64.accepts(&serde_json::json!(u64::MAX)));
        assert!(!AttributeType::Int64.accepts(&serde_json::json!(1.5)));

        let err = Widget {
            id: u64::MAX,
            on: true,
        }
        .project()
        .unwrap_err();
        assert!(matches!(err, PelicanError::Mapping(_)));
        assert!(err.to_string().contains("int64"));
    }

    #[test]
    fn test_unproject_rejects_unknown_and_missing_fields() {
        let unknown = record(serde_json::json!({"id": 1, "on": true, "extra": 1}));
        assert!(Widget::unproject(&unknown).is_err());

        let missing = record(serde_json::json!({"id": 1}));
        assert!(Widget::unproject(&missing).is_err());
    }

    #[test]
    fn test_project_is_all_or_nothing() {
        let widgets = [Widget { id: 1, on: true }, Widget { id: 2, on: false }];
        let snapshot = project(&widgets).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.records[1]["id"], serde_json::json!(2));

        let leaky = [LeakyWidget {
            id: 1,
            on: true,
            colour: String::new(),
        }];
        assert!(project(&leaky).is_err());
    }

    #[test]
    fn test_to_document() {
        let snapshot = project(&[Widget { id: 7, on: true }]).unwrap();
        assert_eq!(
            snapshot.to_document(Widget::COLLECTION),
            serde_json::json!({"widgets": [{"id": 7, "on": true}]})
        );
    }

    #[test]
    fn test_commit_replaces_whole_snapshot() {
        tokio_test::block_on(async {
            let store = StateStore::new();
            assert!(store.snapshot().await.is_empty());

            let widgets = [Widget { id: 1, on: true }, Widget { id: 2, on: true }];
            store.commit(project(&widgets).unwrap()).await;
            assert_eq!(store.snapshot().await.len(), 2);

            store
                .commit(project(&[Widget { id: 3, on: false }]).unwrap())
                .await;
            let snapshot = store.snapshot().await;
            assert_eq!(snapshot.len(), 1);
            assert_eq!(snapshot.records[0]["id"], serde_json::json!(3));
        });
    }
}
