//! User model and trait implementations.
//!
//! Users are panel accounts served by `/api/application/users`.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

use crate::client::PelicanClient;
use crate::envelope::{ItemEnvelope, ListEnvelope, Resource};
use crate::error::Result;
use crate::pagination::Page;
use crate::state::{AttributeType, FieldMapping, Projection};
use crate::traits::{not_found_on_404, Get, List};

/// A Pelican panel user.
///
/// Wire field names are kept as serde renames; `2fa` becomes [`User::two_fa`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric panel ID.
    pub id: u64,

    /// External identifier; the panel sends `null` when unset.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub external_id: String,

    /// Stable UUID.
    pub uuid: String,

    /// Login name.
    pub username: String,

    /// Email address.
    pub email: String,

    /// Given name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,

    /// Family name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,

    /// Interface language code (e.g. `en`).
    pub language: String,

    /// Whether the user is a panel administrator.
    pub root_admin: bool,

    /// Whether two-factor authentication is enabled.
    #[serde(rename = "2fa")]
    pub two_fa: bool,

    /// Creation timestamp, as sent by the panel.
    pub created_at: String,

    /// Last update timestamp, as sent by the panel.
    pub updated_at: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> core::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl User {
    /// "First Last", falling back to the username when both are blank.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }

    /// Parse `created_at` as RFC 3339, if it is one.
    pub fn created_at_parsed(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created_at).ok()
    }

    /// Parse `updated_at` as RFC 3339, if it is one.
    pub fn updated_at_parsed(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.updated_at).ok()
    }
}

impl Resource for User {
    const ENTITY_TYPE: &'static str = "User";
    const OBJECT: &'static str = "user";
    const COLLECTION_PATH: &'static str = "api/application/users";
}

impl Projection for User {
    const COLLECTION: &'static str = "users";

    const FIELD_MAP: &'static [FieldMapping] = &[
        FieldMapping::new("id", "id", AttributeType::Int64),
        FieldMapping::new("external_id", "external_id", AttributeType::String),
        FieldMapping::new("uuid", "uuid", AttributeType::String),
        FieldMapping::new("username", "username", AttributeType::String),
        FieldMapping::new("email", "email", AttributeType::String),
        FieldMapping::new("first_name", "first_name", AttributeType::String),
        FieldMapping::new("last_name", "last_name", AttributeType::String),
        FieldMapping::new("language", "language", AttributeType::String),
        FieldMapping::new("root_admin", "root_admin", AttributeType::Bool),
        FieldMapping::new("2fa", "two_fa", AttributeType::Bool),
        FieldMapping::new("created_at", "created_at", AttributeType::String),
        FieldMapping::new("updated_at", "updated_at", AttributeType::String),
    ];
}

/// Query parameters for listing users.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserListQuery {
    /// Exact email filter.
    #[serde(rename = "filter[email]", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Exact UUID filter.
    #[serde(rename = "filter[uuid]", skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Exact username filter.
    #[serde(rename = "filter[username]", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Exact external ID filter.
    #[serde(rename = "filter[external_id]", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// Sort field (`id`, `uuid`, prefix `-` for descending).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

#[async_trait]
impl Get for User {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &PelicanClient, id: u64) -> Result<Self> {
        let envelope: ItemEnvelope<User> = client
            .get(&Self::item_path(id))
            .await
            .map_err(|e| not_found_on_404(e, Self::ENTITY_TYPE, id))?;
        envelope.into_record(Self::OBJECT)
    }
}

#[async_trait]
impl List for User {
    type Query = UserListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &PelicanClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        #[derive(Serialize)]
        struct RequestParams<'a> {
            #[serde(flatten)]
            query: &'a UserListQuery,
            page: u32,
            per_page: u32,
        }

        let params = RequestParams {
            query,
            page,
            per_page,
        };

        let envelope: ListEnvelope<User> =
            client.get_with_query(Self::COLLECTION_PATH, &params).await?;
        envelope.into_page(Self::OBJECT)
    }
}

/// Fetch every user, following pagination.
pub async fn get_users(client: &PelicanClient, query: UserListQuery) -> Result<Vec<User>> {
    User::list_all(client, &query).await
}

/// Fetch a single page of users.
///
/// # Arguments
///
/// * `client` - The Pelican API client
/// * `query` - Query parameters for filtering
/// * `page` - Page number (1-indexed)
/// * `per_page` - Number of items per page
pub async fn get_users_page(
    client: &PelicanClient,
    query: UserListQuery,
    page: u32,
    per_page: u32,
) -> Result<Page<User>> {
    User::list_page(client, &query, page, per_page).await
}

/// Fetch one user by numeric ID.
pub async fn get_user(client: &PelicanClient, id: u64) -> Result<User> {
    User::get(client, id).await
}
