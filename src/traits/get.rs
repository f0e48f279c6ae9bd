//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::PelicanClient;
use crate::error::{PelicanError, Result};

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier.
///
/// # Example
///
/// ```ignore
/// use pelicanapi::{PelicanClient, User, Get};
///
/// let client = PelicanClient::from_env()?;
/// let user = User::get(&client, 1).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Arguments
    ///
    /// * `client` - The Pelican API client
    /// * `id` - The entity identifier
    ///
    /// # Errors
    ///
    /// Returns [`PelicanError::NotFound`] when the panel answers 404, and the
    /// transport or decode error unchanged otherwise.
    async fn get(client: &PelicanClient, id: Self::Id) -> Result<Self>;
}

/// Turn a 404 status into a typed not-found error; pass everything else through.
pub(crate) fn not_found_on_404(
    err: PelicanError,
    entity_type: &'static str,
    id: impl ToString,
) -> PelicanError {
    match err {
        PelicanError::Status { status: 404, .. } => PelicanError::NotFound {
            entity_type,
            id: id.to_string(),
        },
        other => other,
    }
}
