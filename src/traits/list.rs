//! List trait for fetching collections of entities.

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};

use crate::client::PelicanClient;
use crate::error::{PelicanError, Result};
use crate::pagination::Page;

/// Default page size for list operations (the panel's own default).
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// List entities with pagination support.
///
/// Implement this trait for entity types that can be listed. Implementors
/// only provide [`list_page`](List::list_page); full traversal is shared.
///
/// # Example
///
/// ```ignore
/// use pelicanapi::{PelicanClient, User, List};
///
/// let client = PelicanClient::from_env()?;
///
/// // Fetch a single page
/// let page = User::list_page(&client, &Default::default(), 1, 50).await?;
///
/// // Fetch all pages
/// let all_users = User::list_all(&client, &Default::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering.
    type Query: Default + Send + Sync;

    /// List entities matching the query (single page).
    ///
    /// # Arguments
    ///
    /// * `client` - The Pelican API client
    /// * `query` - Query parameters for filtering
    /// * `page` - Page number (1-indexed)
    /// * `per_page` - Number of items per page
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope is malformed.
    async fn list_page(
        client: &PelicanClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>>;

    /// List all entities matching the query (fetches all pages in order).
    ///
    /// Follows the pagination descriptor until `current_page` reaches
    /// `total_pages` or a page comes back empty. Never issues more requests
    /// than the `total_pages` reported by the first page.
    ///
    /// # Errors
    ///
    /// Returns the first page error unchanged, or
    /// [`PelicanError::Pagination`] when the descriptor is inconsistent.
    /// No partial collection is ever returned.
    async fn list_all(client: &PelicanClient, query: &Self::Query) -> Result<Vec<Self>> {
        let first = Self::list_page(client, query, 1, DEFAULT_PAGE_SIZE).await?;
        check_page_number(&first, 1)?;

        let page_budget = first.total_pages().max(1);
        let mut has_more = first.has_more() && !first.is_empty();
        let mut all_items = first.items;
        let mut page = 1;

        tracing::debug!(page, total_pages = page_budget, items = all_items.len(), "fetched page");

        while has_more {
            page += 1;

            if page > page_budget {
                tracing::warn!(page, page_budget, "pagination exceeded reported total_pages");
                return Err(PelicanError::Pagination(format!(
                    "page {} still reports more results but first page announced {} pages",
                    page - 1,
                    page_budget
                )));
            }

            let result = Self::list_page(client, query, page, DEFAULT_PAGE_SIZE).await?;
            check_page_number(&result, page)?;

            has_more = result.has_more() && !result.is_empty();
            tracing::debug!(page, items = result.len(), "fetched page");
            all_items.extend(result.items);
        }

        Ok(all_items)
    }

    /// List all entities, fetching pages after the first concurrently.
    ///
    /// At most `max_in_flight` page requests run at once. Records come back
    /// in page order, identical to [`list_all`](List::list_all): an empty
    /// page ends the collection even if later pages were fetched.
    ///
    /// # Errors
    ///
    /// Any failing page fails the whole traversal.
    async fn list_all_concurrent(
        client: &PelicanClient,
        query: &Self::Query,
        max_in_flight: usize,
    ) -> Result<Vec<Self>> {
        let first = Self::list_page(client, query, 1, DEFAULT_PAGE_SIZE).await?;
        check_page_number(&first, 1)?;

        if !first.has_more() || first.is_empty() {
            return Ok(first.items);
        }

        let total_pages = first.total_pages();
        let rest: Vec<Page<Self>> = stream::iter(2..=total_pages)
            .map(move |page| async move {
                let result = Self::list_page(client, query, page, DEFAULT_PAGE_SIZE).await?;
                check_page_number(&result, page)?;
                tracing::debug!(page, items = result.len(), "fetched page");
                Ok::<_, PelicanError>(result)
            })
            .buffered(max_in_flight.max(1))
            .try_collect()
            .await?;

        let mut all_items = first.items;
        for result in rest {
            if result.is_empty() {
                tracing::debug!(page = result.page(), "empty page ends traversal");
                break;
            }
            if result.total_pages() != total_pages {
                tracing::warn!(
                    page = result.page(),
                    expected = total_pages,
                    found = result.total_pages(),
                    "total_pages changed during traversal"
                );
                return Err(PelicanError::Pagination(format!(
                    "page {} reports {} total pages, first page reported {}",
                    result.page(),
                    result.total_pages(),
                    total_pages
                )));
            }
            all_items.extend(result.items);
        }

        Ok(all_items)
    }
}

fn check_page_number<T>(page: &Page<T>, requested: u32) -> Result<()> {
    if page.page() == requested {
        return Ok(());
    }
    tracing::warn!(requested, returned = page.page(), "panel returned a different page");
    Err(PelicanError::Pagination(format!(
        "requested page {requested} but panel returned page {}",
        page.page()
    )))
}
