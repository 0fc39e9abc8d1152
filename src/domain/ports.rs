use crate::config::Platform;
use crate::domain::model::{Listing, ListingId};
use async_trait::async_trait;

/// The two calls a job board has to answer. Both absorb their own failures:
/// errors are logged and surface only as `None` / `false`.
#[async_trait]
pub trait JobBoard: Send + Sync {
    /// `None` means the listings could not be retrieved; `Some(vec![])` is a
    /// board with nothing open.
    async fn fetch_listings(&self, platform: &Platform) -> Option<Vec<Listing>>;

    async fn submit_application(&self, platform: &Platform, job_id: &ListingId) -> bool;
}
