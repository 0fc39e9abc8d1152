pub mod engine;
pub mod http_board;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{Listing, ListingId, PlatformReport, RunSummary};
pub use crate::domain::ports::JobBoard;
pub use crate::utils::error::Result;
