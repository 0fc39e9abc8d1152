pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use config::{AppConfig, PacingConfig, Platform};
pub use core::{engine::ApplyEngine, http_board::HttpJobBoard};
pub use domain::model::{Listing, ListingId, RunSummary};
pub use domain::ports::JobBoard;
pub use utils::error::{ApplierError, Result};
