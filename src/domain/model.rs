use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Listing identifiers come back as either JSON numbers or strings depending
/// on the board; they are echoed to the apply endpoint unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingId::Number(n) => write!(f, "{}", n),
            ListingId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ListingId {
    fn from(value: i64) -> Self {
        ListingId::Number(value)
    }
}

impl From<&str> for ListingId {
    fn from(value: &str) -> Self {
        ListingId::Text(value.to_string())
    }
}

/// One job posting. Only `id` is required; the rest is kept as returned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl Listing {
    pub fn new(id: impl Into<ListingId>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApplyRequest<'a> {
    pub action: &'static str,
    pub job_id: &'a ListingId,
}

impl<'a> ApplyRequest<'a> {
    pub fn new(job_id: &'a ListingId) -> Self {
        Self {
            action: "apply",
            job_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformReport {
    pub platform: String,
    /// `None` when the fetch failed, as opposed to an empty board.
    pub listings_found: Option<usize>,
    pub applications_attempted: usize,
    pub applications_succeeded: usize,
}

impl PlatformReport {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            listings_found: None,
            applications_attempted: 0,
            applications_succeeded: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    pub platforms: Vec<PlatformReport>,
}

impl RunSummary {
    pub fn applications_attempted(&self) -> usize {
        self.platforms.iter().map(|p| p.applications_attempted).sum()
    }

    pub fn applications_succeeded(&self) -> usize {
        self.platforms.iter().map(|p| p.applications_succeeded).sum()
    }

    pub fn failed_fetches(&self) -> usize {
        self.platforms
            .iter()
            .filter(|p| p.listings_found.is_none())
            .count()
    }
}
