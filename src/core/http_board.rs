use crate::config::{HttpConfig, Platform};
use crate::core::{JobBoard, Listing, ListingId};
use crate::domain::model::ApplyRequest;
use crate::utils::error::{ApplierError, Result};
use reqwest::Client;
use std::time::Duration;

/// Job board client speaking the bearer-token JSON API.
pub struct HttpJobBoard {
    client: Client,
    timeout: Duration,
}

impl HttpJobBoard {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    pub fn from_config(config: &HttpConfig) -> Self {
        Self::new(config.timeout())
    }

    /// GET the listing endpoint and parse it as an array of listings.
    pub async fn try_fetch_listings(&self, platform: &Platform) -> Result<Vec<Listing>> {
        tracing::debug!("Making API request to: {}", platform.endpoint);

        let response = self
            .client
            .get(&platform.endpoint)
            .bearer_auth(&platform.token)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(ApplierError::StatusError {
                status,
                url: platform.endpoint.clone(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApplierError::MalformedResponse {
            message: format!("expected an array of listings with an `id`: {}", e),
        })
    }

    /// POST `{"action": "apply", "job_id": ...}` to the platform's apply URL.
    pub async fn try_submit_application(
        &self,
        platform: &Platform,
        job_id: &ListingId,
    ) -> Result<()> {
        let url = platform.apply_url();
        tracing::debug!("Submitting application for job {} to: {}", job_id, url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&platform.token)
            .json(&ApplyRequest::new(job_id))
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Apply response status: {}", status);
        if !status.is_success() {
            return Err(ApplierError::StatusError { status, url });
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl JobBoard for HttpJobBoard {
    async fn fetch_listings(&self, platform: &Platform) -> Option<Vec<Listing>> {
        match self.try_fetch_listings(platform).await {
            Ok(listings) => {
                tracing::info!(
                    "Checked {} job postings. Found {} opportunities.",
                    platform.name,
                    listings.len()
                );
                Some(listings)
            }
            Err(e) => {
                tracing::error!("Error checking {} job postings: {}", platform.name, e);
                None
            }
        }
    }

    async fn submit_application(&self, platform: &Platform, job_id: &ListingId) -> bool {
        match self.try_submit_application(platform, job_id).await {
            Ok(()) => {
                tracing::info!("Successfully applied for job {} on {}.", job_id, platform.name);
                true
            }
            Err(e) => {
                tracing::error!("Error applying for job on {}: {}", platform.name, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::capture_logs;
    use httpmock::prelude::*;
    use serde_json::json;

    fn platform_for(server: &MockServer) -> Platform {
        Platform::new("Upwork", server.url("/v2/jobs"), "upwork-token")
            .with_apply_url(server.url("/api/apply"))
    }

    #[tokio::test]
    async fn test_fetch_returns_listings_and_logs_count() {
        let (logs, _guard) = capture_logs();
        let server = MockServer::start_async().await;
        let listings_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v2/jobs")
                    .header("Authorization", "Bearer upwork-token");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!([
                        {"id": 1, "title": "Rust CLI"},
                        {"id": 2, "title": "Tokio service"},
                        {"id": "c-3", "title": "Parser"}
                    ]));
            })
            .await;

        let board = HttpJobBoard::new(Duration::from_secs(5));
        let listings = board.fetch_listings(&platform_for(&server)).await.unwrap();

        listings_mock.assert_async().await;
        let ids: Vec<_> = listings.iter().map(|l| l.id.clone()).collect();
        assert_eq!(
            ids,
            vec![ListingId::from(1), ListingId::from(2), ListingId::from("c-3")]
        );
        assert_eq!(listings[0].fields.get("title"), Some(&json!("Rust CLI")));
        assert!(logs.contents().contains("Checked Upwork job postings. Found 3 opportunities."));
    }

    #[tokio::test]
    async fn test_fetch_empty_array_is_not_a_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/jobs");
                then.status(200).json_body(json!([]));
            })
            .await;

        let board = HttpJobBoard::new(Duration::from_secs(5));
        let listings = board.fetch_listings(&platform_for(&server)).await;

        assert_eq!(listings, Some(vec![]));
    }

    #[tokio::test]
    async fn test_fetch_server_error_returns_no_data() {
        let (logs, _guard) = capture_logs();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/jobs");
                then.status(500);
            })
            .await;

        let board = HttpJobBoard::new(Duration::from_secs(5));
        let platform = platform_for(&server);

        let err = board.try_fetch_listings(&platform).await.unwrap_err();
        assert!(matches!(err, ApplierError::StatusError { status, .. } if status.as_u16() == 500));

        assert_eq!(board.fetch_listings(&platform).await, None);
        let output = logs.contents();
        assert!(output.contains("ERROR"));
        assert!(output.contains("Error checking Upwork job postings"));
    }

    #[tokio::test]
    async fn test_fetch_listing_without_id_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/jobs");
                then.status(200).json_body(json!([{"id": 1}, {"title": "missing id"}]));
            })
            .await;

        let board = HttpJobBoard::new(Duration::from_secs(5));
        let platform = platform_for(&server);

        let err = board.try_fetch_listings(&platform).await.unwrap_err();
        assert!(matches!(err, ApplierError::MalformedResponse { .. }));
        assert_eq!(board.fetch_listings(&platform).await, None);
    }

    #[tokio::test]
    async fn test_fetch_non_json_body_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/jobs");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let board = HttpJobBoard::new(Duration::from_secs(5));
        let err = board
            .try_fetch_listings(&platform_for(&server))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplierError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_returns_no_data() {
        // Nothing listens on port 9 locally.
        let platform = Platform::new("Fiverr", "http://127.0.0.1:9/v2/projects", "t");
        let board = HttpJobBoard::new(Duration::from_secs(2));

        let err = board.try_fetch_listings(&platform).await.unwrap_err();
        assert!(matches!(err, ApplierError::HttpError(_)));
        assert_eq!(board.fetch_listings(&platform).await, None);
    }

    #[tokio::test]
    async fn test_apply_created_is_success() {
        let (logs, _guard) = capture_logs();
        let server = MockServer::start_async().await;
        let apply_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/apply")
                    .header("Authorization", "Bearer upwork-token")
                    .json_body(json!({"action": "apply", "job_id": 42}));
                then.status(201);
            })
            .await;

        let board = HttpJobBoard::new(Duration::from_secs(5));
        let applied = board
            .submit_application(&platform_for(&server), &ListingId::from(42))
            .await;

        assert!(applied);
        apply_mock.assert_async().await;
        assert!(logs.contents().contains("Successfully applied for job 42 on Upwork."));
    }

    #[tokio::test]
    async fn test_apply_forbidden_is_failure() {
        let (logs, _guard) = capture_logs();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/apply");
                then.status(403);
            })
            .await;

        let board = HttpJobBoard::new(Duration::from_secs(5));
        let applied = board
            .submit_application(&platform_for(&server), &ListingId::from("abc"))
            .await;

        assert!(!applied);
        assert!(logs.contents().contains("Error applying for job on Upwork"));
    }

    #[tokio::test]
    async fn test_apply_timeout_is_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/apply");
                then.status(201).delay(Duration::from_millis(800));
            })
            .await;

        let board = HttpJobBoard::new(Duration::from_millis(100));
        let platform = platform_for(&server);

        let err = board
            .try_submit_application(&platform, &ListingId::from(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplierError::HttpError(ref e) if e.is_timeout()));

        assert!(!board.submit_application(&platform, &ListingId::from(1)).await);
    }
}
