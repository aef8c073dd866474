//! SpaceX v4 API client.
//!
//! The launches query endpoint takes a mongoose-paginate style body; we ask for
//! everything at once with the rocket name and payload customers populated.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::{LaunchProvider, ProviderError, RawLaunch};
use crate::config::ProviderConfig;
use crate::metrics::PROVIDER_REQUEST_DURATION;

/// SpaceX API client.
pub struct SpaceXClient {
    client: Client,
    base_url: String,
}

impl SpaceXClient {
    /// Create a new SpaceX client.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The query endpoint this client posts to.
    pub fn query_url(&self) -> String {
        format!("{}/launches/query", self.base_url)
    }

    async fn query(&self) -> Result<Vec<RawLaunch>, ProviderError> {
        let url = self.query_url();
        debug!("SpaceX launches query: url='{}'", url);

        let response = self
            .client
            .post(&url)
            .json(&LaunchQueryRequest::full_catalog())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let page: LaunchQueryResponse = response.json().await.map_err(|e| {
            ProviderError::ParseError(format!("Failed to parse launches response: {}", e))
        })?;

        Ok(page.docs)
    }
}

#[async_trait]
impl LaunchProvider for SpaceXClient {
    async fn fetch_all_launches(&self) -> Result<Vec<RawLaunch>, ProviderError> {
        let start = Instant::now();
        let result = self.query().await;

        let status = if result.is_ok() { "success" } else { "error" };
        PROVIDER_REQUEST_DURATION
            .with_label_values(&[status])
            .observe(start.elapsed().as_secs_f64());

        if let Ok(ref launches) = result {
            info!("Downloaded {} launches from provider", launches.len());
        }
        result
    }
}

// ============================================================================
// SpaceX API Request/Response Types (private)
// ============================================================================

#[derive(Debug, Serialize)]
struct LaunchQueryRequest {
    query: Value,
    options: QueryOptions,
}

#[derive(Debug, Serialize)]
struct QueryOptions {
    pagination: bool,
    populate: Vec<Populate>,
}

#[derive(Debug, Serialize)]
struct Populate {
    path: &'static str,
    select: Value,
}

impl LaunchQueryRequest {
    /// Every launch, unpaginated, with rocket names and payload customers.
    fn full_catalog() -> Self {
        Self {
            query: json!({}),
            options: QueryOptions {
                pagination: false,
                populate: vec![
                    Populate {
                        path: "rocket",
                        select: json!({ "name": 1 }),
                    },
                    Populate {
                        path: "payloads",
                        select: json!({ "customers": 1 }),
                    },
                ],
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct LaunchQueryResponse {
    docs: Vec<RawLaunch>,
}
