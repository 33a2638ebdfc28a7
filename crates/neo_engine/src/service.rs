use std::time::Duration;

use chrono::NaiveDate;
use futures_util::StreamExt;
use neo_logging::{neo_debug, neo_info, neo_warn};
use reqwest::StatusCode;

use crate::feed::{decode_feed, feed_url};
use crate::{ApiError, NearEarthObject};

pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/neo/rest/v1";
/// Rate-limited public key accepted by the NASA APIs.
pub const DEMO_API_KEY: &str = "DEMO_KEY";

#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub base_url: String,
    pub api_key: String,
    pub window_days: u64,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEMO_API_KEY.to_string(),
            window_days: 7,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Source of near-Earth-object data.
#[async_trait::async_trait]
pub trait NeoService: Send + Sync {
    /// Objects approaching within the feed window starting at `start_date`.
    async fn fetch(&self, start_date: NaiveDate) -> Result<Vec<NearEarthObject>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestNeoService {
    settings: FeedSettings,
    client: reqwest::Client,
}

impl ReqwestNeoService {
    pub fn new(settings: FeedSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Unexpected(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    fn too_large(&self, actual: u64) -> ApiError {
        ApiError::Unexpected(format!(
            "feed response too large (max {}, actual {actual})",
            self.settings.max_bytes
        ))
    }
}

#[async_trait::async_trait]
impl NeoService for ReqwestNeoService {
    async fn fetch(&self, start_date: NaiveDate) -> Result<Vec<NearEarthObject>, ApiError> {
        let url = feed_url(&self.settings, start_date)?;
        neo_info!(
            "Fetching feed start_date={} window_days={}",
            start_date,
            self.settings.window_days
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            neo_warn!("Feed request unauthorized");
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ApiError::Unexpected(format!(
                "feed request returned status {status}"
            )));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let objects = decode_feed(&bytes)?;
        neo_debug!("Decoded {} objects from {} bytes", objects.len(), bytes.len());
        Ok(objects)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_connect() {
        return ApiError::Offline;
    }
    if err.is_timeout() {
        return ApiError::Unexpected(format!("feed request timed out: {err}"));
    }
    ApiError::Unexpected(err.to_string())
}
