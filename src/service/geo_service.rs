use crate::error::GeoError;
use crate::model::{GeoRecord, GeoResult};
use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for an ip-api.com compatible geolocation endpoint.
#[derive(Clone)]
pub struct GeoService {
    client: Client,
    base_url: String,
}

impl GeoService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// One GET to `<base>/json/<ip>`, no retries.
    pub async fn lookup(&self, ip: &str) -> GeoResult {
        let url = format!("{}/json/{}", self.base_url, ip);
        debug!("Looking up {}", url);

        let result = self.fetch(&url).await;
        match &result {
            Ok(record) => debug!("Lookup for {} succeeded: {:?}", ip, record.country),
            Err(GeoError::RateLimited) => warn!("Geolocation API rate limit hit for {}", ip),
            Err(e) => debug!("Lookup for {} failed: {}", ip, e),
        }
        result
    }

    async fn fetch(&self, url: &str) -> GeoResult {
        let resp = self.client.get(url).send().await?;

        match resp.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(GeoError::RateLimited),
            StatusCode::OK => {}
            other => return Err(GeoError::Http(other.as_u16())),
        }

        let body = resp.json::<Value>().await?;

        if body["status"].as_str() == Some("fail") {
            let message = body["message"]
                .as_str()
                .unwrap_or(GeoError::GENERIC_API_MESSAGE);
            return Err(GeoError::Api(message.to_string()));
        }

        Ok(GeoRecord::from_value(&body))
    }
}
