//! ipinfo.io provider implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::GeoLocator;
use crate::config::GeoConfig;
use crate::error::{Result, SquatScoutError};
use crate::types::GeoRecord;

/// ipinfo.io geolocation client
pub struct IpInfoLocator {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl IpInfoLocator {
    pub fn new(config: &GeoConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("squat-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SquatScoutError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    fn url_for(&self, address: &str) -> String {
        format!("{}/{}", self.base_url, address)
    }
}

#[async_trait]
impl GeoLocator for IpInfoLocator {
    async fn lookup(&self, address: &str) -> Result<GeoRecord> {
        let url = self.url_for(address);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.api_token {
            request = request.query(&[("token", token)]);
        }

        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "request timed out".to_string()
            } else {
                format!("request failed: {}", e)
            };
            SquatScoutError::lookup(address, message, None)
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = match status.as_u16() {
                401 | 403 => "Authentication failed. Please check IPINFO_TOKEN".to_string(),
                404 => "Address not found".to_string(),
                429 => "Rate limit exceeded. Lower SQUAT_SCOUT_GEO_CONCURRENCY or use a token".to_string(),
                500..=599 => "Geolocation service error".to_string(),
                _ => format!("Failed to get location for {}", address),
            };
            return Err(SquatScoutError::lookup(address, message, Some(status.as_u16())));
        }

        let body = response.text().await.map_err(|e| {
            SquatScoutError::lookup(address, format!("failed to read response: {}", e), None)
        })?;

        parse_ipinfo_response(address, &body)
    }

    fn name(&self) -> &'static str {
        "ipinfo"
    }
}

/// ipinfo.io JSON payload; every field may be missing (e.g. bogon addresses)
#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    ip: Option<String>,
    country: Option<String>,
    region: Option<String>,
    city: Option<String>,
    org: Option<String>,
}

/// Map an ipinfo.io response body to a [`GeoRecord`]
pub fn parse_ipinfo_response(address: &str, body: &str) -> Result<GeoRecord> {
    let response: IpInfoResponse = serde_json::from_str(body).map_err(|e| {
        SquatScoutError::lookup(address, format!("malformed response: {}", e), None)
    })?;

    Ok(GeoRecord {
        ip: response.ip.or_else(|| Some(address.to_string())),
        country: response.country,
        region: response.region,
        city: response.city,
        org: response.org,
    })
}
