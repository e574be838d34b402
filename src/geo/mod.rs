//! IP geolocation enrichment

pub mod ipinfo;

pub use ipinfo::IpInfoLocator;

use crate::error::Result;
use crate::types::GeoRecord;
use async_trait::async_trait;

/// Core trait for geolocation providers
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Look up location metadata for one IP address
    async fn lookup(&self, address: &str) -> Result<GeoRecord>;

    /// Provider name, for logs
    fn name(&self) -> &'static str;
}
