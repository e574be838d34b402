//! squat-scout - typosquat domain discovery
//!
//! Generates look-alike variants of a domain label, resolves them and
//! geolocates the addresses that answer.

pub mod config;
pub mod domain;
pub mod error;
pub mod geo;
pub mod output;
pub mod typo;
pub mod types;

// Re-export commonly used types
pub use config::{GeoConfig, ResolverKind, ScanConfig};
pub use error::{Result, SquatScoutError};
pub use types::{
    AddressReport, DomainReport, GeoOutcome, GeoRecord, MetricsSnapshot, ResolutionOutcome,
    ScanMetrics, ScanReport,
};

// Re-export main functionality
pub use domain::{BaseName, DigResolver, ResolutionRecord, Resolver, Scanner, SystemResolver};
pub use geo::{GeoLocator, IpInfoLocator};
pub use typo::{candidate_domains, expand, generate_variants, VariantSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
