//! Candidate resolution and scanning

pub mod resolver;
pub mod scanner;
pub mod validator;

// Re-export main functionality
pub use resolver::{DigResolver, SystemResolver};
pub use scanner::Scanner;
pub use validator::BaseName;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Trait for name resolution backends
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve a fully-qualified candidate domain.
    ///
    /// An empty record means the name did not answer.
    async fn resolve(&self, domain: &str) -> Result<ResolutionRecord>;

    /// Backend name, for logs
    fn name(&self) -> &'static str;
}

/// Answer lines for one candidate, in the order the backend returned them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRecord {
    pub records: Vec<String>,
}

impl ResolutionRecord {
    pub fn new(records: Vec<String>) -> Self {
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records that are IP addresses. Alias targets are skipped.
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .map(String::as_str)
            .filter(|record| record.parse::<IpAddr>().is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addresses_skip_aliases() {
        let record = ResolutionRecord::new(vec![
            "edge.example.net.".to_string(),
            "93.184.216.34".to_string(),
            "2606:2800:220:1:248:1893:25c8:1946".to_string(),
        ]);
        let addresses: Vec<&str> = record.addresses().collect();
        assert_eq!(
            addresses,
            vec!["93.184.216.34", "2606:2800:220:1:248:1893:25c8:1946"]
        );
        assert!(!record.is_empty());
        assert!(ResolutionRecord::default().is_empty());
    }
}
