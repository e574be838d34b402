//! Core types and structures for squat-scout

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Display marker for geolocation fields the provider did not return
pub const NOT_AVAILABLE: &str = "N/A";

/// Geolocation metadata for one address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoRecord {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
}

impl GeoRecord {
    pub fn country_or_na(&self) -> &str {
        or_na(&self.country)
    }

    pub fn region_or_na(&self) -> &str {
        or_na(&self.region)
    }

    pub fn city_or_na(&self) -> &str {
        or_na(&self.city)
    }

    pub fn org_or_na(&self) -> &str {
        or_na(&self.org)
    }
}

/// Only a missing field is `N/A`; a field sent empty is shown empty
fn or_na(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(NOT_AVAILABLE)
}

/// Enrichment result for one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GeoOutcome {
    Located(GeoRecord),
    Failed { error: String },
}

/// One resolved address and its enrichment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressReport {
    pub address: String,
    pub geo: GeoOutcome,
}

/// Resolution result for one candidate domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    NoRecords,
    Resolved {
        records: Vec<String>,
        addresses: Vec<AddressReport>,
    },
    Failed {
        error: String,
    },
}

/// Everything learned about one candidate domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainReport {
    pub domain: String,
    pub outcome: ResolutionOutcome,
    pub checked_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl DomainReport {
    pub fn is_resolved(&self) -> bool {
        matches!(self.outcome, ResolutionOutcome::Resolved { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, ResolutionOutcome::Failed { .. })
    }
}

/// Result of scanning every candidate of one base label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub base: String,
    pub candidates: usize,
    pub domains: Vec<DomainReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ScanReport {
    /// Candidates that answered with at least one record
    pub fn resolved(&self) -> impl Iterator<Item = &DomainReport> {
        self.domains.iter().filter(|d| d.is_resolved())
    }

    /// Candidates whose resolution failed
    pub fn failed(&self) -> impl Iterator<Item = &DomainReport> {
        self.domains.iter().filter(|d| d.is_failed())
    }

    pub fn elapsed_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Lock-free run counters shared between concurrent scan tasks
#[derive(Debug, Default)]
pub struct ScanMetrics {
    candidates_scanned: AtomicU64,
    domains_resolved: AtomicU64,
    resolution_errors: AtomicU64,
    lookups: AtomicU64,
    lookup_errors: AtomicU64,
    total_resolution_ms: AtomicU64,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_resolution(&self, duration_ms: u64) {
        self.candidates_scanned.fetch_add(1, Ordering::Relaxed);
        self.total_resolution_ms
            .fetch_add(duration_ms, Ordering::Relaxed);
    }

    pub fn increment_resolved(&self) {
        self.domains_resolved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_resolution_errors(&self) {
        self.resolution_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lookups(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lookup_errors(&self) {
        self.lookup_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            candidates_scanned: self.candidates_scanned.load(Ordering::Relaxed),
            domains_resolved: self.domains_resolved.load(Ordering::Relaxed),
            resolution_errors: self.resolution_errors.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            lookup_errors: self.lookup_errors.load(Ordering::Relaxed),
            total_resolution_ms: self.total_resolution_ms.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`ScanMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub candidates_scanned: u64,
    pub domains_resolved: u64,
    pub resolution_errors: u64,
    pub lookups: u64,
    pub lookup_errors: u64,
    pub total_resolution_ms: u64,
}

impl MetricsSnapshot {
    pub fn avg_resolution_ms(&self) -> f64 {
        if self.candidates_scanned == 0 {
            0.0
        } else {
            self.total_resolution_ms as f64 / self.candidates_scanned as f64
        }
    }
}
