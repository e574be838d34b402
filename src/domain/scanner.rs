//! Typosquat scanner: resolve candidates and geolocate what answers

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::join_all;
use indicatif::ProgressBar;
use tokio::sync::Semaphore;
use tokio::time::timeout;

use super::{BaseName, ResolutionRecord, Resolver};
use crate::config::ScanConfig;
use crate::error::{Result, SquatScoutError};
use crate::geo::GeoLocator;
use crate::typo::candidate_domains;
use crate::types::{
    AddressReport, DomainReport, GeoOutcome, MetricsSnapshot, ResolutionOutcome, ScanMetrics,
    ScanReport,
};

/// Scanner driving resolution and enrichment with bounded concurrency
pub struct Scanner {
    config: ScanConfig,
    resolver: Arc<dyn Resolver>,
    locator: Arc<dyn GeoLocator>,
    resolve_permits: Semaphore,
    lookup_permits: Semaphore,
    metrics: ScanMetrics,
    progress: Option<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: ScanConfig, resolver: Arc<dyn Resolver>, locator: Arc<dyn GeoLocator>) -> Self {
        let resolve_permits = Semaphore::new(config.concurrency.max(1));
        let lookup_permits = Semaphore::new(config.geo_concurrency.max(1));

        Self {
            config,
            resolver,
            locator,
            resolve_permits,
            lookup_permits,
            metrics: ScanMetrics::new(),
            progress: None,
        }
    }

    /// Tick a progress bar once per finished candidate
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Validate raw input, then scan it.
    ///
    /// Invalid input is returned as an error before any collaborator is called.
    pub async fn scan_input(&self, raw: &str) -> Result<ScanReport> {
        let base = BaseName::parse(raw)?;
        self.scan_base(&base).await
    }

    /// Scan every candidate of a validated base label
    pub async fn scan_base(&self, base: &BaseName) -> Result<ScanReport> {
        let started_at = Utc::now();
        let candidates: Vec<String> = candidate_domains(base, &self.config.suffixes)
            .into_iter()
            .collect();

        if let Some(progress) = &self.progress {
            progress.set_length(candidates.len() as u64);
        }

        tracing::info!(
            base = %base,
            candidates = candidates.len(),
            resolver = self.resolver.name(),
            locator = self.locator.name(),
            "Starting typosquat scan"
        );

        let domains = self.scan(&candidates).await?;

        Ok(ScanReport {
            base: base.to_string(),
            candidates: candidates.len(),
            domains,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Scan a list of candidate domains concurrently; output follows input order
    pub async fn scan(&self, candidates: &[String]) -> Result<Vec<DomainReport>> {
        let batch_start = Instant::now();
        let futures = candidates.iter().map(|domain| self.scan_domain(domain));
        let results = join_all(futures).await;

        let mut reports = Vec::with_capacity(results.len());
        for result in results {
            reports.push(result?);
        }

        let stats = self.metrics.get_stats();
        tracing::info!(
            candidates = candidates.len(),
            resolved = stats.domains_resolved,
            resolution_errors = stats.resolution_errors,
            lookup_errors = stats.lookup_errors,
            batch_duration_ms = %batch_start.elapsed().as_millis(),
            "Scan completed"
        );

        Ok(reports)
    }

    /// Resolve one candidate and enrich each of its addresses.
    ///
    /// Collaborator failures are folded into the report; only internal
    /// errors are returned.
    pub async fn scan_domain(&self, domain: &str) -> Result<DomainReport> {
        let start_time = Instant::now();

        let resolved = {
            let _permit = self.resolve_permits.acquire().await.map_err(|e| {
                SquatScoutError::internal(format!("Failed to acquire semaphore: {}", e))
            })?;
            self.resolve_with_timeout(domain).await
        };

        let resolution_ms = start_time.elapsed().as_millis() as u64;
        self.metrics.record_resolution(resolution_ms);

        let outcome = match resolved {
            Err(e) => {
                self.metrics.increment_resolution_errors();
                tracing::warn!(domain = %domain, error = %e, "Resolution failed");
                ResolutionOutcome::Failed { error: e.detail() }
            }
            Ok(record) if record.is_empty() => {
                tracing::debug!(domain = %domain, duration_ms = resolution_ms, "No records");
                ResolutionOutcome::NoRecords
            }
            Ok(record) => {
                self.metrics.increment_resolved();
                tracing::debug!(
                    domain = %domain,
                    records = record.records.len(),
                    duration_ms = resolution_ms,
                    "Domain resolved"
                );
                let addresses = self.enrich(&record).await?;
                ResolutionOutcome::Resolved {
                    records: record.records,
                    addresses,
                }
            }
        };

        if let Some(progress) = &self.progress {
            progress.inc(1);
        }

        Ok(DomainReport {
            domain: domain.to_string(),
            outcome,
            checked_at: Utc::now(),
            duration_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    async fn resolve_with_timeout(&self, domain: &str) -> Result<ResolutionRecord> {
        timeout(self.config.timeout, self.resolver.resolve(domain))
            .await
            .map_err(|_| {
                SquatScoutError::resolution(
                    domain,
                    format!("timed out after {}s", self.timeout_secs()),
                )
            })?
    }

    /// One lookup per address, in record order; a failed lookup never stops its siblings
    async fn enrich(&self, record: &ResolutionRecord) -> Result<Vec<AddressReport>> {
        let mut reports = Vec::new();

        for address in record.addresses() {
            let _permit = self.lookup_permits.acquire().await.map_err(|e| {
                SquatScoutError::internal(format!("Failed to acquire semaphore: {}", e))
            })?;

            self.metrics.increment_lookups();
            let geo = match timeout(self.config.timeout, self.locator.lookup(address)).await {
                Ok(Ok(record)) => GeoOutcome::Located(record),
                Ok(Err(e)) => self.lookup_failed(address, e),
                Err(_) => self.lookup_failed(
                    address,
                    SquatScoutError::lookup(
                        address,
                        format!("timed out after {}s", self.timeout_secs()),
                        None,
                    ),
                ),
            };

            reports.push(AddressReport {
                address: address.to_string(),
                geo,
            });
        }

        Ok(reports)
    }

    fn lookup_failed(&self, address: &str, error: SquatScoutError) -> GeoOutcome {
        self.metrics.increment_lookup_errors();
        tracing::warn!(address = %address, error = %error, "Geolocation lookup failed");
        GeoOutcome::Failed {
            error: error.detail(),
        }
    }

    fn timeout_secs(&self) -> u64 {
        self.config.timeout.as_secs().max(1)
    }

    /// Get current metrics snapshot
    pub fn get_metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.get_stats()
    }
}
