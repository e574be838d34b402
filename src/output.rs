//! Console rendering of scan results

use std::fmt::Write;

use crate::error::Result;
use crate::types::{DomainReport, GeoOutcome, MetricsSnapshot, ResolutionOutcome, ScanReport};

/// Render every candidate that answered or failed, in report order.
///
/// Candidates without records are left out.
pub fn render_report(report: &ScanReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nChecking base domain: {}", report.base);
    for domain in &report.domains {
        render_domain(&mut out, domain);
    }
    out
}

/// Append the lines for one candidate
pub fn render_domain(out: &mut String, report: &DomainReport) {
    match &report.outcome {
        ResolutionOutcome::NoRecords => {}
        ResolutionOutcome::Failed { error } => {
            let _ = writeln!(out, "\nError resolving {}: {}", report.domain, error);
        }
        ResolutionOutcome::Resolved { records, addresses } => {
            let _ = writeln!(out, "\nDomain: {}", report.domain);
            let _ = writeln!(out, "DNS Records:");
            for record in records {
                let _ = writeln!(out, "{}", record);
            }

            for address in addresses {
                match &address.geo {
                    GeoOutcome::Located(geo) => {
                        let _ = writeln!(out, "IP Address: {}", address.address);
                        let _ = writeln!(out, "  Country: {}", geo.country_or_na());
                        let _ = writeln!(out, "  Region: {}", geo.region_or_na());
                        let _ = writeln!(out, "  City: {}", geo.city_or_na());
                        let _ = writeln!(out, "  Organization: {}", geo.org_or_na());
                    }
                    GeoOutcome::Failed { error } => {
                        let _ = writeln!(
                            out,
                            "Error fetching geolocation for IP {}: {}",
                            address.address, error
                        );
                    }
                }
            }
        }
    }
}

/// Pretty-printed JSON report
pub fn render_json(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Summary block printed after the scan
pub fn render_summary(report: &ScanReport, metrics: &MetricsSnapshot) -> String {
    let resolved = report.resolved().count();
    let failed = report.failed().count();

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "📈 Summary:");
    let _ = writeln!(out, "   🔎 Candidates checked: {}", report.candidates);
    let _ = writeln!(out, "   🎯 Resolving domains: {}", resolved);
    if failed > 0 {
        let _ = writeln!(out, "   ⚠️  Resolution errors: {}", failed);
    }
    if metrics.lookups > 0 {
        let _ = writeln!(
            out,
            "   🌍 Geolocation lookups: {} ({} failed)",
            metrics.lookups, metrics.lookup_errors
        );
    }
    let _ = writeln!(out, "   ⏱️  Total time: {:.2}s", report.elapsed_secs());
    if metrics.candidates_scanned > 0 {
        let _ = writeln!(
            out,
            "   📊 Average resolution time: {:.1}ms",
            metrics.avg_resolution_ms()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AddressReport, GeoRecord};
    use chrono::Utc;

    fn domain(name: &str, outcome: ResolutionOutcome) -> DomainReport {
        DomainReport {
            domain: name.to_string(),
            outcome,
            checked_at: Utc::now(),
            duration_ms: 1,
        }
    }

    fn sample_report() -> ScanReport {
        let now = Utc::now();
        ScanReport {
            base: "ab".to_string(),
            candidates: 3,
            domains: vec![
                domain("a.com", ResolutionOutcome::NoRecords),
                domain(
                    "ab.com",
                    ResolutionOutcome::Resolved {
                        records: vec!["192.0.2.1".to_string(), "192.0.2.2".to_string()],
                        addresses: vec![
                            AddressReport {
                                address: "192.0.2.1".to_string(),
                                geo: GeoOutcome::Located(GeoRecord {
                                    ip: Some("192.0.2.1".to_string()),
                                    country: Some("US".to_string()),
                                    region: None,
                                    city: Some("Ashburn".to_string()),
                                    org: Some("AS64496 Example".to_string()),
                                }),
                            },
                            AddressReport {
                                address: "192.0.2.2".to_string(),
                                geo: GeoOutcome::Failed {
                                    error: "Rate limit exceeded (HTTP 429)".to_string(),
                                },
                            },
                        ],
                    },
                ),
                domain(
                    "ba.com",
                    ResolutionOutcome::Failed {
                        error: "connection timed out".to_string(),
                    },
                ),
            ],
            started_at: now,
            finished_at: now,
        }
    }

    #[test]
    fn test_render_report() {
        let text = render_report(&sample_report());
        assert!(!text.contains("a.com\n"));
        assert!(text.contains("Domain: ab.com\nDNS Records:\n192.0.2.1\n192.0.2.2\n"));
        assert!(text.contains("IP Address: 192.0.2.1\n  Country: US\n  Region: N/A\n  City: Ashburn\n  Organization: AS64496 Example\n"));
        assert!(text.contains("Error fetching geolocation for IP 192.0.2.2: Rate limit exceeded (HTTP 429)"));
        assert!(text.contains("Error resolving ba.com: connection timed out"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["base"], "ab");
        assert_eq!(value["domains"][1]["outcome"]["status"], "resolved");
        assert_eq!(value["domains"][1]["outcome"]["addresses"][1]["geo"]["status"], "failed");
    }

    #[test]
    fn test_render_summary() {
        let metrics = MetricsSnapshot {
            candidates_scanned: 3,
            domains_resolved: 1,
            resolution_errors: 1,
            lookups: 2,
            lookup_errors: 1,
            total_resolution_ms: 30,
        };
        let summary = render_summary(&sample_report(), &metrics);
        assert!(summary.contains("Candidates checked: 3"));
        assert!(summary.contains("Resolving domains: 1"));
        assert!(summary.contains("Resolution errors: 1"));
        assert!(summary.contains("Geolocation lookups: 2 (1 failed)"));
    }
}
