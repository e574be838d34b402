//! Resolution backends

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::TokioAsyncResolver;

use super::{ResolutionRecord, Resolver};
use crate::error::{Result, SquatScoutError};

/// Resolver that shells out to `dig +short`
#[derive(Debug, Clone)]
pub struct DigResolver {
    program: String,
}

impl DigResolver {
    /// Create a resolver running the given dig executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Fail early when the dig executable cannot be run at all
    pub async fn ensure_available(&self) -> Result<()> {
        let output = timeout(
            Duration::from_secs(5),
            Command::new(&self.program)
                .arg("-v")
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| SquatScoutError::timeout("dig version check", 5))?
        .map_err(|e| {
            SquatScoutError::config(format!(
                "Cannot run '{}': {}. Install dig (dnsutils / bind-utils) or set SQUAT_SCOUT_RESOLVER=system",
                self.program, e
            ))
        })?;

        if !output.status.success() {
            return Err(SquatScoutError::config(format!(
                "'{} -v' exited with {}",
                self.program, output.status
            )));
        }

        tracing::debug!(
            program = %self.program,
            version = %String::from_utf8_lossy(&output.stderr).trim(),
            "dig is available"
        );
        Ok(())
    }
}

impl Default for DigResolver {
    fn default() -> Self {
        Self::new("dig")
    }
}

#[async_trait]
impl Resolver for DigResolver {
    async fn resolve(&self, domain: &str) -> Result<ResolutionRecord> {
        let output = Command::new(&self.program)
            .arg("+short")
            .arg(domain)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                SquatScoutError::resolution(domain, format!("failed to run {}: {}", self.program, e))
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SquatScoutError::resolution(
                domain,
                failure_message(&output.status, &stdout, &stderr),
            ));
        }

        Ok(ResolutionRecord::new(parse_dig_output(&stdout)))
    }

    fn name(&self) -> &'static str {
        "dig"
    }
}

/// Answer lines from `dig +short` output; blank and `;;` comment lines are dropped
pub fn parse_dig_output(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(';'))
        .map(str::to_string)
        .collect()
}

fn failure_message(status: &std::process::ExitStatus, stdout: &str, stderr: &str) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.lines().next().unwrap_or(stderr).to_string();
    }

    // dig reports network trouble as ";;" comments on stdout
    stdout
        .lines()
        .map(|line| line.trim().trim_start_matches(';').trim())
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("dig exited with {}", status))
}

/// In-process resolver using the system DNS configuration
pub struct SystemResolver {
    resolver: TokioAsyncResolver,
}

impl SystemResolver {
    /// Create a resolver from /etc/resolv.conf, falling back to public defaults
    pub fn new() -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
            tracing::warn!("Failed to read system resolver configuration: {}. Using defaults.", e);
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });
        Self { resolver }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve(&self, domain: &str) -> Result<ResolutionRecord> {
        let fqdn = format!("{}.", domain.trim_end_matches('.'));

        match self.resolver.lookup_ip(fqdn.as_str()).await {
            Ok(lookup) => Ok(ResolutionRecord::new(
                lookup.iter().map(|ip| ip.to_string()).collect(),
            )),
            Err(e) => lookup_failure(domain, &e),
        }
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

/// NXDOMAIN and empty answers are "no records", anything else is a failure
fn lookup_failure(domain: &str, error: &ResolveError) -> Result<ResolutionRecord> {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => Ok(ResolutionRecord::default()),
        _ => Err(SquatScoutError::resolution(domain, error.to_string())),
    }
}
