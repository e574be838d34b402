//! Scan configuration loaded from the environment

use std::time::Duration;

use crate::error::{Result, SquatScoutError};
use crate::typo::default_suffixes;

pub const ENV_IPINFO_TOKEN: &str = "IPINFO_TOKEN";
pub const ENV_IPINFO_BASE_URL: &str = "IPINFO_BASE_URL";
pub const ENV_TLDS: &str = "SQUAT_SCOUT_TLDS";
pub const ENV_CONCURRENCY: &str = "SQUAT_SCOUT_CONCURRENCY";
pub const ENV_GEO_CONCURRENCY: &str = "SQUAT_SCOUT_GEO_CONCURRENCY";
pub const ENV_TIMEOUT_SECS: &str = "SQUAT_SCOUT_TIMEOUT_SECS";
pub const ENV_RESOLVER: &str = "SQUAT_SCOUT_RESOLVER";
pub const ENV_DIG_PATH: &str = "SQUAT_SCOUT_DIG_PATH";

const DEFAULT_IPINFO_BASE_URL: &str = "https://ipinfo.io";

/// Which resolution backend to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverKind {
    /// `dig +short` subprocess
    Dig { program: String },
    /// In-process resolver reading the system DNS configuration
    System,
}

impl std::fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolverKind::Dig { program } => write!(f, "dig ({})", program),
            ResolverKind::System => write!(f, "system"),
        }
    }
}

/// Geolocation provider settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoConfig {
    pub api_token: Option<String>,
    pub base_url: String,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: DEFAULT_IPINFO_BASE_URL.to_string(),
        }
    }
}

/// Configuration for a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Suffixes appended to every variant, each with a leading dot
    pub suffixes: Vec<String>,
    /// Concurrent resolutions
    pub concurrency: usize,
    /// Concurrent geolocation calls
    pub geo_concurrency: usize,
    /// Timeout applied to each resolution and each lookup
    pub timeout: Duration,
    pub resolver: ResolverKind,
    pub geo: GeoConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            suffixes: default_suffixes(),
            concurrency: 16,
            geo_concurrency: 4,
            timeout: Duration::from_secs(10),
            resolver: ResolverKind::Dig {
                program: "dig".to_string(),
            },
            geo: GeoConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset or blank keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(raw) = get(ENV_TLDS) {
            config.suffixes = parse_suffixes(&raw)?;
        }
        if let Some(raw) = get(ENV_CONCURRENCY) {
            config.concurrency = parse_positive(ENV_CONCURRENCY, &raw)? as usize;
        }
        if let Some(raw) = get(ENV_GEO_CONCURRENCY) {
            config.geo_concurrency = parse_positive(ENV_GEO_CONCURRENCY, &raw)? as usize;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            config.timeout = Duration::from_secs(parse_positive(ENV_TIMEOUT_SECS, &raw)?);
        }

        config.resolver = match get(ENV_RESOLVER).as_deref().map(str::to_lowercase).as_deref() {
            None | Some("dig") => ResolverKind::Dig {
                program: get(ENV_DIG_PATH).unwrap_or_else(|| "dig".to_string()),
            },
            Some("system") => ResolverKind::System,
            Some(other) => {
                return Err(SquatScoutError::config(format!(
                    "Unsupported resolver '{}'. Supported resolvers: dig, system",
                    other
                )))
            }
        };

        config.geo.api_token = get(ENV_IPINFO_TOKEN);
        if let Some(url) = get(ENV_IPINFO_BASE_URL) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SquatScoutError::config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    ENV_IPINFO_BASE_URL, url
                )));
            }
            config.geo.base_url = url;
        }

        Ok(config)
    }

    pub fn has_api_token(&self) -> bool {
        self.geo.api_token.is_some()
    }
}

/// Parse a comma-separated suffix list; `com` and `.com` are equivalent
pub fn parse_suffixes(raw: &str) -> Result<Vec<String>> {
    let mut suffixes: Vec<String> = Vec::new();

    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let label = item.trim_start_matches('.').to_lowercase();
        let valid = !label.is_empty()
            && label
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
        if !valid {
            return Err(SquatScoutError::config(format!("Invalid suffix '{}' in {}", item, ENV_TLDS)));
        }

        let suffix = format!(".{}", label);
        if !suffixes.contains(&suffix) {
            suffixes.push(suffix);
        }
    }

    if suffixes.is_empty() {
        return Err(SquatScoutError::config(format!("{} must list at least one suffix", ENV_TLDS)));
    }

    Ok(suffixes)
}

fn parse_positive(key: &str, raw: &str) -> Result<u64> {
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(SquatScoutError::config(format!(
            "{} must be a positive integer, got '{}'",
            key, raw
        ))),
        Ok(value) => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ScanConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ScanConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, ScanConfig::default());
        assert_eq!(config.suffixes.len(), 10);
        assert_eq!(config.suffixes[0], ".com");
        assert!(!config.has_api_token());
        assert_eq!(config.geo.base_url, "https://ipinfo.io");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (ENV_TLDS, "com, .ORG,io,com"),
            (ENV_CONCURRENCY, "4"),
            (ENV_GEO_CONCURRENCY, "2"),
            (ENV_TIMEOUT_SECS, "3"),
            (ENV_RESOLVER, "System"),
            (ENV_IPINFO_TOKEN, " secret "),
            (ENV_IPINFO_BASE_URL, "http://127.0.0.1:9000"),
        ])
        .unwrap();

        assert_eq!(config.suffixes, vec![".com", ".org", ".io"]);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.geo_concurrency, 2);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.resolver, ResolverKind::System);
        assert_eq!(config.geo.api_token.as_deref(), Some("secret"));
        assert_eq!(config.geo.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_dig_path() {
        let config = config_from(&[(ENV_DIG_PATH, "/usr/local/bin/dig")]).unwrap();
        assert_eq!(
            config.resolver,
            ResolverKind::Dig {
                program: "/usr/local/bin/dig".to_string()
            }
        );
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = config_from(&[(ENV_IPINFO_TOKEN, "   "), (ENV_TLDS, "")]).unwrap();
        assert!(!config.has_api_token());
        assert_eq!(config.suffixes, default_suffixes());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(config_from(&[(ENV_CONCURRENCY, "0")]).is_err());
        assert!(config_from(&[(ENV_TIMEOUT_SECS, "soon")]).is_err());
        assert!(config_from(&[(ENV_RESOLVER, "doh")]).is_err());
        assert!(config_from(&[(ENV_TLDS, ",,")]).is_err());
        assert!(config_from(&[(ENV_TLDS, "c om")]).is_err());
        assert!(config_from(&[(ENV_IPINFO_BASE_URL, "ipinfo.io")]).is_err());
    }

    #[test]
    fn test_multi_label_suffix() {
        assert_eq!(parse_suffixes("co.uk").unwrap(), vec![".co.uk"]);
        assert!(parse_suffixes("co..uk").is_err());
    }
}
