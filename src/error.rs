//! Error handling for squat-scout

use thiserror::Error;

/// Main error type for squat-scout
#[derive(Error, Debug, Clone)]
pub enum SquatScoutError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resolution error for '{domain}': {message}")]
    Resolution { domain: String, message: String },

    #[error("Geolocation lookup error for '{address}': {message}")]
    Lookup {
        address: String,
        message: String,
        status_code: Option<u16>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SquatScoutError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a resolution error for a candidate domain
    pub fn resolution(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a geolocation lookup error for an address
    pub fn lookup(
        address: impl Into<String>,
        message: impl Into<String>,
        status_code: Option<u16>,
    ) -> Self {
        Self::Lookup {
            address: address.into(),
            message: message.into(),
            status_code,
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Short message used inline in scan output
    pub fn detail(&self) -> String {
        match self {
            Self::Resolution { message, .. } => message.clone(),
            Self::Lookup {
                message,
                status_code: Some(code),
                ..
            } => format!("{} (HTTP {})", message, code),
            Self::Lookup { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or environment variables", message)
            }
            Self::Validation { message } => {
                format!("❌ {}\n💡 Enter a bare label such as 'facebook'", message)
            }
            Self::Resolution { domain, message } => {
                format!("⚠️  Could not resolve '{}': {}", domain, message)
            }
            Self::Lookup { address, message, .. } => {
                format!("⚠️  Could not geolocate '{}': {}", address, message)
            }
            Self::Timeout { operation, timeout_secs } => {
                format!("⏱️  Operation '{}' timed out after {}s\n💡 Try increasing SQUAT_SCOUT_TIMEOUT_SECS", operation, timeout_secs)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}", message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

impl From<serde_json::Error> for SquatScoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SquatScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_detail_includes_status() {
        let err = SquatScoutError::lookup("1.2.3.4", "Not found", Some(404));
        assert_eq!(err.detail(), "Not found (HTTP 404)");
        assert!(err.to_string().contains("1.2.3.4"));
    }

    #[test]
    fn test_resolution_detail_is_bare_message() {
        let err = SquatScoutError::resolution("ab.com", "timed out after 10s");
        assert_eq!(err.detail(), "timed out after 10s");
        assert!(err.user_message().contains("ab.com"));
    }

    #[test]
    fn test_serde_json_error_becomes_parse_error() {
        let err: SquatScoutError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, SquatScoutError::Parse { .. }));
    }
}
