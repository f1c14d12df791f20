//! Error types for the drift animation
//!
//! The frame loop itself never fails; errors only come from configuration
//! and from wiring the animation into a host page.

/// Errors that can occur while configuring or hosting the drift animation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriftError {
    /// A configuration knob holds an unusable value
    InvalidConfig {
        /// The offending field
        field: &'static str,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// JSON configuration could not be parsed
    ConfigParse(String),

    /// The host page is missing something the renderer needs
    Dom(String),
}

impl std::fmt::Display for DriftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid config '{}': {}", field, reason)
            }
            Self::ConfigParse(msg) => write!(f, "config parse error: {}", msg),
            Self::Dom(msg) => write!(f, "dom error: {}", msg),
        }
    }
}

impl std::error::Error for DriftError {}

impl From<serde_json::Error> for DriftError {
    fn from(e: serde_json::Error) -> Self {
        DriftError::ConfigParse(e.to_string())
    }
}

/// Result type alias for drift operations
pub type DriftResult<T> = Result<T, DriftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DriftError::InvalidConfig {
            field: "orbit_radius",
            reason: "must be positive",
        };
        assert_eq!(err.to_string(), "invalid config 'orbit_radius': must be positive");

        let err = DriftError::ConfigParse("expected value".to_string());
        assert_eq!(err.to_string(), "config parse error: expected value");

        let err = DriftError::Dom("canvas #driftCanvas not found".to_string());
        assert_eq!(err.to_string(), "dom error: canvas #driftCanvas not found");
    }

    #[test]
    fn test_from_json_error() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: DriftError = parse.unwrap_err().into();
        assert!(matches!(err, DriftError::ConfigParse(_)));
    }
}
