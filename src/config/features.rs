//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Trace every HTTP request with `TraceLayer`
    #[serde(default = "default_true")]
    pub enable_tracing: bool,

    /// Gzip JSON responses
    #[serde(default)]
    pub enable_compression: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_tracing: true,
            enable_compression: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(flags.enable_tracing);
        assert!(!flags.enable_compression);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let flags: FeatureFlags =
            serde_json::from_str(r#"{"enable_tracing": false, "enable_compression": true}"#)
                .unwrap();
        assert!(!flags.enable_tracing);
        assert!(flags.enable_compression);
    }
}
