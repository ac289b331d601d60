//! Backend capabilities.
//!
//! What the configured storage can do is decided once at startup and handed
//! to both handlers and repositories, instead of each component probing for
//! a demo environment on its own.

use serde::{Deserialize, Serialize};

/// Capability flags of the configured backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendCapabilities {
    /// Create and close are allowed.
    pub supports_mutation: bool,
    /// Demo data is loaded when the backend starts empty.
    pub auto_seed: bool,
}

impl BackendCapabilities {
    /// A writable backend without demo data.
    pub fn full() -> Self {
        Self {
            supports_mutation: true,
            auto_seed: false,
        }
    }

    /// A seeded backend that rejects mutation.
    pub fn read_only_demo() -> Self {
        Self {
            supports_mutation: false,
            auto_seed: true,
        }
    }
}

impl Default for BackendCapabilities {
    fn default() -> Self {
        Self::full()
    }
}
