//! Storage backend selection.

use serde::Deserialize;

use crate::ports::BackendCapabilities;

/// Which store backs the crop cycle repositories.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Postgres,
    #[default]
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,

    /// Create and close are allowed. Disable for a read-only demo.
    #[serde(default = "default_true")]
    pub supports_mutation: bool,

    /// Load demo blocs and cycles when the in-memory store starts empty.
    #[serde(default = "default_true")]
    pub auto_seed: bool,
}

impl BackendConfig {
    /// Capability flags handed to handlers and repositories.
    ///
    /// Seeding only applies to the in-memory backend.
    pub fn capabilities(&self) -> BackendCapabilities {
        BackendCapabilities {
            supports_mutation: self.supports_mutation,
            auto_seed: self.auto_seed && self.kind == BackendKind::Memory,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            supports_mutation: true,
            auto_seed: true,
        }
    }
}

fn default_true() -> bool {
    true
}
