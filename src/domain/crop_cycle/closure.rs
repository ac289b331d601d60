//! Closure validation report.

use serde::{Deserialize, Serialize};

use crate::domain::overview::ClosureSummary;

/// How much the report can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// All gates were evaluated against real data.
    Full,
    /// Gates could not be evaluated; the pass is optimistic.
    Advisory,
}

/// Outcome of checking whether a cycle may be closed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosureValidation {
    pub mode: ValidationMode,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// False when the backend cannot persist a closure at all.
    pub closure_supported: bool,
    /// Closing figures; present on full reports of active cycles.
    pub summary: Option<ClosureSummary>,
}

impl ClosureValidation {
    /// A fully evaluated report; starts clean.
    pub fn full() -> Self {
        Self {
            mode: ValidationMode::Full,
            errors: Vec::new(),
            warnings: Vec::new(),
            closure_supported: true,
            summary: None,
        }
    }

    /// An optimistic pass carrying the reason it could not be evaluated.
    pub fn advisory(reason: impl Into<String>) -> Self {
        Self {
            mode: ValidationMode::Advisory,
            errors: Vec::new(),
            warnings: vec![reason.into()],
            closure_supported: true,
            summary: None,
        }
    }

    /// An advisory report for a backend that cannot close cycles.
    pub fn read_only(reason: impl Into<String>) -> Self {
        Self {
            closure_supported: false,
            ..Self::advisory(reason)
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn is_advisory(&self) -> bool {
        self.mode == ValidationMode::Advisory
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Warnings never block closure.
    pub fn can_close(&self) -> bool {
        self.is_valid() && self.closure_supported
    }
}
