//! Context carried by every state-changing request.

use std::fmt;

use uuid::Uuid;

use super::Timestamp;

/// Where a command entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    Api,
    Seed,
    Test,
}

impl CommandSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandSource::Api => "api",
            CommandSource::Seed => "seed",
            CommandSource::Test => "test",
        }
    }
}

impl fmt::Display for CommandSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request context for command handlers.
///
/// The correlation id ties the handler's log lines to the HTTP request that
/// caused them. Requests without an `x-request-id` get a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMetadata {
    correlation_id: String,
    source: CommandSource,
    issued_at: Timestamp,
}

impl CommandMetadata {
    pub fn new(source: CommandSource) -> Self {
        Self {
            correlation_id: Uuid::new_v4().to_string(),
            source,
            issued_at: Timestamp::now(),
        }
    }

    /// Metadata for an API request, reusing its request id when present.
    pub fn for_request(request_id: Option<&str>) -> Self {
        let metadata = Self::new(CommandSource::Api);
        match request_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Self {
                correlation_id: id.to_string(),
                ..metadata
            },
            None => metadata,
        }
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn source(&self) -> CommandSource {
        self.source
    }

    pub fn issued_at(&self) -> Timestamp {
        self.issued_at
    }
}

#[cfg(test)]
impl CommandMetadata {
    pub fn test_fixture() -> Self {
        Self {
            correlation_id: "test-correlation-id".to_string(),
            ..Self::new(CommandSource::Test)
        }
    }
}
