//! Observable events
//!
//! Every lifecycle and request-boundary log line carries one of these as
//! its `event` field, so logs can be filtered on a stable name.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Listener bound, ready to serve
    Serving,
    /// Shutdown complete
    ShutdownComplete,

    // Configuration
    /// Configuration loaded and validated
    ConfigLoaded,

    // Record sources
    /// Record source opened (database connected)
    SourceOpened,
    /// Dataset snapshot loaded
    SnapshotLoaded,
    /// Dataset snapshot replaced
    SnapshotReloaded,
    /// Plan evaluated by a record source
    SourceExecuted,
    /// Record source failed while serving a request
    SourceFailed,

    // Query operations
    /// Query rejected by validation
    QueryRejected,
    /// Query served
    QueryServed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "SALESDASH_STARTUP_BEGIN",
            Event::Serving => "SALESDASH_SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SourceOpened => "SOURCE_OPENED",
            Event::SnapshotLoaded => "SNAPSHOT_LOADED",
            Event::SnapshotReloaded => "SNAPSHOT_RELOADED",
            Event::SourceExecuted => "SOURCE_EXECUTED",
            Event::SourceFailed => "SOURCE_FAILED",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::QueryServed => "QUERY_COMPLETE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
