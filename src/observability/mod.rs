//! Observability subsystem
//!
//! - Structured logging through `tracing` (text or JSON)
//! - Typed lifecycle and request events
//!
//! # Usage
//!
//! ```ignore
//! use salesdash::observability::{init_logging, Event, LoggingConfig};
//!
//! init_logging(&LoggingConfig::default());
//! tracing::info!(event = %Event::Serving, port = 5001, "listening");
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{init_logging, LogFormat, LoggingConfig};
