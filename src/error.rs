//! Error types for the jar engine.
//!
//! The simulation itself never fails: capacity overflow, placement exhaustion
//! and degenerate geometry all degrade silently. Errors only exist at the
//! boundary where the host hands us JSON.

use std::fmt;

/// Errors raised while loading configuration or decoding spawn events.
#[derive(Debug)]
pub enum JarError {
    /// Config JSON was malformed.
    ConfigParse(serde_json::Error),
    /// Config JSON parsed but holds values the simulation cannot run with.
    InvalidConfig(String),
    /// Spawn event JSON was malformed.
    EventParse(serde_json::Error),
}

impl fmt::Display for JarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JarError::ConfigParse(e) => write!(f, "Failed to parse jar config: {}", e),
            JarError::InvalidConfig(msg) => write!(f, "Invalid jar config: {}", msg),
            JarError::EventParse(e) => write!(f, "Failed to parse spawn events: {}", e),
        }
    }
}

impl std::error::Error for JarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JarError::ConfigParse(e) => Some(e),
            JarError::EventParse(e) => Some(e),
            JarError::InvalidConfig(_) => None,
        }
    }
}
