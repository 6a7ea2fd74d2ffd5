//! Engine error taxonomy
//!
//! Programming-level faults (OutOfBounds, NoPlayerFound) are fatal to the
//! session and force a level reload on the host side. Script misbehavior is
//! NOT represented here - it is recovered per-tick as a no-op with a queued
//! diagnostic, never an error.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Grid access outside [0,height) x [0,width)
    OutOfBounds { row: i64, col: i64 },
    /// No cell carries the Player tag - grid invariant violated
    NoPlayerFound,
    /// Level bundle failed to parse or validate
    MalformedLevel(String),
    /// A second tick trigger arrived while a tick was in flight
    TickInProgress,
    /// Tick requested after the session reached a terminal outcome
    SessionOver,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::OutOfBounds { row, col } => {
                write!(f, "grid access out of bounds at ({}, {})", row, col)
            }
            EngineError::NoPlayerFound => write!(f, "no player cell in grid"),
            EngineError::MalformedLevel(msg) => write!(f, "malformed level: {}", msg),
            EngineError::TickInProgress => write!(f, "tick already in progress"),
            EngineError::SessionOver => write!(f, "session already reached a terminal outcome"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<EngineError> for String {
    fn from(e: EngineError) -> Self {
        e.to_string()
    }
}
