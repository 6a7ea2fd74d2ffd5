//! Script invocation contract
//!
//! The behavior function is host-supplied and untrusted. The core passes the
//! cache through opaquely, validates nothing beyond the response shape, and
//! leaves sandboxing and timeouts to the embedder.

use crate::domain::cells::Cell;

/// Opaque script-managed state threaded through ticks. The core never
/// inspects or mutates it.
pub type ScriptCache = serde_json::Value;

#[derive(Debug, Clone)]
pub struct ScriptReply {
    /// Requested command, expected in 0..=3
    pub response: i64,
    /// Replacement cache for the next tick
    pub cached_data: ScriptCache,
}

/// Host-supplied behavior function, called exactly once per tick with the
/// windowed, visibility-masked view. An Err return is a contract violation:
/// the session recovers with a no-op tick and a diagnostic.
pub trait ScriptRunner {
    fn invoke(&mut self, view: &[Vec<Cell>], cache: ScriptCache) -> Result<ScriptReply, String>;
}

impl<F> ScriptRunner for F
where
    F: FnMut(&[Vec<Cell>], ScriptCache) -> Result<ScriptReply, String>,
{
    fn invoke(&mut self, view: &[Vec<Cell>], cache: ScriptCache) -> Result<ScriptReply, String> {
        self(view, cache)
    }
}
