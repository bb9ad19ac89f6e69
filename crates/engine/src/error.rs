use thiserror::Error;

/// Engine transport failure.
///
/// All variants are fatal for the request that observed them; the bridge
/// never retries on its own. Timeouts are kept distinct from lost
/// connections so operators can tell a slow engine from a dead one.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine request timed out")]
    Timeout,

    #[error("engine connection closed")]
    ConnectionClosed,

    #[error("engine i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("engine protocol error: {0}")]
    Protocol(String),
}
