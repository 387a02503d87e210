//! Error types surfaced by the runtime API.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a world to be configured before building")]
    MissingWorld,

    #[error("runtime requires at least one client before starting")]
    NoClients,

    #[error("turn worker input channel closed")]
    InputChannelClosed,

    #[error("turn worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("invalid runtime config: {field} must be at least 1")]
    InvalidConfig { field: &'static str },
}
