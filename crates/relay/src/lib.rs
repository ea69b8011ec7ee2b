pub mod config;
pub mod message;
pub mod metrics;
pub mod relay;
pub mod server;
pub mod sinks;
pub mod sources;

use thiserror::Error;

pub use sinks::SendError;
pub use sources::DecodeError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
