use thiserror::Error;

/// Failures reported by channel operations.
///
/// Every failure is local to the call that produced it. Nothing is retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Receive attempted while the buffer is empty; poll again later.
    #[error("no data available")]
    Timeout,
    #[error("receive buffer full: admitted {admitted} bytes, dropped {dropped}")]
    Overflow { admitted: usize, dropped: usize },
    #[error("wire is closed")]
    WireClosed,
}

pub type Result<T, E = ChannelError> = std::result::Result<T, E>;
