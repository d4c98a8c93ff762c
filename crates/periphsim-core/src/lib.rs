//! Core functionalities: simulated UART channel, receive ring buffer, output sinks.

pub mod channel;
pub mod config;
pub mod error;
pub mod logbuf;
pub mod ring;
pub mod shared;

pub use channel::{Channel, DEFAULT_CAPACITY};
pub use config::{ChannelConfig, Parity, DEFAULT_BAUD_RATE};
pub use error::{ChannelError, Result};
pub use logbuf::{Console, Direction, LogEntry, LogStore, Sink};
pub use ring::RingBuffer;
pub use shared::{SharedChannel, Wire, WireEvent};
