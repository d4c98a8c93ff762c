//! Simulated UART channel.
//!
//! A [`Channel`] owns its configuration and a fixed-size receive ring buffer.
//! Transmission is only observable through the [`Sink`] it writes to. Received
//! data enters through [`Channel::inject_received`], which stands in for an
//! interrupt-driven receive path.
//!
//! A channel has a single owner and every operation takes `&mut self`, so
//! calls are serialized by construction. Use [`crate::SharedChannel`] when a
//! producer on another thread must feed the buffer.

use std::fmt::Write as _;
use std::ops::RangeInclusive;

use log::{debug, trace, warn};

use crate::config::ChannelConfig;
use crate::error::{ChannelError, Result};
use crate::logbuf::{Console, Direction, Sink};
use crate::ring::RingBuffer;

/// Ring buffer slots of a channel unless chosen otherwise.
pub const DEFAULT_CAPACITY: usize = 256;

const PRINTABLE: RangeInclusive<u8> = 0x20..=0x7E;

pub struct Channel<S = Console, const N: usize = DEFAULT_CAPACITY> {
    config: ChannelConfig,
    rx: RingBuffer<N>,
    sink: S,
}

impl<S: Sink> Channel<S> {
    /// Channel with the default capacity writing to `sink`.
    pub fn new(sink: S) -> Self {
        Self::with_capacity(sink)
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::new(Console)
    }
}

impl<S: Sink, const N: usize> Channel<S, N> {
    /// Channel with `N` ring slots, e.g. `Channel::<_, 16>::with_capacity(sink)`.
    pub fn with_capacity(sink: S) -> Self {
        Self {
            config: ChannelConfig::default(),
            rx: RingBuffer::new(),
            sink,
        }
    }

    /// Initialize with 115200 baud, 8 data bits, 1 stop bit, no parity.
    pub fn initialize(&mut self) -> Result<()> {
        self.initialize_with(ChannelConfig::default())
    }

    /// Store `config` verbatim and clear the receive buffer.
    ///
    /// Field ranges are not checked here, see [`ChannelConfig::validate`].
    pub fn initialize_with(&mut self, config: impl Into<Option<ChannelConfig>>) -> Result<()> {
        let config = config
            .into()
            .ok_or(ChannelError::InvalidArgument("missing channel configuration"))?;

        self.config = config;
        self.rx.clear();
        debug!("channel initialized with {config:?}");

        self.sink.emit(Direction::Status, "[UART] 初始化完成");
        self.sink.emit(Direction::Status, &format!("[UART] 配置: {config}"));
        Ok(())
    }

    pub fn send_byte(&mut self, byte: u8) -> Result<()> {
        self.sink.emit(Direction::Tx, &byte_line("[UART TX]", byte));
        Ok(())
    }

    pub fn send_string<'a>(&mut self, text: impl Into<Option<&'a str>>) -> Result<()> {
        let text = text
            .into()
            .ok_or(ChannelError::InvalidArgument("missing string"))?;
        self.sink.emit(Direction::Tx, &format!("[UART TX] 字符串: \"{text}\""));
        Ok(())
    }

    /// Emit every byte of `bytes` in hex on one line. An empty buffer is rejected.
    pub fn send_buffer(&mut self, bytes: impl AsRef<[u8]>) -> Result<()> {
        let bytes = bytes.as_ref();
        if bytes.is_empty() {
            return Err(ChannelError::InvalidArgument("empty buffer"));
        }
        self.sink.emit(Direction::Tx, &buffer_line(bytes));
        Ok(())
    }

    /// Dequeue the oldest received byte, or `Timeout` right away when there is none.
    pub fn receive_byte(&mut self) -> Result<u8> {
        let byte = self.rx.pop().ok_or(ChannelError::Timeout)?;
        self.sink.emit(Direction::Rx, &byte_line("[UART RX]", byte));
        Ok(byte)
    }

    /// Receive every available byte in order.
    pub fn drain(&mut self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.available());
        while let Ok(byte) = self.receive_byte() {
            bytes.push(byte);
        }
        bytes
    }

    pub fn is_available(&self) -> bool {
        !self.rx.is_empty()
    }

    /// Bytes admitted and not yet received.
    pub fn available(&self) -> usize {
        self.rx.len()
    }

    /// Usable buffer capacity, one less than the slot count.
    pub fn capacity(&self) -> usize {
        self.rx.capacity()
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Simulate bytes arriving from the wire.
    ///
    /// Bytes that do not fit are dropped after a single warning line. Use
    /// [`Channel::admit`] to learn how many were kept.
    pub fn inject_received(&mut self, bytes: impl AsRef<[u8]>) {
        self.admit(bytes);
    }

    /// Same as [`Channel::inject_received`], returning the number of admitted bytes.
    pub fn admit(&mut self, bytes: impl AsRef<[u8]>) -> usize {
        let bytes = bytes.as_ref();
        if bytes.is_empty() {
            return 0;
        }

        self.sink.emit(
            Direction::Status,
            &format!("[UART] 模拟接收 {} 字节数据", bytes.len()),
        );

        let admitted = self.rx.push_slice(bytes);
        trace!("admitted {admitted}/{} bytes, {} pending", bytes.len(), self.rx.len());

        if admitted < bytes.len() {
            warn!(
                "receive buffer full, dropped {} of {} bytes",
                bytes.len() - admitted,
                bytes.len()
            );
            self.sink.emit(Direction::Status, "[UART] 警告: 接收缓冲区已满");
        }
        admitted
    }

    /// Strict injection: fails with `Overflow` when any byte was dropped.
    ///
    /// Bytes admitted before the buffer filled up stay in the buffer.
    pub fn try_inject(&mut self, bytes: impl AsRef<[u8]>) -> Result<usize> {
        let bytes = bytes.as_ref();
        let admitted = self.admit(bytes);
        match bytes.len() - admitted {
            0 => Ok(admitted),
            dropped => Err(ChannelError::Overflow { admitted, dropped }),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// `<tag> 0xHH`, followed by ` 'c'` when the byte is printable ASCII.
fn byte_line(tag: &str, byte: u8) -> String {
    let mut line = format!("{tag} 0x{byte:02X}");
    if PRINTABLE.contains(&byte) {
        let _ = write!(line, " '{}'", byte as char);
    }
    line
}

fn buffer_line(bytes: &[u8]) -> String {
    let mut line = format!("[UART TX] 发送 {} 字节: ", bytes.len());
    for byte in bytes {
        let _ = write!(line, "{byte:02X} ");
    }
    line
}
