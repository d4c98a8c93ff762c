//! Mutex-guarded channel handle and a background "wire" feeding it.
//!
//! This is a separate mode: [`Channel`] itself stays single-owner and
//! unsynchronized. Wrap it in a [`SharedChannel`] when bytes must arrive from
//! another thread, the way an interrupt handler would feed a real UART.

use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;
use parking_lot::{Mutex, MutexGuard};

use crate::channel::{Channel, DEFAULT_CAPACITY};
use crate::config::ChannelConfig;
use crate::error::{ChannelError, Result};
use crate::logbuf::{Console, Sink};

pub struct SharedChannel<S = Console, const N: usize = DEFAULT_CAPACITY> {
    inner: Arc<Mutex<Channel<S, N>>>,
}

impl<S, const N: usize> Clone for SharedChannel<S, N> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<S: Sink, const N: usize> SharedChannel<S, N> {
    pub fn new(channel: Channel<S, N>) -> Self {
        Self { inner: Arc::new(Mutex::new(channel)) }
    }

    /// Hold the lock across several operations.
    pub fn lock(&self) -> MutexGuard<'_, Channel<S, N>> {
        self.inner.lock()
    }

    pub fn initialize(&self) -> Result<()> {
        self.lock().initialize()
    }

    pub fn initialize_with(&self, config: impl Into<Option<ChannelConfig>>) -> Result<()> {
        self.lock().initialize_with(config)
    }

    pub fn send_byte(&self, byte: u8) -> Result<()> {
        self.lock().send_byte(byte)
    }

    pub fn send_string<'a>(&self, text: impl Into<Option<&'a str>>) -> Result<()> {
        self.lock().send_string(text)
    }

    pub fn send_buffer(&self, bytes: impl AsRef<[u8]>) -> Result<()> {
        self.lock().send_buffer(bytes)
    }

    pub fn receive_byte(&self) -> Result<u8> {
        self.lock().receive_byte()
    }

    pub fn is_available(&self) -> bool {
        self.lock().is_available()
    }

    pub fn available(&self) -> usize {
        self.lock().available()
    }

    pub fn inject_received(&self, bytes: impl AsRef<[u8]>) {
        self.lock().inject_received(bytes)
    }

    pub fn admit(&self, bytes: impl AsRef<[u8]>) -> usize {
        self.lock().admit(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireEvent {
    /// One delivery went through; `admitted < offered` means the buffer overflowed.
    Admitted { offered: usize, admitted: usize },
    Closed,
}

enum Command {
    Deliver(Vec<u8>),
    Close,
}

/// Background producer writing into a [`SharedChannel`].
pub struct Wire {
    tx_cmd: Sender<Command>,
    rx_evt: Receiver<WireEvent>,
    handle: Option<JoinHandle<()>>,
}

impl Wire {
    pub fn attach<S, const N: usize>(channel: SharedChannel<S, N>) -> Self
    where
        S: Sink + Send + 'static,
    {
        let (tx_cmd, rx_cmd) = unbounded::<Command>();
        let (tx_evt, rx_evt) = unbounded::<WireEvent>();

        let handle = std::thread::spawn(move || {
            debug!("wire attached");
            for cmd in rx_cmd.iter() {
                match cmd {
                    Command::Deliver(data) => {
                        let admitted = channel.admit(&data);
                        let _ = tx_evt.send(WireEvent::Admitted { offered: data.len(), admitted });
                    }
                    Command::Close => break,
                }
            }
            debug!("wire closed");
            let _ = tx_evt.send(WireEvent::Closed);
        });

        Self { tx_cmd, rx_evt, handle: Some(handle) }
    }

    /// Queue bytes for delivery; they reach the buffer asynchronously.
    pub fn deliver(&self, data: impl Into<Vec<u8>>) -> Result<()> {
        if self.handle.is_none() {
            return Err(ChannelError::WireClosed);
        }
        self.tx_cmd
            .send(Command::Deliver(data.into()))
            .map_err(|_| ChannelError::WireClosed)
    }

    pub fn events(&self) -> &Receiver<WireEvent> {
        &self.rx_evt
    }

    /// Stop the thread after pending deliveries and wait for it.
    pub fn close(&mut self) {
        let Some(handle) = self.handle.take() else { return };
        let _ = self.tx_cmd.send(Command::Close);
        let _ = handle.join();
    }
}

impl Drop for Wire {
    fn drop(&mut self) {
        self.close();
    }
}
