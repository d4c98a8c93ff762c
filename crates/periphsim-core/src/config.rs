use std::fmt;

use crate::error::{ChannelError, Result};

pub const DEFAULT_BAUD_RATE: u32 = 115_200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Parity {
    #[default]
    None = 0,
    Odd = 1,
    Even = 2,
}

impl Parity {
    /// Numeric code used in the init summary (0: none, 1: odd, 2: even).
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl std::str::FromStr for Parity {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "none" | "n" | "0" => Self::None,
            "odd" | "o" | "1" => Self::Odd,
            "even" | "e" | "2" => Self::Even,
            _ => return Err(ChannelError::InvalidArgument("unknown parity")),
        })
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Parity::None => "none",
            Parity::Odd => "odd",
            Parity::Even => "even",
        };
        f.write_str(name)
    }
}

/// Line settings of a channel. The baud rate is informational, no timing is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    pub baud_rate: u32,
    pub data_bits: u8,
    pub stop_bits: u8,
    pub parity: Parity,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: 8,
            stop_bits: 1,
            parity: Parity::None,
        }
    }
}

impl ChannelConfig {
    /// Range checks on every field.
    ///
    /// `Channel::initialize_with` never calls this; a channel accepts any values.
    pub fn validate(&self) -> Result<()> {
        if self.baud_rate == 0 {
            return Err(ChannelError::InvalidArgument("baud rate must be positive"));
        }
        if !(5..=8).contains(&self.data_bits) {
            return Err(ChannelError::InvalidArgument("data bits must be within 5..=8"));
        }
        if !(1..=2).contains(&self.stop_bits) {
            return Err(ChannelError::InvalidArgument("stop bits must be 1 or 2"));
        }
        Ok(())
    }
}

impl fmt::Display for ChannelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "波特率={}, 数据位={}, 停止位={}, 校验={}",
            self.baud_rate,
            self.data_bits,
            self.stop_bits,
            self.parity.code()
        )
    }
}
