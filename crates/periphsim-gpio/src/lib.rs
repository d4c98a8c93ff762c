//! Simulated GPIO peripherals: an LED output and a debounced push button.

pub mod button;
pub mod led;

pub use button::{Button, ButtonEvent, BUTTON_PIN, DEBOUNCE_DELAY};
pub use led::{Led, LED_PIN};

/// Level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinState {
    Low,
    High,
}
