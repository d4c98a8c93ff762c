use std::time::Duration;

use log::{debug, trace};
use periphsim_core::{Direction, Result, Sink};

use crate::PinState;

pub const BUTTON_PIN: u8 = 2;
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    None,
    Pressed,
    Released,
}

/// Active-low push button with a pull-up: released reads High, pressed reads Low.
pub struct Button<S> {
    pin: u8,
    debounce: Duration,
    /// Simulated electrical level.
    raw: PinState,
    /// Last debounced level seen by `poll_event`.
    last: PinState,
    sink: S,
}

impl<S: Sink> Button<S> {
    pub fn new(pin: u8, debounce: Duration, sink: S) -> Self {
        Self {
            pin,
            debounce,
            raw: PinState::High,
            last: PinState::High,
            sink,
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.raw = PinState::High;
        self.last = PinState::High;
        debug!("button on pin {} initialized, debounce {:?}", self.pin, self.debounce);
        self.sink
            .emit(Direction::Status, &format!("[按键] 初始化完成，引脚: {}", self.pin));
        Ok(())
    }

    pub fn read_raw(&self) -> PinState {
        self.raw
    }

    /// Two samples `debounce` apart; an unstable level reads as released.
    pub fn read(&self) -> PinState {
        let first = self.read_raw();
        if !self.debounce.is_zero() {
            std::thread::sleep(self.debounce);
        }
        let second = self.read_raw();

        if first == second {
            first
        } else {
            trace!("button bounce on pin {}", self.pin);
            PinState::High
        }
    }

    /// Compare the debounced level with the previous poll.
    pub fn poll_event(&mut self) -> ButtonEvent {
        let current = self.read();
        let event = match (self.last, current) {
            (PinState::High, PinState::Low) => {
                self.sink.emit(Direction::Rx, "[按键] 事件: 按下 ▼");
                ButtonEvent::Pressed
            }
            (PinState::Low, PinState::High) => {
                self.sink.emit(Direction::Rx, "[按键] 事件: 释放 ▲");
                ButtonEvent::Released
            }
            _ => ButtonEvent::None,
        };
        self.last = current;
        event
    }

    pub fn simulate_press(&mut self) {
        self.raw = PinState::Low;
    }

    pub fn simulate_release(&mut self) {
        self.raw = PinState::High;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
