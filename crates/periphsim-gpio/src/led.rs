use log::debug;
use periphsim_core::{Direction, Result, Sink};

use crate::PinState;

pub const LED_PIN: u8 = 13;

/// LED on an output pin; High lights it.
pub struct Led<S> {
    pin: u8,
    state: PinState,
    sink: S,
}

impl<S: Sink> Led<S> {
    pub fn new(pin: u8, sink: S) -> Self {
        Self { pin, state: PinState::Low, sink }
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.state = PinState::Low;
        debug!("led on pin {} initialized", self.pin);
        self.sink
            .emit(Direction::Status, &format!("[LED] 初始化完成，引脚: {}", self.pin));
        Ok(())
    }

    pub fn on(&mut self) {
        self.state = PinState::High;
        self.sink.emit(Direction::Tx, "[LED] 状态: 亮 ●");
    }

    pub fn off(&mut self) {
        self.state = PinState::Low;
        self.sink.emit(Direction::Tx, "[LED] 状态: 灭 ○");
    }

    pub fn toggle(&mut self) {
        match self.state {
            PinState::High => self.off(),
            PinState::Low => self.on(),
        }
    }

    pub fn state(&self) -> PinState {
        self.state
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
