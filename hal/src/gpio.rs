//! GPIO (General Purpose Input/Output) abstraction

use core::ops::Not;

use embedded_hal::digital::PinState;

use crate::error::HalResult;

/// GPIO pin modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Input (floating)
    Input,
    /// Output (push-pull)
    Output,
}

/// GPIO pin levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Low level (0V)
    Low,
    /// High level (VCC)
    High,
}

/// The opposite logic level.
impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for PinState {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        }
    }
}

impl From<PinState> for Level {
    fn from(state: PinState) -> Self {
        match state {
            PinState::Low => Level::Low,
            PinState::High => Level::High,
        }
    }
}

/// Digital output line
///
/// Implementations are expected to complete each call synchronously; the
/// level passed to [`GpioPin::write`] is on the line when the call returns.
pub trait GpioPin {
    /// Configure pin mode
    fn set_mode(&mut self, mode: PinMode) -> HalResult<()>;

    /// Write level (for output pins)
    fn write(&mut self, level: Level) -> HalResult<()>;

    /// Get pin number
    fn pin_number(&self) -> u32;
}

impl<P: GpioPin + ?Sized> GpioPin for &mut P {
    fn set_mode(&mut self, mode: PinMode) -> HalResult<()> {
        (**self).set_mode(mode)
    }

    fn write(&mut self, level: Level) -> HalResult<()> {
        (**self).write(level)
    }

    fn pin_number(&self) -> u32 {
        (**self).pin_number()
    }
}
