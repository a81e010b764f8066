//! Adapters from `embedded-hal` 1.0 traits to the HAL traits
//!
//! Board support crates implement `embedded_hal::digital::OutputPin` and
//! `embedded_hal::spi::SpiBus`. The wrappers here let those drive anything
//! written against [`GpioPin`] and [`SpiMaster`].

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};

use crate::error::{HalError, HalResult};
use crate::gpio::{GpioPin, Level, PinMode};
use crate::spi::{BitOrder, SpiConfig, SpiMaster};

/// Output line backed by an `embedded-hal` output pin
pub struct EhOutputPin<P> {
    pin: P,
    number: u32,
}

impl<P: OutputPin> EhOutputPin<P> {
    /// Wrap `pin`, reporting `number` as its identifier.
    pub fn new(pin: P, number: u32) -> Self {
        Self { pin, number }
    }

    /// Give back the wrapped pin.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> GpioPin for EhOutputPin<P> {
    fn set_mode(&mut self, mode: PinMode) -> HalResult<()> {
        // The pin type already fixes the direction.
        match mode {
            PinMode::Output => Ok(()),
            _ => Err(HalError::NotSupported),
        }
    }

    fn write(&mut self, level: Level) -> HalResult<()> {
        self.pin
            .set_state(level.into())
            .map_err(|e| HalError::Gpio(digital::Error::kind(&e)))
    }

    fn pin_number(&self) -> u32 {
        self.number
    }
}

/// Hook applying clock speed and mode to a bus at the start of a transaction
///
/// The hook always sees `BitOrder::MsbFirst`; LSB-first order is produced by
/// [`EhSpiMaster`] itself and must not be set in hardware as well.
pub type Reconfigure<B> = fn(&mut B, &SpiConfig) -> HalResult<()>;

/// SPI master backed by an `embedded-hal` bus
///
/// `embedded-hal` buses shift MSB first and have no runtime clock setter.
/// LSB-first transfers are produced by reversing each byte, and clock speed
/// and mode are handed to an optional [`Reconfigure`] hook.
pub struct EhSpiMaster<B> {
    bus: B,
    config: SpiConfig,
    reconfigure: Option<Reconfigure<B>>,
}

impl<B: SpiBus<u8>> EhSpiMaster<B> {
    /// Wrap a bus whose clock and mode are fixed by its own setup.
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            config: SpiConfig::default(),
            reconfigure: None,
        }
    }

    /// Wrap a bus and call `reconfigure` at the start of every transaction.
    pub fn with_reconfigure(bus: B, reconfigure: Reconfigure<B>) -> Self {
        Self {
            bus,
            config: SpiConfig::default(),
            reconfigure: Some(reconfigure),
        }
    }

    /// Configuration of the current or most recent transaction
    pub fn config(&self) -> &SpiConfig {
        &self.config
    }

    /// Give back the wrapped bus.
    pub fn release(self) -> B {
        self.bus
    }
}

fn bus_error<E: spi::Error>(e: E) -> HalError {
    HalError::Spi(e.kind())
}

impl<B: SpiBus<u8>> SpiMaster for EhSpiMaster<B> {
    fn begin_transaction(&mut self, config: &SpiConfig) -> HalResult<()> {
        if let Some(reconfigure) = self.reconfigure {
            let wire = SpiConfig {
                bit_order: BitOrder::MsbFirst,
                ..*config
            };
            reconfigure(&mut self.bus, &wire)?;
        }
        self.config = *config;
        Ok(())
    }

    fn transfer(&mut self, byte: u8) -> HalResult<u8> {
        let order = self.config.bit_order;
        let mut read = [0u8];
        self.bus
            .transfer(&mut read, &[order.apply(byte)])
            .map_err(bus_error)?;
        Ok(order.apply(read[0]))
    }

    fn write(&mut self, data: &[u8]) -> HalResult<()> {
        match self.config.bit_order {
            BitOrder::MsbFirst => self.bus.write(data).map_err(bus_error),
            BitOrder::LsbFirst => {
                for &byte in data {
                    self.bus.write(&[byte.reverse_bits()]).map_err(bus_error)?;
                }
                Ok(())
            }
        }
    }

    fn end_transaction(&mut self) -> HalResult<()> {
        self.bus.flush().map_err(bus_error)
    }
}
