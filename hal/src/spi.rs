//! SPI (Serial Peripheral Interface) abstraction

use embedded_hal::spi::{Mode, MODE_0, MODE_1, MODE_2, MODE_3};

use crate::error::HalResult;

/// SPI mode (clock polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiMode {
    /// CPOL=0, CPHA=0
    Mode0,
    /// CPOL=0, CPHA=1
    Mode1,
    /// CPOL=1, CPHA=0
    Mode2,
    /// CPOL=1, CPHA=1
    Mode3,
}

impl From<SpiMode> for Mode {
    fn from(mode: SpiMode) -> Self {
        match mode {
            SpiMode::Mode0 => MODE_0,
            SpiMode::Mode1 => MODE_1,
            SpiMode::Mode2 => MODE_2,
            SpiMode::Mode3 => MODE_3,
        }
    }
}

/// SPI bit order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    MsbFirst,
    LsbFirst,
}

impl BitOrder {
    /// Reorders `byte` so that an MSB-first shifter puts it on the wire in
    /// this order.
    pub const fn apply(self, byte: u8) -> u8 {
        match self {
            BitOrder::MsbFirst => byte,
            BitOrder::LsbFirst => byte.reverse_bits(),
        }
    }
}

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Maximum clock frequency in Hz
    pub frequency: u32,
    pub mode: SpiMode,
    pub bit_order: BitOrder,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 1_000_000, // 1 MHz
            mode: SpiMode::Mode0,
            bit_order: BitOrder::MsbFirst,
        }
    }
}

/// SPI master trait
///
/// A transaction claims the bus with a given configuration. Everything
/// between [`SpiMaster::begin_transaction`] and [`SpiMaster::end_transaction`]
/// is clocked with that configuration.
pub trait SpiMaster {
    /// Claim the bus and apply `config`
    fn begin_transaction(&mut self, config: &SpiConfig) -> HalResult<()>;

    /// Transfer one byte (full duplex), returning the byte clocked in
    fn transfer(&mut self, byte: u8) -> HalResult<u8>;

    /// Write-only transfer
    fn write(&mut self, data: &[u8]) -> HalResult<()> {
        for &byte in data {
            self.transfer(byte)?;
        }
        Ok(())
    }

    /// Release the bus
    fn end_transaction(&mut self) -> HalResult<()>;

    /// Run `f` inside a transaction.
    ///
    /// The transaction is ended even when `f` fails. The error from `f` takes
    /// precedence over an error from ending the transaction.
    fn transaction<F, R>(&mut self, config: &SpiConfig, f: F) -> HalResult<R>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> HalResult<R>,
    {
        self.begin_transaction(config)?;
        let result = f(self);
        let end = self.end_transaction();
        let value = result?;
        end?;
        Ok(value)
    }
}

impl<S: SpiMaster + ?Sized> SpiMaster for &mut S {
    fn begin_transaction(&mut self, config: &SpiConfig) -> HalResult<()> {
        (**self).begin_transaction(config)
    }

    fn transfer(&mut self, byte: u8) -> HalResult<u8> {
        (**self).transfer(byte)
    }

    fn write(&mut self, data: &[u8]) -> HalResult<()> {
        (**self).write(data)
    }

    fn end_transaction(&mut self) -> HalResult<()> {
        (**self).end_transaction()
    }
}
