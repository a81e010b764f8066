//! Construction-time configuration

use hal::{BitOrder, Level, SpiConfig, SpiMode};

/// Default maximum SPI clock (4 MHz)
pub const DEFAULT_CLOCK_HZ: u32 = 4_000_000;

/// Settings a [`ShiftRegisterChain`](crate::ShiftRegisterChain) is built with.
///
/// Bit order and SPI mode can only be chosen here; they follow the board
/// wiring and stay fixed for the life of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChainConfig {
    /// Bytes of serial data needed to cover every output of the chain
    pub chain_len_bytes: usize,
    /// Maximum SPI clock in Hz
    pub max_clock_hz: u32,
    /// Order in which each byte's bits go onto the wire
    pub bit_order: BitOrder,
    /// Clock polarity and phase
    pub mode: SpiMode,
    /// Latch level that counts as asserted; idle is its complement
    pub active_latch_level: Level,
    /// Whether bit mutators flush unless told otherwise
    pub flush_on_write: bool,
}

impl ChainConfig {
    /// Defaults for a chain of `chain_len_bytes` bytes: 4 MHz, LSB first,
    /// mode 0, latch active low, flush on every write.
    pub const fn new(chain_len_bytes: usize) -> Self {
        Self {
            chain_len_bytes,
            max_clock_hz: DEFAULT_CLOCK_HZ,
            bit_order: BitOrder::LsbFirst,
            mode: SpiMode::Mode0,
            active_latch_level: Level::Low,
            flush_on_write: true,
        }
    }

    pub const fn max_clock_hz(mut self, hz: u32) -> Self {
        self.max_clock_hz = hz;
        self
    }

    pub const fn bit_order(mut self, order: BitOrder) -> Self {
        self.bit_order = order;
        self
    }

    pub const fn mode(mut self, mode: SpiMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn active_latch_level(mut self, level: Level) -> Self {
        self.active_latch_level = level;
        self
    }

    pub const fn flush_on_write(mut self, enabled: bool) -> Self {
        self.flush_on_write = enabled;
        self
    }

    /// Bus settings used for every flush
    pub const fn spi_config(&self) -> SpiConfig {
        SpiConfig {
            frequency: self.max_clock_hz,
            mode: self.mode,
            bit_order: self.bit_order,
        }
    }
}
