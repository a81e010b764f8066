//! The shift-register chain driver

use hal::{GpioPin, HalResult, Level, PinMode, SpiConfig, SpiMaster};
use heapless::Vec;

use crate::config::ChainConfig;
use crate::error::{ChainError, ChainResult};

/// Smallest buffer ever allocated, whatever the chain length
pub const MIN_BUFFER_BYTES: usize = 4;

/// Buffer bytes needed for a chain of `chain_len_bytes`
pub const fn buffer_len_for(chain_len_bytes: usize) -> usize {
    if chain_len_bytes > MIN_BUFFER_BYTES {
        chain_len_bytes
    } else {
        MIN_BUFFER_BYTES
    }
}

/// Byte index and in-byte mask of chain bit `bit`.
///
/// Bit 0 is the most significant bit of byte 0, independent of the order the
/// bus shifts bits out in.
#[inline]
pub(crate) const fn locate(bit: usize) -> (usize, u8) {
    (bit / 8, 0b1000_0000 >> (bit % 8))
}

/// A chain of cascaded shift registers behind one latch line
///
/// The driver keeps an in-memory copy of every output and pushes it to the
/// chain on [`flush`](Self::flush). `N` is the buffer capacity in bytes.
pub struct ShiftRegisterChain<S, L, const N: usize = 32> {
    bus: S,
    latch: L,
    buffer: Vec<u8, N>,
    chain_len_bytes: usize,
    spi_config: SpiConfig,
    active_latch_level: Level,
    flush_on_write: bool,
}

impl<S, L> ShiftRegisterChain<S, L>
where
    S: SpiMaster,
    L: GpioPin,
{
    /// Create a driver with the default configuration and capacity.
    ///
    /// The latch line is made an output and driven to its idle level before
    /// this returns.
    pub fn new(bus: S, latch: L, chain_len_bytes: usize) -> ChainResult<Self> {
        Self::with_config(bus, latch, ChainConfig::new(chain_len_bytes))
    }
}

impl<S, L, const N: usize> ShiftRegisterChain<S, L, N>
where
    S: SpiMaster,
    L: GpioPin,
{
    /// Create a driver from an explicit configuration.
    pub fn with_config(bus: S, mut latch: L, config: ChainConfig) -> ChainResult<Self> {
        let len = buffer_len_for(config.chain_len_bytes);
        let mut buffer = Vec::new();
        buffer.resize(len, 0).map_err(|_| ChainError::ChainTooLong {
            requested: len,
            capacity: N,
        })?;

        latch.set_mode(PinMode::Output)?;
        latch.write(!config.active_latch_level)?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "shift chain: latch pin {}, {} bytes, {} Hz",
            latch.pin_number(),
            config.chain_len_bytes,
            config.max_clock_hz
        );

        Ok(Self {
            bus,
            latch,
            buffer,
            chain_len_bytes: config.chain_len_bytes,
            spi_config: config.spi_config(),
            active_latch_level: config.active_latch_level,
            flush_on_write: config.flush_on_write,
        })
    }

    /// Change the SPI clock used from the next flush on.
    pub fn set_max_clock_speed(&mut self, hz: u32) {
        self.spi_config.frequency = hz;
    }

    /// Change which latch level counts as asserted.
    ///
    /// The latch line is driven to the new idle level immediately. If that
    /// write fails the previous polarity is kept.
    pub fn set_active_latch_level(&mut self, level: Level) -> ChainResult<()> {
        self.latch.write(!level)?;
        self.active_latch_level = level;

        #[cfg(feature = "defmt")]
        defmt::debug!("shift chain: latch active level {}", level);

        Ok(())
    }

    /// Set whether [`set_bit_on`](Self::set_bit_on) and friends flush.
    pub fn set_default_flush_on_write(&mut self, enabled: bool) {
        self.flush_on_write = enabled;
    }

    /// Set `bit` to 1, flushing if the default says so.
    pub fn set_bit_on(&mut self, bit: usize) -> ChainResult<()> {
        self.set_bit_on_with(bit, self.flush_on_write)
    }

    /// Set `bit` to 1, flushing only if `flush` is true.
    pub fn set_bit_on_with(&mut self, bit: usize, flush: bool) -> ChainResult<()> {
        self.update(bit, flush, |byte, mask| *byte |= mask)
    }

    /// Clear `bit` to 0, flushing if the default says so.
    pub fn set_bit_off(&mut self, bit: usize) -> ChainResult<()> {
        self.set_bit_off_with(bit, self.flush_on_write)
    }

    /// Clear `bit` to 0, flushing only if `flush` is true.
    pub fn set_bit_off_with(&mut self, bit: usize, flush: bool) -> ChainResult<()> {
        self.update(bit, flush, |byte, mask| *byte &= !mask)
    }

    /// Flip `bit`, flushing if the default says so.
    pub fn toggle_bit(&mut self, bit: usize) -> ChainResult<()> {
        self.toggle_bit_with(bit, self.flush_on_write)
    }

    /// Flip `bit`, flushing only if `flush` is true.
    pub fn toggle_bit_with(&mut self, bit: usize, flush: bool) -> ChainResult<()> {
        self.update(bit, flush, |byte, mask| *byte ^= mask)
    }

    /// Set `bit` to `on`, flushing if the default says so.
    pub fn set_bit(&mut self, bit: usize, on: bool) -> ChainResult<()> {
        if on {
            self.set_bit_on(bit)
        } else {
            self.set_bit_off(bit)
        }
    }

    /// Clear every bit in the buffer. Does not flush.
    pub fn reset_all_bits(&mut self) {
        self.buffer.iter_mut().for_each(|byte| *byte = 0);
    }

    /// Push the buffer out to the chain and latch it.
    ///
    /// Inside one bus transaction the latch line goes to idle, the bytes are
    /// shifted out last byte first, and the latch is pulsed to its active
    /// level and back to idle. Byte 0 is shifted last so it lands in the first
    /// register of the chain.
    pub fn flush(&mut self) -> ChainResult<()> {
        shift_out(
            &mut self.bus,
            &mut self.latch,
            &self.spi_config,
            self.active_latch_level,
            &self.buffer[..self.chain_len_bytes],
        )?;

        #[cfg(feature = "defmt")]
        defmt::trace!("shift chain: flushed {} bytes", self.chain_len_bytes);

        Ok(())
    }

    fn update<F>(&mut self, bit: usize, flush: bool, op: F) -> ChainResult<()>
    where
        F: FnOnce(&mut u8, u8),
    {
        self.check(bit)?;
        let (index, mask) = locate(bit);
        op(&mut self.buffer[index], mask);
        if flush {
            self.flush()?;
        }
        Ok(())
    }
}

impl<S, L, const N: usize> ShiftRegisterChain<S, L, N> {
    /// Current state of `bit` in the buffer
    pub fn bit(&self, bit: usize) -> ChainResult<bool> {
        self.check(bit)?;
        let (index, mask) = locate(bit);
        Ok(self.buffer[index] & mask != 0)
    }

    /// The addressable bytes of the buffer, byte 0 first
    pub fn data(&self) -> &[u8] {
        &self.buffer[..self.chain_len_bytes]
    }

    /// Length of the allocated buffer, `max(4, chain_len_bytes)`
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn chain_len_bytes(&self) -> usize {
        self.chain_len_bytes
    }

    /// Number of addressable outputs
    pub fn bit_count(&self) -> usize {
        self.chain_len_bytes * 8
    }

    pub fn spi_config(&self) -> &SpiConfig {
        &self.spi_config
    }

    pub fn active_latch_level(&self) -> Level {
        self.active_latch_level
    }

    pub fn idle_latch_level(&self) -> Level {
        !self.active_latch_level
    }

    pub fn default_flush_on_write(&self) -> bool {
        self.flush_on_write
    }

    pub fn latch(&self) -> &L {
        &self.latch
    }

    pub fn bus(&self) -> &S {
        &self.bus
    }

    /// Give back the bus and the latch pin.
    pub fn release(self) -> (S, L) {
        (self.bus, self.latch)
    }

    fn check(&self, bit: usize) -> ChainResult<()> {
        let bit_count = self.bit_count();
        if bit < bit_count {
            Ok(())
        } else {
            Err(ChainError::BitOutOfRange { bit, bit_count })
        }
    }
}

/// Shift `data` out through `bus` in chain order and pulse `latch`.
///
/// Usable without a [`ShiftRegisterChain`] when the caller owns the buffer.
pub fn shift_out<S, L>(
    bus: &mut S,
    latch: &mut L,
    config: &SpiConfig,
    active: Level,
    data: &[u8],
) -> HalResult<()>
where
    S: SpiMaster,
    L: GpioPin,
{
    bus.transaction(config, |bus| {
        latch.write(!active)?;
        for &byte in data.iter().rev() {
            bus.transfer(byte)?;
        }
        latch.write(active)?;
        latch.write(!active)
    })
}
