#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # SPI Shift Chain
//!
//! Driver for serially cascaded shift-register output devices (74HC595 and
//! friends) clocked over SPI and latched with a dedicated output line.
//!
//! The driver mirrors every output bit in memory. Bit mutators change that
//! mirror and, by default, flush it to the hardware straight away; a flush
//! shifts the whole chain out inside one bus transaction and pulses the
//! latch so all outputs change together.
//!
//! Bit 0 is the first output of the first register in the chain.
//!
//! ```ignore
//! use spi_shift_chain::ShiftRegisterChain;
//!
//! let mut chain = ShiftRegisterChain::new(spi, latch, 2)?;
//! chain.set_bit_on_with(0, false)?;
//! chain.set_bit_on_with(15, false)?;
//! chain.flush()?;
//! assert_eq!(chain.data(), &[0x80, 0x01]);
//! ```

pub mod chain;
pub mod config;
pub mod error;
pub mod shared;

pub use chain::{buffer_len_for, shift_out, ShiftRegisterChain, MIN_BUFFER_BYTES};
pub use config::{ChainConfig, DEFAULT_CLOCK_HZ};
pub use error::{ChainError, ChainResult};
pub use shared::SharedChain;

// Re-export the HAL so users need only one dependency
pub use hal;


/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
