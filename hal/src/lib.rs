//! Hardware Abstraction Layer (HAL) for shift-register chains
//!
//! Vendor-agnostic traits for the two peripherals a serially cascaded
//! shift-register chain needs: a digital output line for the latch and a
//! transactional SPI master for the data. Adapters for `embedded-hal` 1.0
//! pins and buses live in [`embedded`].

#![cfg_attr(not(feature = "std"), no_std)]

pub mod embedded;
pub mod error;
pub mod gpio;
pub mod spi;

// Re-export commonly used types
pub use error::{HalError, HalResult};
pub use gpio::{GpioPin, Level, PinMode};
pub use spi::{BitOrder, SpiConfig, SpiMaster, SpiMode};
