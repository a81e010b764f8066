//! Common error types for HAL operations

use core::fmt;

use embedded_hal::{digital, spi};

/// HAL operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// Operation not supported by this implementation
    NotSupported,
    /// Hardware error occurred
    HardwareError,
    /// Error reported by an embedded-hal SPI bus
    Spi(spi::ErrorKind),
    /// Error reported by an embedded-hal digital pin
    Gpio(digital::ErrorKind),
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSupported => write!(f, "operation not supported"),
            Self::HardwareError => write!(f, "hardware error"),
            Self::Spi(kind) => write!(f, "spi bus error: {}", kind),
            Self::Gpio(kind) => write!(f, "gpio error: {}", kind),
        }
    }
}

impl From<spi::ErrorKind> for HalError {
    fn from(kind: spi::ErrorKind) -> Self {
        Self::Spi(kind)
    }
}

impl From<digital::ErrorKind> for HalError {
    fn from(kind: digital::ErrorKind) -> Self {
        Self::Gpio(kind)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Result type for HAL operations
pub type HalResult<T> = Result<T, HalError>;
