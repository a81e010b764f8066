//! Driver errors

use core::fmt;

use hal::HalError;

/// Result type used throughout the driver
pub type ChainResult<T> = Result<T, ChainError>;

/// Error types for shift-register chain operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainError {
    /// Bit index is not covered by the chain
    BitOutOfRange {
        /// Requested bit index
        bit: usize,
        /// Number of addressable bits in the chain
        bit_count: usize,
    },
    /// Chain needs more buffer bytes than the driver was built with
    ChainTooLong {
        /// Buffer bytes the chain needs
        requested: usize,
        /// Buffer capacity of the driver
        capacity: usize,
    },
    /// Latch line or bus failure
    Hal(HalError),
}

impl From<HalError> for ChainError {
    fn from(err: HalError) -> Self {
        ChainError::Hal(err)
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::BitOutOfRange { bit, bit_count } => {
                write!(f, "Bit index {} out of range for {} bits", bit, bit_count)
            }
            ChainError::ChainTooLong {
                requested,
                capacity,
            } => write!(
                f,
                "Chain needs {} buffer bytes but capacity is {}",
                requested, capacity
            ),
            ChainError::Hal(err) => write!(f, "Hardware access failed: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ChainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChainError::Hal(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChainError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ChainError::BitOutOfRange { bit, bit_count } => {
                defmt::write!(fmt, "BitOutOfRange({}/{})", bit, bit_count)
            }
            ChainError::ChainTooLong {
                requested,
                capacity,
            } => defmt::write!(fmt, "ChainTooLong({}/{})", requested, capacity),
            ChainError::Hal(err) => defmt::write!(fmt, "Hal({})", err),
        }
    }
}
