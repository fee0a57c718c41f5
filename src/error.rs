//! Transmit path errors
//!
//! Only the producer side can fail; everything on the sample tick is total.

use core::fmt;

/// Errors returned when feeding the transmit queue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxError {
    /// The character area is full; the rejected byte is returned
    QueueFull(u8),
    /// A bulk load stopped early after `accepted` bytes
    Truncated {
        /// Bytes queued before the queue filled up
        accepted: usize,
    },
    /// No slot left for a keying request
    ControlFull,
}

impl fmt::Display for TxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull(byte) => write!(f, "tx queue full, rejected 0x{byte:02x}"),
            Self::Truncated { accepted } => {
                write!(f, "tx queue full after {accepted} bytes")
            }
            Self::ControlFull => write!(f, "no slot left for keying request"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TxError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::QueueFull(byte) => defmt::write!(f, "QueueFull({=u8:#x})", byte),
            Self::Truncated { accepted } => defmt::write!(f, "Truncated({})", accepted),
            Self::ControlFull => defmt::write!(f, "ControlFull"),
        }
    }
}

/// Result alias for producer-side operations
pub type TxResult<T> = Result<T, TxError>;
