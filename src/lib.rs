//! PSK31 Transmit Modulator Firmware Library
//!
//! Real-time BPSK (PSK31) baseband modulator for an STM32G474-based SDR
//! transceiver. Text typed by the operator becomes a phase-continuous,
//! raised-cosine-shaped I/Q waveform, produced one sample per timer tick.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌──────────────┐   ┌─────────────┐
//! │ TxProducer   │──▶│ SymbolEncoder  │──▶│ PhaseShaper  │──▶│ next_sample │──▶ DAC
//! │ (text entry) │   │ (varicode)     │   │ (transitions)│   │ (shape tbl) │
//! └──────────────┘   └────────────────┘   └──────────────┘   └─────────────┘
//!     SPSC queue        1 per symbol        1 per symbol        1 per tick
//! ```
//!
//! Everything right of the queue runs inside the sample tick and does a
//! constant amount of work per call.
//!
//! # Example
//!
//! ```
//! use sdr_psk_tx::config::ModulatorConfig;
//! use sdr_psk_tx::psk::{queue, Modulator};
//!
//! let mut storage = queue::new_queue();
//! let (mut tx, rx) = queue::split(&mut storage);
//! tx.start();
//! tx.push_str("cq").unwrap();
//! tx.stop().unwrap();
//!
//! let mut modulator = Modulator::new(rx, ModulatorConfig::default());
//! let sample = modulator.next_sample();
//! assert!(sample.magnitude() <= 1.0);
//! ```

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// DAC output and sample tick for the STM32G474.
#[cfg(feature = "embedded")]
pub mod hal;

/// Digital Signal Processing
///
/// Pulse-shape tables.
pub mod dsp;

/// PSK31 transmit path
///
/// Queue, varicode encoder, phase/shape state machine and synthesizer.
pub mod psk;

/// Error types
pub mod error;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::error::{TxError, TxResult};
    pub use crate::psk::{CharacterSource, DeadlineMonitor, Modulator, TxConsumer, TxProducer};
    pub use crate::types::*;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
