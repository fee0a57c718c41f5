//! Shared types used across the transmit path
//!
//! Line-code symbols, carrier phase states and the I/Q sample pair that the
//! modulator hands to the DAC.

use fixed::types::I1F15;
#[cfg(feature = "embedded")]
#[allow(unused_imports)]
use micromath::F32Ext;

/// Line-code symbol, one per symbol period
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Keep the carrier phase (a varicode `1`)
    NoPhaseChange,
    /// Invert the carrier phase (a varicode `0`, separator or idle)
    PhaseReverse,
    /// Ramp the carrier down and hold it off
    CarrierOff,
    /// Bring the carrier up
    CarrierOn,
}

impl Symbol {
    /// All symbols, in table order
    pub const ALL: [Self; 4] = [
        Self::NoPhaseChange,
        Self::PhaseReverse,
        Self::CarrierOff,
        Self::CarrierOn,
    ];

    /// Line-code symbol for a varicode bit
    #[must_use]
    pub const fn from_bit(bit: bool) -> Self {
        if bit {
            Self::NoPhaseChange
        } else {
            Self::PhaseReverse
        }
    }

    /// Check if this symbol carries data (as opposed to keying)
    #[must_use]
    pub const fn is_data(self) -> bool {
        matches!(self, Self::NoPhaseChange | Self::PhaseReverse)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Symbol {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::NoPhaseChange => defmt::write!(f, "NC"),
            Self::PhaseReverse => defmt::write!(f, "P180"),
            Self::CarrierOff => defmt::write!(f, "OFF"),
            Self::CarrierOn => defmt::write!(f, "ON"),
        }
    }
}

/// Carrier phase state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// 0 degrees (I = +1)
    Deg0,
    /// 90 degrees (Q = +1)
    Deg90,
    /// 180 degrees (I = -1)
    Deg180,
    /// 270 degrees (Q = -1)
    Deg270,
    /// Carrier keyed off
    #[default]
    Off,
}

impl Phase {
    /// All phase states, in table order
    pub const ALL: [Self; 5] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270, Self::Off];

    /// Steady-state I/Q levels for this phase
    #[must_use]
    pub const fn levels(self) -> (f32, f32) {
        match self {
            Self::Deg0 => (1.0, 0.0),
            Self::Deg90 => (0.0, 1.0),
            Self::Deg180 => (-1.0, 0.0),
            Self::Deg270 => (0.0, -1.0),
            Self::Off => (0.0, 0.0),
        }
    }

    /// Check if the carrier is keyed
    #[must_use]
    pub const fn is_keyed(self) -> bool {
        !matches!(self, Self::Off)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Phase {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Deg0 => defmt::write!(f, "0°"),
            Self::Deg90 => defmt::write!(f, "90°"),
            Self::Deg180 => defmt::write!(f, "180°"),
            Self::Deg270 => defmt::write!(f, "270°"),
            Self::Off => defmt::write!(f, "OFF"),
        }
    }
}

/// IQ sample pair
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IqSample {
    /// In-phase component
    pub i: f32,
    /// Quadrature component
    pub q: f32,
}

impl IqSample {
    /// Silent sample
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new IQ sample
    #[must_use]
    pub const fn new(i: f32, q: f32) -> Self {
        Self { i, q }
    }

    /// Get magnitude
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        (self.i * self.i + self.q * self.q).sqrt()
    }

    /// Scale by a real factor
    #[must_use]
    pub fn scale(&self, factor: f32) -> Self {
        Self {
            i: self.i * factor,
            q: self.q * factor,
        }
    }

    /// Check if both components are exactly zero
    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.i == 0.0 && self.q == 0.0
    }

    /// Convert to Q1.15 fixed point, saturating at full scale
    #[must_use]
    pub fn to_q15(&self) -> (I1F15, I1F15) {
        (
            I1F15::saturating_from_num(self.i),
            I1F15::saturating_from_num(self.q),
        )
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for IqSample {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "IQ({}, {})", self.i, self.q);
    }
}

/// Item carried by the transmit queue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxItem {
    /// Character to encode
    Char(u8),
    /// Nothing queued; the encoder sends idle reversals
    Idle,
    /// Key the transmitter on
    ///
    /// The transmit queue raises key-on beside the ring instead; other
    /// sources may carry it in-band.
    CarrierOn,
    /// Key the transmitter off after the postamble
    CarrierOff,
}

#[cfg(feature = "embedded")]
impl defmt::Format for TxItem {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Char(c) => defmt::write!(f, "Char({=u8:#x})", c),
            Self::Idle => defmt::write!(f, "Idle"),
            Self::CarrierOn => defmt::write!(f, "CarrierOn"),
            Self::CarrierOff => defmt::write!(f, "CarrierOff"),
        }
    }
}
