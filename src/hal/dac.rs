//! DAC Driver
//!
//! Drives the I and Q baseband outputs from DAC1 channels 1 and 2.

use embassy_stm32::dac::{DacChannel, Instance, Value};

use crate::types::IqSample;

/// One 12-bit DAC code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DacSample {
    /// 12-bit DAC value (0-4095)
    value: u16,
}

impl DacSample {
    /// Mid-scale code, the zero level of a bipolar signal
    pub const MID_SCALE: Self = Self { value: 2048 };

    /// Create from raw 12-bit value
    #[must_use]
    pub const fn from_raw(value: u16) -> Self {
        Self {
            value: if value > 4095 { 4095 } else { value },
        }
    }

    /// Create from a signed level (-1.0 to 1.0)
    #[must_use]
    pub fn from_level(level: f32) -> Self {
        let clamped = level.clamp(-1.0, 1.0);
        let raw = ((clamped + 1.0) * 2047.5) as u16;
        Self::from_raw(raw)
    }

    /// Get the raw 12-bit value
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.value
    }

    /// Convert to embassy DAC value
    #[must_use]
    pub const fn as_dac_value(self) -> Value {
        Value::Bit12Right(self.value)
    }
}

impl Default for DacSample {
    fn default() -> Self {
        Self::MID_SCALE
    }
}

impl defmt::Format for DacSample {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "DAC({})", self.value);
    }
}

/// Two-channel baseband output
pub struct IqDac<'d, T: Instance> {
    i: DacChannel<'d, T, 1>,
    q: DacChannel<'d, T, 2>,
}

impl<'d, T: Instance> IqDac<'d, T> {
    /// Take both channels and park them at mid-scale
    #[must_use]
    pub fn new(mut i: DacChannel<'d, T, 1>, mut q: DacChannel<'d, T, 2>) -> Self {
        i.set(DacSample::MID_SCALE.as_dac_value());
        q.set(DacSample::MID_SCALE.as_dac_value());
        i.enable();
        q.enable();
        Self { i, q }
    }

    /// Write one I/Q pair
    #[inline]
    pub fn write(&mut self, sample: IqSample) {
        self.i.set(DacSample::from_level(sample.i).as_dac_value());
        self.q.set(DacSample::from_level(sample.q).as_dac_value());
    }

    /// Park both outputs at mid-scale
    pub fn mute(&mut self) {
        self.write(IqSample::ZERO);
    }
}
