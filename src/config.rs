//! System configuration and modulator constants
//!
//! Compile-time constants for the PSK31 transmit path and the hardware
//! that drives it. Runtime-tunable values live in [`ModulatorConfig`].

/// System clock frequency (STM32G474 @ 170MHz)
pub const SYSTEM_CLOCK_HZ: u32 = 170_000_000;

/// Transmit sample tick rate (8 kHz)
pub const SAMPLE_RATE_HZ: u32 = 8_000;

/// Sample ticks per line-code symbol
///
/// Also the length of every pulse-shape segment.
pub const SAMPLES_PER_SYMBOL: usize = 256;

/// Offset added to the sub-symbol counter when indexing a shape segment
///
/// With a bias of one the last sample of each symbol lands exactly on the
/// segment's end level.
pub const SHAPE_BIAS: usize = 1;

/// Characters the transmit queue holds
pub const TX_QUEUE_CAPACITY: usize = 26;

/// Slots reserved for keying requests on top of the character area
pub const TX_CONTROL_RESERVE: usize = 1;

/// Backing array length for the SPSC queue
///
/// `heapless::spsc::Queue<_, N>` stores at most `N - 1` items.
pub const TX_QUEUE_SLOTS: usize = TX_QUEUE_CAPACITY + TX_CONTROL_RESERVE + 1;

/// Phase reversals sent after keying on, before the first character
pub const PREAMBLE_SYMBOLS: u8 = 32;

/// Steady-carrier symbols sent before keying off
pub const POSTAMBLE_SYMBOLS: u8 = 32;

/// Character transmitted in place of bytes without a varicode entry
pub const FALLBACK_CHAR: u8 = b'?';

/// Default output amplitude (full scale is 1.0)
pub const DEFAULT_AMPLITUDE: f32 = 0.9;

/// Beacon text queued at power-on by the firmware binary
pub const BEACON_TEXT: &str = "CQ CQ de N0CALL N0CALL pse k\n";

/// Timer assignments
pub mod timers {
    //! Hardware timer assignments

    /// Sample tick timer (DAC trigger)
    pub const SAMPLE_TICK: u8 = 6;
}

/// DAC channel assignments
pub mod dac {
    //! DAC1 channel assignments for the baseband outputs

    /// In-phase output (PA4)
    pub const I_CHANNEL: u8 = 1;

    /// Quadrature output (PA5)
    pub const Q_CHANNEL: u8 = 2;
}

/// Symbol rate in hundredths of a baud (3125 = 31.25 Bd)
#[must_use]
pub const fn symbol_rate_centibaud() -> u32 {
    SAMPLE_RATE_HZ * 100 / SAMPLES_PER_SYMBOL as u32
}

/// Symbol rate in baud
#[must_use]
pub fn symbol_rate_baud() -> f32 {
    SAMPLE_RATE_HZ as f32 / SAMPLES_PER_SYMBOL as f32
}

/// Sample tick period in nanoseconds
#[must_use]
pub const fn sample_period_ns() -> u32 {
    1_000_000_000 / SAMPLE_RATE_HZ
}

/// Runtime modulator settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModulatorConfig {
    /// Output scale applied to both channels (clamped to 0.0..=1.0)
    pub amplitude: f32,
    /// Phase reversals after `CarrierOn`
    pub preamble_symbols: u8,
    /// Steady-carrier symbols before `CarrierOff`
    pub postamble_symbols: u8,
    /// Byte sent for characters outside the varicode table
    pub fallback_char: u8,
}

impl ModulatorConfig {
    /// Set the amplitude, clamping to the valid range
    #[must_use]
    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude.clamp(0.0, 1.0);
        self
    }

    /// Disable the preamble and postamble
    #[must_use]
    pub const fn without_framing(mut self) -> Self {
        self.preamble_symbols = 0;
        self.postamble_symbols = 0;
        self
    }
}

impl Default for ModulatorConfig {
    fn default() -> Self {
        Self {
            amplitude: DEFAULT_AMPLITUDE,
            preamble_symbols: PREAMBLE_SYMBOLS,
            postamble_symbols: POSTAMBLE_SYMBOLS,
            fallback_char: FALLBACK_CHAR,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ModulatorConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "ModulatorConfig(amp={}, pre={}, post={})",
            self.amplitude,
            self.preamble_symbols,
            self.postamble_symbols
        );
    }
}
