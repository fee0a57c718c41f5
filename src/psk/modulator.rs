//! Sample Synthesizer
//!
//! [`Modulator`] is the whole transmit context: encoder, phase/shape state,
//! sub-symbol counter and the character source. The sample-tick driver owns
//! it and calls [`Modulator::next_sample`] once per tick.
//!
//! Per call the work is two table reads and a counter increment. Every
//! `SAMPLES_PER_SYMBOL` calls the counter wraps and one symbol is pulled and
//! resolved through the transition table. Nothing in the call depends on the
//! length of the queued text.

use crate::config::{ModulatorConfig, SAMPLES_PER_SYMBOL, SHAPE_BIAS};
use crate::dsp::pulse_shape::Segment;
use crate::psk::encoder::SymbolEncoder;
use crate::psk::queue::CharacterSource;
use crate::psk::shaper::PhaseShaper;
use crate::types::{IqSample, Phase, Symbol};

/// Counters kept by the modulator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModulatorStats {
    /// Samples produced
    pub samples: u32,
    /// Symbols consumed
    pub symbols: u32,
    /// Characters loaded into the encoder
    pub characters: u32,
    /// Characters sent as the fallback code
    pub unmapped: u32,
}

#[cfg(feature = "embedded")]
impl defmt::Format for ModulatorStats {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "samples={} symbols={} chars={} unmapped={}",
            self.samples,
            self.symbols,
            self.characters,
            self.unmapped
        );
    }
}

/// Where the next sample will be read from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeCursor {
    /// In-phase segment
    pub i: Segment,
    /// Quadrature segment
    pub q: Segment,
    /// Offset into both segments
    pub offset: usize,
}

/// Real-time PSK31 modulator context
pub struct Modulator<S: CharacterSource> {
    source: S,
    encoder: SymbolEncoder,
    shaper: PhaseShaper,
    /// Sub-symbol counter, 0..SAMPLES_PER_SYMBOL
    ramp: usize,
    amplitude: f32,
    samples: u32,
    symbols: u32,
    last_symbol: Option<Symbol>,
}

impl<S: CharacterSource> Modulator<S> {
    /// Create a modulator pulling from `source`, keyed off
    #[must_use]
    pub fn new(source: S, config: ModulatorConfig) -> Self {
        Self {
            source,
            encoder: SymbolEncoder::new(&config),
            shaper: PhaseShaper::new(),
            ramp: 0,
            amplitude: config.amplitude.clamp(0.0, 1.0),
            samples: 0,
            symbols: 0,
            last_symbol: None,
        }
    }

    /// Produce the sample for this tick
    ///
    /// Must be called once per sample period; never blocks.
    #[inline]
    pub fn next_sample(&mut self) -> IqSample {
        let (i_seg, q_seg) = self.shaper.segments();
        let offset = self.ramp + SHAPE_BIAS;
        let sample = IqSample::new(
            i_seg.level(offset) * self.amplitude,
            q_seg.level(offset) * self.amplitude,
        );

        self.samples = self.samples.wrapping_add(1);
        self.ramp += 1;
        if self.ramp >= SAMPLES_PER_SYMBOL {
            self.ramp = 0;
            self.advance_symbol();
        }

        sample
    }

    /// Fill `out` with consecutive samples
    pub fn fill(&mut self, out: &mut [IqSample]) {
        for slot in out {
            *slot = self.next_sample();
        }
    }

    fn advance_symbol(&mut self) {
        let symbol = self.encoder.next_symbol(&mut self.source);
        self.shaper.apply(symbol);
        self.symbols = self.symbols.wrapping_add(1);
        self.last_symbol = Some(symbol);
    }

    /// Segments and offset the next call will read
    #[must_use]
    pub fn cursor(&self) -> ShapeCursor {
        let (i, q) = self.shaper.segments();
        ShapeCursor {
            i,
            q,
            offset: self.ramp + SHAPE_BIAS,
        }
    }

    /// Phase the carrier is heading to in the current symbol
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.shaper.phase()
    }

    /// Most recent symbol consumed
    #[must_use]
    pub fn last_symbol(&self) -> Option<Symbol> {
        self.last_symbol
    }

    /// Sub-symbol counter
    #[must_use]
    pub fn ramp(&self) -> usize {
        self.ramp
    }

    /// Check if the carrier is keyed or still ramping down
    #[must_use]
    pub fn is_keyed(&self) -> bool {
        self.shaper.phase().is_keyed() || self.shaper.segments() != (Segment::Zero, Segment::Zero)
    }

    /// Snapshot of the counters
    #[must_use]
    pub fn stats(&self) -> ModulatorStats {
        ModulatorStats {
            samples: self.samples,
            symbols: self.symbols,
            characters: self.encoder.characters(),
            unmapped: self.encoder.unmapped(),
        }
    }

    /// Set the output amplitude (clamped to 0.0..=1.0)
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.amplitude = amplitude.clamp(0.0, 1.0);
    }

    /// Output amplitude
    #[must_use]
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Encoder state, for inspection
    #[must_use]
    pub fn encoder(&self) -> &SymbolEncoder {
        &self.encoder
    }

    /// Character source
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Character source, mutable
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Drop everything in flight and return to the silent keyed-off state
    ///
    /// Queued characters stay in the source.
    pub fn reset(&mut self) {
        self.encoder.reset();
        self.shaper.reset();
        self.ramp = 0;
        self.last_symbol = None;
    }

    /// Take the source back
    pub fn into_source(self) -> S {
        self.source
    }
}
