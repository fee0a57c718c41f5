//! Phase/Shape State Machine
//!
//! Tracks the carrier phase and, once per symbol, picks the pair of
//! pulse-shape segments that moves I and Q from the current phase to the
//! phase the symbol asks for. [`transition`] is the only place that mapping
//! is defined; it is an exhaustive `match`, so a new symbol or phase cannot
//! be added without deciding every case.
//!
//! Every segment chosen from phase `p` starts on `p`'s levels and ends on the
//! next phase's levels, which keeps the waveform continuous across symbol
//! boundaries.

use crate::dsp::pulse_shape::Segment;
use crate::types::{Phase, Symbol};

/// Outcome of one symbol boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Trajectory for the in-phase channel
    pub i: Segment,
    /// Trajectory for the quadrature channel
    pub q: Segment,
    /// Phase at the end of the symbol
    pub next: Phase,
}

const fn t(i: Segment, q: Segment, next: Phase) -> Transition {
    Transition { i, q, next }
}

/// Transition table: (symbol, current phase) → (I segment, Q segment, next phase)
#[must_use]
pub const fn transition(symbol: Symbol, phase: Phase) -> Transition {
    use Phase::{Deg0, Deg180, Deg270, Deg90, Off};
    use Segment::{
        AttackToPositive, DecayFromNegative, DecayFromPositive, FallToNegative, HoldNegative,
        HoldPositive, RiseToPositive, Zero,
    };
    use Symbol::{CarrierOff, CarrierOn, NoPhaseChange, PhaseReverse};

    match (symbol, phase) {
        // Hold the carrier where it is
        (NoPhaseChange | CarrierOn, Deg0) => t(HoldPositive, Zero, Deg0),
        (NoPhaseChange | CarrierOn, Deg90) => t(Zero, HoldPositive, Deg90),
        (NoPhaseChange | CarrierOn, Deg180) => t(HoldNegative, Zero, Deg180),
        (NoPhaseChange | CarrierOn, Deg270) => t(Zero, HoldNegative, Deg270),

        // Swing through zero to the opposite phase
        (PhaseReverse, Deg0) => t(FallToNegative, Zero, Deg180),
        (PhaseReverse, Deg90) => t(Zero, FallToNegative, Deg270),
        (PhaseReverse, Deg180) => t(RiseToPositive, Zero, Deg0),
        (PhaseReverse, Deg270) => t(Zero, RiseToPositive, Deg90),

        // Ramp down and stay down
        (CarrierOff, Deg0) => t(DecayFromPositive, Zero, Off),
        (CarrierOff, Deg90) => t(Zero, DecayFromPositive, Off),
        (CarrierOff, Deg180) => t(DecayFromNegative, Zero, Off),
        (CarrierOff, Deg270) => t(Zero, DecayFromNegative, Off),

        // Only an explicit key-on brings the carrier back
        (CarrierOn, Off) => t(AttackToPositive, Zero, Deg0),
        (NoPhaseChange | PhaseReverse | CarrierOff, Off) => t(Zero, Zero, Off),
    }
}

/// Current phase and the segments being played out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseShaper {
    phase: Phase,
    i: Segment,
    q: Segment,
}

impl PhaseShaper {
    /// Start keyed off and silent
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Off,
            i: Segment::Zero,
            q: Segment::Zero,
        }
    }

    /// Resolve a symbol against the current phase and switch segments
    pub fn apply(&mut self, symbol: Symbol) -> Transition {
        let step = transition(symbol, self.phase);
        self.i = step.i;
        self.q = step.q;
        self.phase = step.next;
        step
    }

    /// Phase at the end of the current symbol
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Segments selected for the current symbol (I, Q)
    #[must_use]
    pub const fn segments(&self) -> (Segment, Segment) {
        (self.i, self.q)
    }

    /// Return to the keyed-off state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PhaseShaper {
    fn default() -> Self {
        Self::new()
    }
}
