//! Pulse-Shape Table
//!
//! Eight precomputed amplitude trajectories, one per kind of transition a
//! single channel can make over one symbol period. Each segment holds
//! `SAMPLES_PER_SYMBOL + 1` points: offset 0 is the level the segment starts
//! from, offset `SAMPLES_PER_SYMBOL` the level it ends on. The table is
//! generated by `build.rs` with raised-cosine transitions.

use crate::config::SAMPLES_PER_SYMBOL;

include!(concat!(env!("OUT_DIR"), "/pulse_shape_table.rs"));

/// Points per segment
pub const SEGMENT_POINTS: usize = SAMPLES_PER_SYMBOL + 1;

/// One channel's trajectory over a symbol period
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Segment {
    /// Held at 0
    #[default]
    Zero,
    /// Held at +1
    HoldPositive,
    /// Held at -1
    HoldNegative,
    /// +1 to -1
    FallToNegative,
    /// -1 to +1
    RiseToPositive,
    /// +1 to 0
    DecayFromPositive,
    /// -1 to 0
    DecayFromNegative,
    /// 0 to +1
    AttackToPositive,
}

impl Segment {
    /// All segments, in table order
    pub const ALL: [Self; 8] = [
        Self::Zero,
        Self::HoldPositive,
        Self::HoldNegative,
        Self::FallToNegative,
        Self::RiseToPositive,
        Self::DecayFromPositive,
        Self::DecayFromNegative,
        Self::AttackToPositive,
    ];

    /// Row of this segment in the shape table
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::HoldPositive => 1,
            Self::HoldNegative => 2,
            Self::FallToNegative => 3,
            Self::RiseToPositive => 4,
            Self::DecayFromPositive => 5,
            Self::DecayFromNegative => 6,
            Self::AttackToPositive => 7,
        }
    }

    /// Level at `offset`; offsets past the end read the end level
    #[inline]
    #[must_use]
    pub fn level(self, offset: usize) -> f32 {
        let row = &SHAPE_TABLE[self.index()];
        row[offset.min(SAMPLES_PER_SYMBOL)]
    }

    /// Level the segment starts from
    #[must_use]
    pub fn start(self) -> f32 {
        self.level(0)
    }

    /// Level the segment ends on
    #[must_use]
    pub fn end(self) -> f32 {
        self.level(SAMPLES_PER_SYMBOL)
    }

    /// Full row of the table, for inspection
    #[must_use]
    pub fn points(self) -> &'static [f32; SEGMENT_POINTS] {
        &SHAPE_TABLE[self.index()]
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Segment {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Zero => defmt::write!(f, "0"),
            Self::HoldPositive => defmt::write!(f, "+1"),
            Self::HoldNegative => defmt::write!(f, "-1"),
            Self::FallToNegative => defmt::write!(f, "+1→-1"),
            Self::RiseToPositive => defmt::write!(f, "-1→+1"),
            Self::DecayFromPositive => defmt::write!(f, "+1→0"),
            Self::DecayFromNegative => defmt::write!(f, "-1→0"),
            Self::AttackToPositive => defmt::write!(f, "0→+1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_one_row_per_segment() {
        assert_eq!(SHAPE_TABLE.len(), Segment::ALL.len());
        for (row, segment) in Segment::ALL.iter().enumerate() {
            assert_eq!(segment.index(), row);
        }
    }

    #[test]
    fn end_points_are_exact() {
        let expected = [
            (0.0, 0.0),
            (1.0, 1.0),
            (-1.0, -1.0),
            (1.0, -1.0),
            (-1.0, 1.0),
            (1.0, 0.0),
            (-1.0, 0.0),
            (0.0, 1.0),
        ];
        for (segment, (start, end)) in Segment::ALL.iter().zip(expected) {
            assert_eq!(segment.start(), start, "{segment:?} start");
            assert_eq!(segment.end(), end, "{segment:?} end");
        }
    }

    #[test]
    fn transitions_are_monotonic() {
        for segment in [Segment::FallToNegative, Segment::DecayFromPositive] {
            let points = segment.points();
            assert!(points.windows(2).all(|w| w[1] <= w[0]), "{segment:?}");
        }
        for segment in [
            Segment::RiseToPositive,
            Segment::DecayFromNegative,
            Segment::AttackToPositive,
        ] {
            let points = segment.points();
            assert!(points.windows(2).all(|w| w[1] >= w[0]), "{segment:?}");
        }
    }

    #[test]
    fn transition_crosses_zero_at_midpoint() {
        let mid = SAMPLES_PER_SYMBOL / 2;
        assert!(Segment::FallToNegative.level(mid).abs() < 1e-6);
        assert!((Segment::DecayFromPositive.level(mid) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn level_clamps_past_end() {
        assert_eq!(Segment::AttackToPositive.level(10_000), 1.0);
    }
}
