//! Digital Signal Processing
//!
//! Signal-shaping data for the transmit path:
//! - Raised-cosine pulse-shape segments for PSK31 symbol transitions

pub mod pulse_shape;
