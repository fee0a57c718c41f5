//! Hardware Abstraction Layer
//!
//! Safe wrappers over the STM32G474 peripherals the transmit path uses:
//! the DAC pair that carries I/Q and the sample-rate tick.

pub mod dac;
pub mod timer;
