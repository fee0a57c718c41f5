//! PSK31 Transmit Path
//!
//! Character queue → varicode symbol encoder → phase/shape state machine →
//! sample synthesizer. Everything downstream of the queue runs on the
//! sample tick.

pub mod deadline;
pub mod encoder;
pub mod modulator;
pub mod queue;
pub mod shaper;
pub mod varicode;

pub use deadline::{DeadlineMonitor, TickGuard};
pub use encoder::SymbolEncoder;
pub use modulator::{Modulator, ModulatorStats, ShapeCursor};
pub use queue::{CharacterSource, TxConsumer, TxProducer, TxQueue};
pub use shaper::{transition, PhaseShaper, Transition};
pub use varicode::{VaricodeEntry, VARICODE_TABLE};
