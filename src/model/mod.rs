//! # Record Model
//!
//! Nested representation of a device record: reference data, a device
//! summary, an ordered [`LayerStack`] where every [`Layer`] carries its own
//! composition and multi-step [`Synthesis`], and the measured performance.
//!
//! All types serialize with serde. Absent values are skipped on output and
//! defaulted on input, so a JSON document only holds what was known.

mod chemical;
mod layer;
mod measurement;
mod record;
mod synthesis;

pub use chemical::{Additive, QuenchingSolvent, ReactionComponent, Solvent};
pub use layer::{Absorber, Composition, Functionality, IonShare, Layer, Storage};
pub use measurement::{EqeResult, JvResult, PerformedMeasurements, StabilisedPerformance};
pub use record::{General, LayerStack, Record, Reference};
pub use synthesis::{
    Cleaning, GasPhaseSynthesis, LiquidSynthesis, ProcessingStep, SolventAnnealing, StepDetails,
    Synthesis,
};
