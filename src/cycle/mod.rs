//! Cycle-accelerated simulation: detect when a deterministic state sequence
//! repeats and answer far-future steps from the recorded history.

pub mod accelerator;
pub mod descriptor;
pub mod run;
pub mod transition;

pub use accelerator::{
    Acceleration, AcceleratorConfig, CycleAccelerator, accelerate, accelerate_phased,
};
pub use descriptor::CycleDescriptor;
pub use run::SimulationRun;
pub use transition::{FnTransition, RoundRobin};

pub use crate::traits::Transition;
