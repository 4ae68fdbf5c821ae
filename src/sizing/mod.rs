//! Sizing module - process parameters, composition check, machine counts

pub mod calculator;
pub mod composition;
pub mod parameters;

pub use calculator::{
    cutter_count, dough_kneader_count, dumpling_machine_count, half_shift_output, run,
    MachineCounts, MachineKind, MachineRequirement, SizingError, SizingReport,
};
pub use composition::{is_valid, Composition};
pub use parameters::{ParameterError, ParameterField, ProcessParameters, UnitKind};
