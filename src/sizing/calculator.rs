//! Machine sizing - required machine counts for a daily output target
//!
//! The plant runs two shifts a day, so every machine is sized for the output
//! of one shift window: `daily_output / (2 * shift_hours)`. That value is
//! computed once per run and handed to each formula. Counts are always
//! rounded up; a line cannot run on 2.3 machines.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::sizing::composition::FULL_COMPOSITION;
use crate::sizing::parameters::{ParameterError, ProcessParameters};

/// Number of shifts the plant runs per day
pub const SHIFTS_PER_DAY: f64 = 2.0;

/// Hourly output required of one shift window
pub fn half_shift_output(daily_output: f64, shift_hours: f64) -> f64 {
    daily_output / (SHIFTS_PER_DAY * shift_hours)
}

/// Unrounded machine requirement
pub fn load_ratio(throughput: f64, capacity: f64) -> f64 {
    throughput / capacity
}

/// Whole machines needed to carry `throughput` at `capacity` per machine
pub fn required_machines(throughput: f64, capacity: f64) -> u64 {
    load_ratio(throughput, capacity).ceil() as u64
}

/// Dough throughput of one shift window
pub fn dough_output(half_shift_output: f64, dough_fraction: f64) -> f64 {
    half_shift_output * dough_fraction / FULL_COMPOSITION
}

/// Filling (meat, eggs, salt, spices) throughput of one shift window
pub fn filling_output(half_shift_output: f64, dough_fraction: f64) -> f64 {
    half_shift_output * (FULL_COMPOSITION - dough_fraction) / FULL_COMPOSITION
}

pub fn dumpling_machine_count(half_shift_output: f64, dumpling_capacity: f64) -> u64 {
    required_machines(half_shift_output, dumpling_capacity)
}

pub fn dough_kneader_count(half_shift_output: f64, dough_fraction: f64, kneader_capacity: f64) -> u64 {
    required_machines(dough_output(half_shift_output, dough_fraction), kneader_capacity)
}

pub fn cutter_count(half_shift_output: f64, dough_fraction: f64, cutter_capacity: f64) -> u64 {
    required_machines(filling_output(half_shift_output, dough_fraction), cutter_capacity)
}

/// Machine type on the line, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineKind {
    DumplingMachine,
    DoughKneader,
    Cutter,
}

impl MachineKind {
    pub fn all() -> &'static [MachineKind] {
        &[
            MachineKind::DumplingMachine,
            MachineKind::DoughKneader,
            MachineKind::Cutter,
        ]
    }

    /// Plural label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            MachineKind::DumplingMachine => "Dumpling machines",
            MachineKind::DoughKneader => "Dough kneaders",
            MachineKind::Cutter => "Cutters",
        }
    }
}

impl std::fmt::Display for MachineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MachineKind::DumplingMachine => write!(f, "dumpling_machine"),
            MachineKind::DoughKneader => write!(f, "dough_kneader"),
            MachineKind::Cutter => write!(f, "cutter"),
        }
    }
}

/// Sizing result for one machine type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineRequirement {
    pub kind: MachineKind,

    /// Mass per hour this machine group has to process
    pub throughput: f64,

    /// Mass per hour one machine processes
    pub capacity: f64,

    /// Unrounded machine requirement
    pub load_ratio: f64,

    /// Whole machines required
    pub count: u64,
}

/// Largest load ratio whose ceiling still fits a machine count
const MAX_LOAD_RATIO: f64 = u64::MAX as f64;

impl MachineRequirement {
    /// Pair a computed count with the figures it was derived from
    ///
    /// Fails when the ratio is not finite or its ceiling does not fit a `u64`;
    /// the count would otherwise saturate silently.
    fn new(
        kind: MachineKind,
        throughput: f64,
        capacity: f64,
        count: u64,
    ) -> Result<Self, SizingError> {
        let ratio = load_ratio(throughput, capacity);
        if !ratio.is_finite() || ratio.ceil() >= MAX_LOAD_RATIO {
            return Err(SizingError::Unbounded {
                kind,
                load_ratio: ratio,
            });
        }
        Ok(Self {
            kind,
            throughput,
            capacity,
            load_ratio: ratio,
            count,
        })
    }
}

/// The three machine counts alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineCounts {
    pub dumpling_machines: u64,
    pub dough_kneaders: u64,
    pub cutters: u64,
}

/// Complete result of a sizing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingReport {
    pub parameters: ProcessParameters,
    pub half_shift_output: f64,
    pub composition_total: f64,

    /// Dumpling machines, dough kneaders, cutters (in that order)
    pub machines: Vec<MachineRequirement>,
}

impl SizingReport {
    pub fn counts(&self) -> MachineCounts {
        let count_of = |kind: MachineKind| {
            self.machines
                .iter()
                .find(|m| m.kind == kind)
                .map(|m| m.count)
                .unwrap_or(0)
        };
        MachineCounts {
            dumpling_machines: count_of(MachineKind::DumplingMachine),
            dough_kneaders: count_of(MachineKind::DoughKneader),
            cutters: count_of(MachineKind::Cutter),
        }
    }

    /// Total number of machines on the line
    pub fn total_machines(&self) -> u64 {
        self.machines.iter().map(|m| m.count).sum()
    }
}

/// Why a sizing run produced no counts
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum SizingError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parameter(#[from] ParameterError),

    #[error("ingredient composition sums to {total}%, expected 100%")]
    #[diagnostic(
        code(linesizer::sizing::invalid_composition),
        help("dough, meat, eggs, salt and spices mass fractions must add up to 100")
    )]
    InvalidComposition { total: f64 },

    #[error("{kind} requirement is unbounded (load ratio {load_ratio})")]
    #[diagnostic(
        code(linesizer::sizing::unbounded),
        help("the output is too large or the capacity too small for a whole machine count")
    )]
    Unbounded { kind: MachineKind, load_ratio: f64 },
}

/// Size the line for one set of parameters
///
/// Bounds and composition are checked first; either all three requirements
/// are returned or none.
pub fn run(parameters: &ProcessParameters) -> Result<SizingReport, SizingError> {
    parameters.validate()?;

    let composition = parameters.composition();
    let composition_total = composition.total();
    if !composition.is_valid() {
        debug!(total = composition_total, "composition rejected");
        return Err(SizingError::InvalidComposition {
            total: composition_total,
        });
    }

    let half_shift = half_shift_output(parameters.daily_product_output, parameters.shift_duration);
    debug!(half_shift_output = half_shift, "computed half-shift output");

    let dough_fraction = parameters.dough_mass_fraction;
    let machines = vec![
        MachineRequirement::new(
            MachineKind::DumplingMachine,
            half_shift,
            parameters.dumpling_machine_capacity,
            dumpling_machine_count(half_shift, parameters.dumpling_machine_capacity),
        )?,
        MachineRequirement::new(
            MachineKind::DoughKneader,
            dough_output(half_shift, dough_fraction),
            parameters.dough_kneader_capacity,
            dough_kneader_count(half_shift, dough_fraction, parameters.dough_kneader_capacity),
        )?,
        MachineRequirement::new(
            MachineKind::Cutter,
            filling_output(half_shift, dough_fraction),
            parameters.cutter_capacity,
            cutter_count(half_shift, dough_fraction, parameters.cutter_capacity),
        )?,
    ];

    for machine in &machines {
        debug!(
            kind = %machine.kind,
            load_ratio = machine.load_ratio,
            count = machine.count,
            "sized machine group"
        );
    }

    Ok(SizingReport {
        parameters: *parameters,
        half_shift_output: half_shift,
        composition_total,
        machines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::parameters::ParameterField;

    fn plant() -> ProcessParameters {
        ProcessParameters {
            daily_product_output: 1000.0,
            shift_duration: 8.0,
            dumpling_machine_capacity: 50.0,
            dough_kneader_capacity: 15.0,
            cutter_capacity: 20.0,
            dough_mass_fraction: 40.0,
            meat_mass_fraction: 35.0,
            eggs_mass_fraction: 15.0,
            salt_mass_fraction: 3.0,
            spices_mass_fraction: 7.0,
        }
    }

    #[test]
    fn test_half_shift_output() {
        assert_eq!(half_shift_output(1000.0, 8.0), 62.5);
        assert_eq!(half_shift_output(1600.0, 8.0), 100.0);
    }

    #[test]
    fn test_reference_plant() {
        let half_shift = half_shift_output(1000.0, 8.0);
        assert_eq!(dumpling_machine_count(half_shift, 50.0), 2);
        assert_eq!(dough_output(half_shift, 40.0), 25.0);
        assert_eq!(dough_kneader_count(half_shift, 40.0, 15.0), 2);
        assert_eq!(filling_output(half_shift, 40.0), 37.5);
        assert_eq!(cutter_count(half_shift, 40.0, 20.0), 2);
    }

    #[test]
    fn test_exact_ratio_is_not_rounded_up() {
        // 1600 / 16 = 100 per hour, 100 / 50 = exactly 2 machines
        let half_shift = half_shift_output(1600.0, 8.0);
        assert_eq!(dumpling_machine_count(half_shift, 50.0), 2);
        // dough 40% of 100 = 40, 40 / 20 = exactly 2 kneaders
        assert_eq!(dough_kneader_count(half_shift, 40.0, 20.0), 2);
        // filling 60% of 100 = 60, 60 / 30 = exactly 2 cutters
        assert_eq!(cutter_count(half_shift, 40.0, 30.0), 2);
    }

    #[test]
    fn test_fractional_ratio_rounds_up() {
        assert_eq!(required_machines(100.0, 30.0), 4);
        assert_eq!(required_machines(100.5, 100.0), 2);
        assert_eq!(required_machines(0.001, 100.0), 1);
    }

    #[test]
    fn test_dough_fraction_boundaries() {
        let half_shift = half_shift_output(1000.0, 8.0);
        assert_eq!(dough_kneader_count(half_shift, 0.0, 15.0), 0);
        assert_eq!(cutter_count(half_shift, 100.0, 20.0), 0);
    }

    #[test]
    fn test_run_reference_plant() {
        let report = run(&plant()).unwrap();
        assert_eq!(report.half_shift_output, 62.5);
        assert_eq!(
            report.counts(),
            MachineCounts {
                dumpling_machines: 2,
                dough_kneaders: 2,
                cutters: 2,
            }
        );
        assert_eq!(report.total_machines(), 6);

        let kinds: Vec<_> = report.machines.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, MachineKind::all());
        assert_eq!(report.machines[0].load_ratio, 1.25);
    }

    #[test]
    fn test_run_is_repeatable() {
        let params = plant();
        assert_eq!(run(&params).unwrap(), run(&params).unwrap());
    }

    #[test]
    fn test_run_rejects_invalid_composition() {
        let params = ProcessParameters {
            dough_mass_fraction: 45.0,
            ..plant()
        };
        match run(&params) {
            Err(SizingError::InvalidComposition { total }) => {
                assert!((total - 105.0).abs() < 1e-9);
            }
            other => panic!("expected invalid composition, got {:?}", other),
        }
    }

    #[test]
    fn test_run_rejects_zero_capacity_before_composition() {
        let params = ProcessParameters {
            dough_kneader_capacity: 0.0,
            dough_mass_fraction: 45.0,
            ..plant()
        };
        match run(&params) {
            Err(SizingError::Parameter(err)) => {
                assert_eq!(err.field(), ParameterField::DoughKneaderCapacity);
            }
            other => panic!("expected parameter error, got {:?}", other),
        }
    }

    #[test]
    fn test_run_rejects_vanishing_capacity() {
        let params = ProcessParameters {
            dumpling_machine_capacity: 1e-310,
            ..plant()
        };
        match run(&params) {
            Err(SizingError::Unbounded { kind, load_ratio }) => {
                assert_eq!(kind, MachineKind::DumplingMachine);
                assert!(load_ratio.is_infinite());
            }
            other => panic!("expected unbounded requirement, got {:?}", other),
        }
    }

    #[test]
    fn test_run_rejects_count_beyond_u64() {
        let params = ProcessParameters {
            daily_product_output: 1e300,
            dumpling_machine_capacity: 1e-10,
            ..plant()
        };
        assert!(matches!(
            run(&params),
            Err(SizingError::Unbounded {
                kind: MachineKind::DumplingMachine,
                ..
            })
        ));

        // Finite ratio that still overflows a machine count
        let params = ProcessParameters {
            daily_product_output: 1e25,
            ..plant()
        };
        assert!(matches!(run(&params), Err(SizingError::Unbounded { .. })));
    }

    #[test]
    fn test_run_counts_match_named_formulas() {
        let params = ProcessParameters {
            daily_product_output: 2345.0,
            shift_duration: 7.5,
            ..plant()
        };
        let half_shift = half_shift_output(2345.0, 7.5);
        let counts = run(&params).unwrap().counts();
        assert_eq!(counts.dumpling_machines, dumpling_machine_count(half_shift, 50.0));
        assert_eq!(counts.dough_kneaders, dough_kneader_count(half_shift, 40.0, 15.0));
        assert_eq!(counts.cutters, cutter_count(half_shift, 40.0, 20.0));
    }

    #[test]
    fn test_all_dough_product_needs_no_cutters() {
        let params = ProcessParameters {
            dough_mass_fraction: 100.0,
            meat_mass_fraction: 0.0,
            eggs_mass_fraction: 0.0,
            salt_mass_fraction: 0.0,
            spices_mass_fraction: 0.0,
            ..plant()
        };
        let counts = run(&params).unwrap().counts();
        assert_eq!(counts.cutters, 0);
        assert_eq!(counts.dough_kneaders, 5);
    }
}
