//! Process parameters - the input record of a sizing run
//!
//! A `ProcessParameters` value is built once from the parameter file, checked
//! once, and never mutated afterwards.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sizing::composition::{Composition, FULL_COMPOSITION};

/// Unit kind of a parameter, used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Mass per day
    MassPerDay,
    /// Hours
    Hours,
    /// Mass per hour
    MassPerHour,
    /// Percent of finished product mass
    Percent,
}

impl UnitKind {
    /// Render the unit with the configured mass unit (e.g. "kg")
    pub fn render(&self, mass_unit: &str) -> String {
        match self {
            UnitKind::MassPerDay => format!("{}/day", mass_unit),
            UnitKind::Hours => "h".to_string(),
            UnitKind::MassPerHour => format!("{}/h", mass_unit),
            UnitKind::Percent => "%".to_string(),
        }
    }
}

/// One of the ten named parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterField {
    DailyProductOutput,
    ShiftDuration,
    DumplingMachineCapacity,
    DoughMassFraction,
    DoughKneaderCapacity,
    CutterCapacity,
    MeatMassFraction,
    EggsMassFraction,
    SaltMassFraction,
    SpicesMassFraction,
}

impl ParameterField {
    /// All fields in reporting order
    pub fn all() -> &'static [ParameterField] {
        &[
            ParameterField::DailyProductOutput,
            ParameterField::ShiftDuration,
            ParameterField::DumplingMachineCapacity,
            ParameterField::DoughMassFraction,
            ParameterField::DoughKneaderCapacity,
            ParameterField::CutterCapacity,
            ParameterField::MeatMassFraction,
            ParameterField::EggsMassFraction,
            ParameterField::SaltMassFraction,
            ParameterField::SpicesMassFraction,
        ]
    }

    /// Key of the field in a parameter file
    pub fn key(&self) -> &'static str {
        match self {
            ParameterField::DailyProductOutput => "daily_product_output",
            ParameterField::ShiftDuration => "shift_duration",
            ParameterField::DumplingMachineCapacity => "dumpling_machine_capacity",
            ParameterField::DoughMassFraction => "dough_mass_fraction",
            ParameterField::DoughKneaderCapacity => "dough_kneader_capacity",
            ParameterField::CutterCapacity => "cutter_capacity",
            ParameterField::MeatMassFraction => "meat_mass_fraction",
            ParameterField::EggsMassFraction => "eggs_mass_fraction",
            ParameterField::SaltMassFraction => "salt_mass_fraction",
            ParameterField::SpicesMassFraction => "spices_mass_fraction",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ParameterField::DailyProductOutput => "Daily product output",
            ParameterField::ShiftDuration => "Shift duration",
            ParameterField::DumplingMachineCapacity => "Dumpling machine capacity",
            ParameterField::DoughMassFraction => "Dough mass fraction",
            ParameterField::DoughKneaderCapacity => "Dough kneader capacity",
            ParameterField::CutterCapacity => "Cutter capacity",
            ParameterField::MeatMassFraction => "Meat mass fraction",
            ParameterField::EggsMassFraction => "Eggs mass fraction",
            ParameterField::SaltMassFraction => "Salt mass fraction",
            ParameterField::SpicesMassFraction => "Spices mass fraction",
        }
    }

    pub fn unit(&self) -> UnitKind {
        match self {
            ParameterField::DailyProductOutput => UnitKind::MassPerDay,
            ParameterField::ShiftDuration => UnitKind::Hours,
            ParameterField::DumplingMachineCapacity
            | ParameterField::DoughKneaderCapacity
            | ParameterField::CutterCapacity => UnitKind::MassPerHour,
            ParameterField::DoughMassFraction
            | ParameterField::MeatMassFraction
            | ParameterField::EggsMassFraction
            | ParameterField::SaltMassFraction
            | ParameterField::SpicesMassFraction => UnitKind::Percent,
        }
    }

    /// Is this one of the five mass fractions?
    pub fn is_fraction(&self) -> bool {
        self.unit() == UnitKind::Percent
    }

    /// Check a single value against this field's bounds
    pub fn check(self, value: f64) -> Result<(), ParameterError> {
        if !value.is_finite() {
            return Err(ParameterError::NotFinite { field: self, value });
        }
        if self.is_fraction() {
            if !(0.0..=FULL_COMPOSITION).contains(&value) {
                return Err(ParameterError::FractionOutOfRange { field: self, value });
            }
        } else if value <= 0.0 {
            return Err(ParameterError::NonPositive { field: self, value });
        }
        Ok(())
    }
}

impl std::fmt::Display for ParameterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Out-of-bounds parameter value
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ParameterError {
    #[error("{field} must be a finite number, got {value}")]
    #[diagnostic(code(linesizer::sizing::not_finite))]
    NotFinite { field: ParameterField, value: f64 },

    #[error("{field} must be strictly positive, got {value}")]
    #[diagnostic(
        code(linesizer::sizing::non_positive),
        help("outputs, shift durations and machine capacities must be greater than zero")
    )]
    NonPositive { field: ParameterField, value: f64 },

    #[error("{field} must be between 0 and 100 percent, got {value}")]
    #[diagnostic(code(linesizer::sizing::fraction_out_of_range))]
    FractionOutOfRange { field: ParameterField, value: f64 },
}

impl ParameterError {
    /// The field that failed the check
    pub fn field(&self) -> ParameterField {
        match self {
            ParameterError::NotFinite { field, .. }
            | ParameterError::NonPositive { field, .. }
            | ParameterError::FractionOutOfRange { field, .. } => *field,
        }
    }
}

/// Input record of a sizing run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessParameters {
    /// Daily output of finished product (mass/day)
    pub daily_product_output: f64,

    /// Duration of one working shift (hours)
    pub shift_duration: f64,

    /// Throughput of one dumpling-forming machine (mass/hour)
    pub dumpling_machine_capacity: f64,

    /// Throughput of one dough kneader (mass/hour)
    pub dough_kneader_capacity: f64,

    /// Throughput of one cutter (mass/hour)
    pub cutter_capacity: f64,

    /// Dough share of finished product (%)
    pub dough_mass_fraction: f64,

    /// Meat share of finished product (%)
    pub meat_mass_fraction: f64,

    /// Eggs share of finished product (%)
    pub eggs_mass_fraction: f64,

    /// Salt share of finished product (%)
    pub salt_mass_fraction: f64,

    /// Spices share of finished product (%)
    pub spices_mass_fraction: f64,
}

impl ProcessParameters {
    /// Value of a field by name
    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::DailyProductOutput => self.daily_product_output,
            ParameterField::ShiftDuration => self.shift_duration,
            ParameterField::DumplingMachineCapacity => self.dumpling_machine_capacity,
            ParameterField::DoughMassFraction => self.dough_mass_fraction,
            ParameterField::DoughKneaderCapacity => self.dough_kneader_capacity,
            ParameterField::CutterCapacity => self.cutter_capacity,
            ParameterField::MeatMassFraction => self.meat_mass_fraction,
            ParameterField::EggsMassFraction => self.eggs_mass_fraction,
            ParameterField::SaltMassFraction => self.salt_mass_fraction,
            ParameterField::SpicesMassFraction => self.spices_mass_fraction,
        }
    }

    /// Field/value pairs in reporting order
    pub fn entries(&self) -> impl Iterator<Item = (ParameterField, f64)> + '_ {
        ParameterField::all().iter().map(move |f| (*f, self.get(*f)))
    }

    pub fn composition(&self) -> Composition {
        Composition {
            dough: self.dough_mass_fraction,
            meat: self.meat_mass_fraction,
            eggs: self.eggs_mass_fraction,
            salt: self.salt_mass_fraction,
            spices: self.spices_mass_fraction,
        }
    }

    /// Check every field against its bounds, stopping at the first violation
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.entries().try_for_each(|(field, value)| field.check(value))
    }
}
