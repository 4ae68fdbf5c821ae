//! linesizer: production-line sizing for dumpling plants
//!
//! Computes how many dumpling-forming machines, dough kneaders and cutters
//! a plant needs to meet a daily output target. The arithmetic lives in
//! [`sizing`]; [`core`] loads parameter files and configuration.
//!
//! ```
//! use linesizer::sizing::{self, ProcessParameters};
//!
//! let parameters = ProcessParameters {
//!     daily_product_output: 1000.0,
//!     shift_duration: 8.0,
//!     dumpling_machine_capacity: 50.0,
//!     dough_kneader_capacity: 15.0,
//!     cutter_capacity: 20.0,
//!     dough_mass_fraction: 40.0,
//!     meat_mass_fraction: 35.0,
//!     eggs_mass_fraction: 15.0,
//!     salt_mass_fraction: 3.0,
//!     spices_mass_fraction: 7.0,
//! };
//! let counts = sizing::run(&parameters).unwrap().counts();
//! assert_eq!(counts.dumpling_machines, 2);
//! ```

pub mod cli;
pub mod core;
pub mod document;
pub mod sizing;
