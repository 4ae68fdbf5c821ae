//! Ingredient composition check
//!
//! The five mass fractions of a finished product (dough, meat, eggs, salt,
//! spices) must add up to 100 percent before any machine count is computed.

use serde::{Deserialize, Serialize};

/// Relative tolerance used when comparing the composition total to 100%
pub const COMPOSITION_TOLERANCE: f64 = 1e-9;

/// The whole product, in percent
pub const FULL_COMPOSITION: f64 = 100.0;

/// Returns true when the five percentages sum to 100 within
/// [`COMPOSITION_TOLERANCE`].
///
/// Percentages typically come from decimal input, so exact float equality
/// would reject compositions that are correct on paper.
pub fn is_valid(dough: f64, meat: f64, eggs: f64, salt: f64, spices: f64) -> bool {
    approx_full(dough + meat + eggs + salt + spices)
}

fn approx_full(total: f64) -> bool {
    let scale = total.abs().max(FULL_COMPOSITION);
    (total - FULL_COMPOSITION).abs() <= COMPOSITION_TOLERANCE * scale
}

/// Mass fractions of the finished product, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub dough: f64,
    pub meat: f64,
    pub eggs: f64,
    pub salt: f64,
    pub spices: f64,
}

impl Composition {
    /// Sum of all five fractions
    pub fn total(&self) -> f64 {
        self.dough + self.meat + self.eggs + self.salt + self.spices
    }

    /// Filling share of the product (everything that is not dough)
    pub fn filling(&self) -> f64 {
        FULL_COMPOSITION - self.dough
    }

    pub fn is_valid(&self) -> bool {
        is_valid(self.dough, self.meat, self.eggs, self.salt, self.spices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_sum_is_valid() {
        assert!(is_valid(25.0, 40.0, 20.0, 5.0, 10.0));
    }

    #[test]
    fn test_sum_within_tolerance_is_valid() {
        assert!(is_valid(25.0, 40.0, 20.0, 5.0, 9.999999999));
    }

    #[test]
    fn test_sum_over_hundred_is_invalid() {
        assert!(!is_valid(30.0, 40.0, 20.0, 5.0, 10.0));
    }

    #[test]
    fn test_sum_outside_tolerance_is_invalid() {
        assert!(!is_valid(25.0, 40.0, 20.0, 5.0, 9.9999));
        assert!(!is_valid(0.0, 0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_decimal_fractions_accumulate_rounding() {
        // 0.1 + 0.2 style rounding must not reject a correct recipe
        assert!(is_valid(33.3, 33.3, 33.3, 0.05, 0.05));
    }

    #[test]
    fn test_composition_total_and_filling() {
        let composition = Composition {
            dough: 40.0,
            meat: 35.0,
            eggs: 15.0,
            salt: 3.0,
            spices: 7.0,
        };
        assert!((composition.total() - 100.0).abs() < 1e-12);
        assert!((composition.filling() - 60.0).abs() < 1e-12);
        assert!(composition.is_valid());
    }
}
