use std::fmt::{Debug, Display, Formatter};

use crate::{fmt::Thousands, quantity::Quantity};

/// Amount of money in the major currency unit (dollars).
pub type Cost = Quantity<0, 1>;

impl Cost {
    /// Round the cost to whole cents.
    pub fn round_to_cents(self) -> Self {
        Self::new((self.into_inner() * 100.0).round() / 100.0)
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rounded = self.round_to_cents();
        if rounded < Self::ZERO {
            write!(f, "-${}", Thousands(rounded.abs().into_inner()))
        } else {
            write!(f, "${}", Thousands(rounded.abs().into_inner()))
        }
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}$", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_round_to_cents() {
        assert_abs_diff_eq!(Cost::from(0.015_000_1).round_to_cents().into_inner(), 0.02);
    }

    #[test]
    fn test_display() {
        assert_eq!(Cost::from(1000.0).to_string(), "$1,000.00");
        assert_eq!(Cost::from(-1_234_567.891).to_string(), "-$1,234,567.89");
        assert_eq!(Cost::from(-0.001).to_string(), "$0.00");
    }
}
