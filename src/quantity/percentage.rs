use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Share of a whole, `0..=100`.
pub type Percentage = Quantity<0, 0>;

impl Percentage {
    pub const HUNDRED: Self = Self::new(100.0);

    #[must_use]
    pub const fn to_proportion(self) -> f64 {
        0.01 * self.into_inner()
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        (Self::ZERO..=Self::HUNDRED).contains(&self)
    }
}

impl Display for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Debug for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}%", self.0)
    }
}
