use std::fmt::{Debug, Display, Formatter};

use crate::{fmt::Thousands, quantity::Quantity};

/// Consumed volume in the market's volume unit (GJ or m³).
pub type Volume = Quantity<1, 0>;

impl Display for Volume {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&Thousands(self.into_inner()), f)
    }
}

impl Debug for Volume {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}u", self.0)
    }
}
