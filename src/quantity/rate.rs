use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::quantity::{Quantity, cost::Cost, volume::Volume};

/// Price per volume unit, expressed in the market's [`PriceUnit`].
pub type Rate = Quantity<-1, 1>;

impl Display for Rate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl Debug for Rate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}/u", self.0)
    }
}

/// Currency unit the rates of a market are quoted in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceUnit {
    /// Major currency per volume unit, for example `$/GJ`.
    Dollars,

    /// Minor currency per volume unit, for example `¢/m³`.
    Cents,
}

impl PriceUnit {
    #[must_use]
    pub const fn divisor(self) -> f64 {
        match self {
            Self::Dollars => 1.0,
            Self::Cents => 100.0,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Dollars => "$",
            Self::Cents => "¢",
        }
    }

    /// Cost of the volume at the rate, in dollars.
    pub fn cost(self, volume: Volume, rate: Rate) -> Cost {
        Cost::new(volume.into_inner() * rate.into_inner() / self.divisor())
    }
}
