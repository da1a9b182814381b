use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    core::{
        consumption::ConsumptionProfile,
        hedge::Hedge,
        market::Market,
        rate_table::MonthlyRate,
    },
    quantity::{cost::Cost, rate::PriceUnit},
};

/// Costs of both scenarios for one month.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct CostRow {
    pub month: NaiveDate,
    pub utility_cost: Cost,
    pub client_cost: Cost,

    /// Whether part of the month's volume was bought at the hedge rate.
    pub hedged: bool,
}

impl CostRow {
    /// Positive when the client scenario is cheaper.
    pub fn difference(&self) -> Cost {
        self.utility_cost - self.client_cost
    }
}

#[derive(Copy, Clone, Debug, Default, Serialize)]
pub struct Totals {
    pub utility_cost: Cost,
    pub client_cost: Cost,
}

impl Totals {
    pub fn difference(&self) -> Cost {
        self.utility_cost - self.client_cost
    }

    pub fn verdict(&self) -> Verdict {
        let difference = self.difference();
        if difference > Cost::ZERO {
            Verdict::Saved(difference)
        } else if difference < Cost::ZERO {
            Verdict::SpentMore(-difference)
        } else {
            Verdict::NoDifference
        }
    }
}

impl FromIterator<CostRow> for Totals {
    fn from_iter<T: IntoIterator<Item = CostRow>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), |mut totals, row| {
            totals.utility_cost += row.utility_cost;
            totals.client_cost += row.client_cost;
            totals
        })
    }
}

/// Sign-qualified reading of the total difference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "amount")]
pub enum Verdict {
    Saved(Cost),
    SpentMore(Cost),
    NoDifference,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Saved(amount) => {
                write!(f, "You would have saved {amount} by using the Client Cost (vs. Utility).")
            }
            Self::SpentMore(amount) => write!(
                f,
                "You would have spent {amount} more by using the Client Cost (vs. Utility).",
            ),
            Self::NoDifference => write!(f, "No difference between Utility and Client Cost."),
        }
    }
}

/// Full outcome of one calculation.
#[derive(Clone, Debug, Serialize)]
pub struct CostReport {
    pub price_unit: PriceUnit,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub redistributed: bool,
    pub difference: Cost,

    /// Profile the utility cost was billed on, January first.
    pub consumption: ConsumptionProfile,

    pub market: Market,
    pub verdict: Verdict,
    pub totals: Totals,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hedge: Option<Hedge>,

    pub monthly_rates: Vec<MonthlyRate>,
    pub rows: Vec<CostRow>,
}
