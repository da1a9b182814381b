use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::quantity::{percentage::Percentage, rate::Rate};

/// Partial fixed-price volume commitment over a calendar window.
#[derive(Copy, Clone, Debug, Serialize, bon::Builder)]
pub struct Hedge {
    #[builder(default = true)]
    pub enabled: bool,

    /// Share of each month's volume bought at the fixed rate.
    pub portion: Percentage,

    /// Inclusive.
    pub start: NaiveDate,

    pub term_months: u32,

    /// Fee-inclusive price of the hedged volume, in the market's price unit.
    pub fixed_rate: Rate,
}

impl Hedge {
    /// Exclusive end of the window: the start shifted by the term in calendar months.
    ///
    /// The day of month is preserved where valid and clamped to the month end otherwise.
    #[must_use]
    pub fn end(&self) -> Option<NaiveDate> {
        self.start.checked_add_months(Months::new(self.term_months))
    }

    /// Whether the month starting at `month_start` is bought partly at the fixed rate.
    #[must_use]
    pub fn contains(&self, month_start: NaiveDate) -> bool {
        self.enabled
            && self.start <= month_start
            && self.end().is_none_or(|end| month_start < end)
    }
}

/// `true` iff the hedge is enabled and `start ≤ month_start < start + term_months`.
#[must_use]
pub fn in_hedge_window(month_start: NaiveDate, hedge: Option<&Hedge>) -> bool {
    hedge.is_some_and(|hedge| hedge.contains(month_start))
}
