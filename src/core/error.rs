use chrono::NaiveDate;

use crate::core::market::{Commodity, Jurisdiction};

/// Terminal failure of one calculation, no partial results are produced.
#[derive(Debug, thiserror::Error)]
pub enum CalculationError {
    #[error("missing data: {0}")]
    MissingData(String),

    #[error("no rate data between {start} and {end}, adjust the date range")]
    EmptyRange { start: NaiveDate, end: NaiveDate },

    #[error("no rule for {jurisdiction} {commodity}: {reason}")]
    UnsupportedCombination {
        jurisdiction: Jurisdiction,
        commodity: Commodity,
        reason: &'static str,
    },

    #[error("month number {0} is outside 1..=12")]
    InvalidMonth(u32),

    #[error("invalid date range: {0}")]
    InvalidDateRange(String),
}

impl CalculationError {
    pub fn missing_data(message: impl Into<String>) -> Self {
        Self::MissingData(message.into())
    }

    /// Configuration gaps are not caused by what the user entered.
    #[must_use]
    pub const fn is_configuration_gap(&self) -> bool {
        matches!(self, Self::UnsupportedCombination { .. })
    }
}
