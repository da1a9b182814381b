use std::{collections::BTreeMap, ops::RangeInclusive};

use chrono::NaiveDate;
use enumset::{EnumSet, EnumSetType};
use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{error::CalculationError, series::AverageMonthly},
    prelude::*,
    quantity::rate::Rate,
};

/// Utility-side rate column of a rate table.
#[derive(Debug, Hash, Ord, PartialOrd, EnumSetType, derive_more::Display)]
pub enum UtilityColumn {
    #[display("regulated_rate")]
    Regulated,

    #[display("local_utility_rate_egd")]
    LocalEgd,

    #[display("local_utility_rate_usouth")]
    LocalUnionSouth,

    #[display("utility_rate")]
    Utility,
}

impl UtilityColumn {
    #[must_use]
    pub fn from_column_name(name: &str) -> Option<Self> {
        EnumSet::<Self>::all().iter().find(|column| column.to_string() == name)
    }
}

#[derive(Clone, Debug)]
pub struct RateObservation {
    pub date: NaiveDate,
    pub wholesale_rate: Rate,

    /// Empty cells are absent.
    pub utility_rates: BTreeMap<UtilityColumn, Rate>,
}

impl RateObservation {
    #[must_use]
    pub fn utility_rate(&self, column: UtilityColumn) -> Option<Rate> {
        self.utility_rates.get(&column).copied()
    }
}

/// Averaged rates of one calendar month.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyRate {
    /// First day of the month.
    pub month: NaiveDate,

    pub wholesale_rate: Rate,
    pub utility_rate: Rate,
}

/// Date-indexed rate series, loaded once and never modified.
#[derive(Clone, Debug, Default)]
pub struct RateTable {
    columns: EnumSet<UtilityColumn>,
    observations: Vec<RateObservation>,
}

impl RateTable {
    pub fn new(columns: EnumSet<UtilityColumn>, mut observations: Vec<RateObservation>) -> Self {
        observations.sort_by_key(|observation| observation.date);
        Self { columns, observations }
    }

    #[must_use]
    pub const fn columns(&self) -> EnumSet<UtilityColumn> {
        self.columns
    }

    #[must_use]
    pub fn observations(&self) -> &[RateObservation] {
        &self.observations
    }

    #[must_use]
    pub fn date_span(&self) -> Option<RangeInclusive<NaiveDate>> {
        let first = self.observations.first()?;
        let last = self.observations.last()?;
        Some(first.date..=last.date)
    }

    pub fn ensure_columns(&self, required: EnumSet<UtilityColumn>) -> Result<(), CalculationError> {
        let missing = required - self.columns;
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CalculationError::missing_data(format!(
                "rate table lacks column(s): {}",
                missing.iter().join(", "),
            )))
        }
    }

    /// Average the wholesale and the chosen utility column per calendar month within the window.
    #[instrument(skip_all, fields(start = %window.start(), end = %window.end(), column = %column))]
    pub fn aggregate_monthly(
        &self,
        window: &RangeInclusive<NaiveDate>,
        column: UtilityColumn,
    ) -> Result<Vec<MonthlyRate>, CalculationError> {
        self.ensure_columns(EnumSet::only(column))?;

        let filtered = self
            .observations
            .iter()
            .filter(|observation| window.contains(&observation.date))
            .collect_vec();
        if filtered.is_empty() {
            return Err(CalculationError::EmptyRange { start: *window.start(), end: *window.end() });
        }

        let wholesale_rates = filtered
            .iter()
            .map(|observation| (observation.date, observation.wholesale_rate))
            .average_monthly();
        let utility_rates = filtered
            .iter()
            .filter_map(|observation| {
                observation.utility_rate(column).map(|rate| (observation.date, rate))
            })
            .average_monthly();

        let monthly_rates = wholesale_rates
            .into_iter()
            .map(|(month, wholesale_rate)| {
                let utility_rate = utility_rates.get(&month).copied().ok_or_else(|| {
                    CalculationError::missing_data(format!(
                        "no `{column}` values in {}",
                        month.format("%Y-%m"),
                    ))
                })?;
                Ok(MonthlyRate { month, wholesale_rate, utility_rate })
            })
            .collect::<Result<Vec<_>, CalculationError>>()?;
        debug!(n_observations = filtered.len(), n_months = monthly_rates.len(), "aggregated");
        Ok(monthly_rates)
    }
}
