use std::ops::RangeInclusive;

use bon::Builder;
use chrono::NaiveDate;

use crate::{
    core::{
        calculator::Calculator,
        consumption::ConsumptionProfile,
        error::CalculationError,
        hedge::Hedge,
        market::{Market, Zone},
        rate_table::RateTable,
        report::{CostReport, Totals},
    },
    prelude::*,
    quantity::rate::Rate,
};

/// One full utility-versus-client calculation over a date window.
#[derive(Builder)]
pub struct Comparison<'a> {
    rate_table: &'a RateTable,
    market: Market,

    /// Required for multi-zone markets.
    zone: Option<Zone>,

    /// Inclusive analysis window.
    window: RangeInclusive<NaiveDate>,

    consumption: &'a ConsumptionProfile,
    admin_fee: Rate,
    hedge: Option<Hedge>,

    /// Lower bound for the window start, set when the subject comes from the site table.
    contract_start: Option<NaiveDate>,

    #[builder(default)]
    redistribute: bool,
}

impl Comparison<'_> {
    #[instrument(skip_all, fields(market = %self.market, start = %self.window.start(), end = %self.window.end()))]
    pub fn run(&self) -> Result<CostReport, CalculationError> {
        self.validate()?;

        let column = self.market.utility_column(self.zone)?;
        let price_unit = self.market.price_unit()?;
        let monthly_rates = self.rate_table.aggregate_monthly(&self.window, column)?;

        let hedge = self.hedge.filter(|hedge| hedge.enabled);
        let rows = Calculator::builder()
            .monthly_rates(&monthly_rates)
            .consumption(self.consumption)
            .admin_fee(self.admin_fee)
            .price_unit(price_unit)
            .maybe_hedge(hedge.as_ref())
            .redistribute(self.redistribute)
            .build()
            .calculate()?;

        let totals: Totals = rows.iter().copied().collect();
        let verdict = totals.verdict();
        info!(
            n_months = rows.len(),
            utility_total = %totals.utility_cost,
            client_total = %totals.client_cost,
            "calculated",
        );
        Ok(CostReport {
            price_unit,
            start: *self.window.start(),
            end: *self.window.end(),
            redistributed: self.redistribute,
            difference: totals.difference(),
            consumption: *self.consumption,
            market: self.market,
            verdict,
            totals,
            hedge,
            monthly_rates,
            rows,
        })
    }

    fn validate(&self) -> Result<(), CalculationError> {
        let (start, end) = (*self.window.start(), *self.window.end());
        if start > end {
            return Err(CalculationError::InvalidDateRange(format!(
                "start {start} is after end {end}",
            )));
        }
        if let Some(contract_start) = self.contract_start
            && start < contract_start
        {
            return Err(CalculationError::InvalidDateRange(format!(
                "start {start} precedes the contract start {contract_start}",
            )));
        }
        if let Some(hedge) = self.hedge.filter(|hedge| hedge.enabled) {
            if !hedge.portion.is_valid() {
                return Err(CalculationError::InvalidDateRange(format!(
                    "hedge portion {} is outside 0..=100%",
                    hedge.portion,
                )));
            }
            if !self.window.contains(&hedge.start) {
                return Err(CalculationError::InvalidDateRange(format!(
                    "hedge start {} is outside {start}..={end}",
                    hedge.start,
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use enumset::EnumSet;

    use super::*;
    use crate::{
        core::{
            market::{Commodity, Jurisdiction},
            rate_table::{
                RateObservation,
                UtilityColumn,
                tests::{date, observation},
            },
            report::Verdict,
        },
        quantity::{cost::Cost, percentage::Percentage},
    };

    const ALBERTA_GAS: Market = Market::new(Jurisdiction::Alberta, Commodity::Gas);

    fn january_profile() -> ConsumptionProfile {
        let mut volumes = [0.0; 12];
        volumes[0] = 1000.0;
        ConsumptionProfile::try_from_slice(&volumes).unwrap()
    }

    fn alberta_table() -> RateTable {
        RateTable::new(EnumSet::only(UtilityColumn::Regulated), vec![
            observation(date(2023, 1, 1), 2.0, 4.0),
            observation(date(2023, 1, 31), 4.0, 5.0),
            observation(date(2023, 2, 1), 10.0, 1.0),
        ])
    }

    #[test]
    fn test_end_to_end() {
        let table = alberta_table();
        let consumption = january_profile();
        let report = Comparison::builder()
            .rate_table(&table)
            .market(ALBERTA_GAS)
            .window(date(2023, 1, 1)..=date(2023, 1, 31))
            .consumption(&consumption)
            .admin_fee(Rate::from(0.5))
            .build()
            .run()
            .unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_abs_diff_eq!(report.monthly_rates[0].wholesale_rate.into_inner(), 3.0);
        assert_abs_diff_eq!(report.monthly_rates[0].utility_rate.into_inner(), 4.5);
        assert_abs_diff_eq!(report.totals.utility_cost.into_inner(), 4500.0);
        assert_abs_diff_eq!(report.totals.client_cost.into_inner(), 3500.0);
        assert_eq!(report.verdict, Verdict::Saved(Cost::from(1000.0)));
        assert_eq!(
            report.verdict.to_string(),
            "You would have saved $1,000.00 by using the Client Cost (vs. Utility).",
        );
    }

    #[test]
    fn test_ontario_requires_zone() {
        let table = RateTable::new(UtilityColumn::LocalEgd | UtilityColumn::LocalUnionSouth, vec![
            RateObservation {
                date: date(2023, 1, 1),
                wholesale_rate: Rate::from(20.0),
                utility_rates: [
                    (UtilityColumn::LocalEgd, Rate::from(30.0)),
                    (UtilityColumn::LocalUnionSouth, Rate::from(40.0)),
                ]
                .into(),
            },
        ]);
        let consumption = january_profile();
        let comparison = |zone| {
            Comparison::builder()
                .rate_table(&table)
                .market(Market::new(Jurisdiction::Ontario, Commodity::Gas))
                .maybe_zone(zone)
                .window(date(2023, 1, 1)..=date(2023, 1, 31))
                .consumption(&consumption)
                .admin_fee(Rate::from(1.0))
                .build()
                .run()
        };

        let error = comparison(None).unwrap_err();
        assert!(error.is_configuration_gap());

        let report = comparison(Some(Zone::UnionSouth)).unwrap();
        assert_abs_diff_eq!(report.totals.utility_cost.into_inner(), 400.0);
        assert_abs_diff_eq!(report.totals.client_cost.into_inner(), 210.0);
    }

    #[test]
    fn test_unsupported_market() {
        let table = alberta_table();
        let consumption = january_profile();
        let error = Comparison::builder()
            .rate_table(&table)
            .market(Market::new(Jurisdiction::Quebec, Commodity::Electricity))
            .window(date(2023, 1, 1)..=date(2023, 1, 31))
            .consumption(&consumption)
            .admin_fee(Rate::ZERO)
            .build()
            .run()
            .unwrap_err();
        assert!(matches!(error, CalculationError::UnsupportedCombination { .. }));
    }

    #[test]
    fn test_rejects_reversed_window() {
        let table = alberta_table();
        let consumption = january_profile();
        let error = Comparison::builder()
            .rate_table(&table)
            .market(ALBERTA_GAS)
            .window(date(2023, 2, 1)..=date(2023, 1, 1))
            .consumption(&consumption)
            .admin_fee(Rate::ZERO)
            .build()
            .run()
            .unwrap_err();
        assert!(matches!(error, CalculationError::InvalidDateRange(_)));
    }

    #[test]
    fn test_rejects_start_before_contract() {
        let table = alberta_table();
        let consumption = january_profile();
        let error = Comparison::builder()
            .rate_table(&table)
            .market(ALBERTA_GAS)
            .window(date(2023, 1, 1)..=date(2023, 2, 28))
            .consumption(&consumption)
            .admin_fee(Rate::ZERO)
            .contract_start(date(2023, 2, 1))
            .build()
            .run()
            .unwrap_err();
        assert!(matches!(error, CalculationError::InvalidDateRange(_)));
    }

    #[test]
    fn test_hedge_validation() {
        let table = alberta_table();
        let consumption = january_profile();
        let run = |hedge: Hedge| {
            Comparison::builder()
                .rate_table(&table)
                .market(ALBERTA_GAS)
                .window(date(2023, 1, 1)..=date(2023, 2, 28))
                .consumption(&consumption)
                .admin_fee(Rate::ZERO)
                .hedge(hedge)
                .build()
                .run()
        };
        let hedge = Hedge::builder()
            .portion(Percentage::from(50.0))
            .start(date(2023, 1, 1))
            .term_months(1)
            .fixed_rate(Rate::from(1.0))
            .build();

        assert!(run(hedge).is_ok());
        assert!(run(Hedge { portion: Percentage::from(120.0), ..hedge }).is_err());
        assert!(run(Hedge { start: date(2024, 1, 1), ..hedge }).is_err());
        assert!(run(Hedge { enabled: false, start: date(2024, 1, 1), ..hedge }).is_ok());
    }

    #[test]
    fn test_hedged_january() {
        let table = alberta_table();
        let consumption = january_profile();
        let hedge = Hedge::builder()
            .portion(Percentage::from(50.0))
            .start(date(2023, 1, 1))
            .term_months(1)
            .fixed_rate(Rate::from(1.0))
            .build();
        let report = Comparison::builder()
            .rate_table(&table)
            .market(ALBERTA_GAS)
            .window(date(2023, 1, 1)..=date(2023, 2, 28))
            .consumption(&consumption)
            .admin_fee(Rate::from(0.5))
            .hedge(hedge)
            .build()
            .run()
            .unwrap();
        assert!(report.rows[0].hedged);
        assert!(!report.rows[1].hedged);
        assert_abs_diff_eq!(report.rows[0].client_cost.into_inner(), 500.0 + 500.0 * 3.5);
        assert_eq!(report.rows[1].client_cost, Cost::ZERO);
    }
}
