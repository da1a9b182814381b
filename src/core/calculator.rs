use bon::Builder;
use chrono::Datelike;

use crate::{
    core::{
        consumption::ConsumptionProfile,
        error::CalculationError,
        hedge::{Hedge, in_hedge_window},
        rate_table::MonthlyRate,
        report::CostRow,
    },
    prelude::*,
    quantity::{cost::Cost, rate::{PriceUnit, Rate}, volume::Volume},
};

/// Utility and client cost for every aggregated month.
#[derive(Builder)]
pub struct Calculator<'a> {
    monthly_rates: &'a [MonthlyRate],
    consumption: &'a ConsumptionProfile,

    /// Per-unit markup on the floating volume, in the market's price unit.
    admin_fee: Rate,

    price_unit: PriceUnit,
    hedge: Option<&'a Hedge>,

    /// Bill the client scenario on the annual total spread equally over the months.
    #[builder(default)]
    redistribute: bool,
}

impl Calculator<'_> {
    #[instrument(skip_all, fields(n_months = self.monthly_rates.len(), redistribute = self.redistribute))]
    pub fn calculate(&self) -> Result<Vec<CostRow>, CalculationError> {
        let client_consumption =
            if self.redistribute { self.consumption.redistributed() } else { *self.consumption };
        if self.redistribute && self.consumption.is_zero() {
            warn!("total consumption is zero, redistribution changes nothing");
        }
        self.monthly_rates
            .iter()
            .map(|monthly_rate| self.calculate_month(monthly_rate, &client_consumption))
            .collect()
    }

    fn calculate_month(
        &self,
        monthly_rate: &MonthlyRate,
        client_consumption: &ConsumptionProfile,
    ) -> Result<CostRow, CalculationError> {
        let month_number = monthly_rate.month.month();
        let utility_volume = self.consumption.get(month_number)?;
        let client_volume = client_consumption.get(month_number)?;
        let hedged = in_hedge_window(monthly_rate.month, self.hedge);

        let utility_cost = self.price_unit.cost(utility_volume, monthly_rate.utility_rate);
        let client_cost = match self.hedge {
            Some(hedge) if hedged => self.hedged_cost(client_volume, monthly_rate, hedge),
            _ => self.floating_cost(client_volume, monthly_rate),
        };
        trace_month(monthly_rate, utility_cost, client_cost, hedged);
        Ok(CostRow { month: monthly_rate.month, utility_cost, client_cost, hedged })
    }

    /// Wholesale price plus the admin fee.
    fn floating_cost(&self, volume: Volume, monthly_rate: &MonthlyRate) -> Cost {
        self.price_unit.cost(volume, monthly_rate.wholesale_rate + self.admin_fee)
    }

    /// The hedge price is fee-inclusive: the admin fee applies to the floating part only.
    fn hedged_cost(&self, volume: Volume, monthly_rate: &MonthlyRate, hedge: &Hedge) -> Cost {
        let hedged_volume = volume * hedge.portion.to_proportion();
        let floating_volume = volume - hedged_volume;
        self.price_unit.cost(hedged_volume, hedge.fixed_rate)
            + self.floating_cost(floating_volume, monthly_rate)
    }
}

fn trace_month(monthly_rate: &MonthlyRate, utility_cost: Cost, client_cost: Cost, hedged: bool) {
    debug!(
        month = %monthly_rate.month.format("%Y-%m"),
        wholesale_rate = %monthly_rate.wholesale_rate,
        utility_rate = %monthly_rate.utility_rate,
        %utility_cost,
        %client_cost,
        hedged,
    );
}
