use clap::Parser;

use crate::{
    cli::market::{DataArgs, MarketArgs, WindowArgs},
    core::rate_table::MonthlyRate,
    prelude::*,
};

#[derive(Parser)]
pub struct RatesArgs {
    #[clap(flatten)]
    pub market: MarketArgs,

    #[clap(flatten)]
    pub data: DataArgs,

    #[clap(flatten)]
    pub window: WindowArgs,
}

/// Monthly averaged wholesale and utility rates, without costs.
#[instrument(skip_all)]
pub fn rates(args: &RatesArgs) -> Result<Vec<MonthlyRate>> {
    let market = args.market.market();
    let column = market.utility_column(args.market.zone)?;
    let rate_table = args.data.read_rate_table(market)?;
    let window = args.window.resolve(&rate_table, None)?;
    ensure!(window.start() <= window.end(), "the start date must not be after the end date");
    Ok(rate_table.aggregate_monthly(&window, column)?)
}
