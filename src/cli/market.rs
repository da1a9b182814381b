use std::{ops::RangeInclusive, path::PathBuf};

use chrono::NaiveDate;
use clap::Parser;

use crate::{
    core::{
        error::CalculationError,
        market::{Commodity, Jurisdiction, Market, Zone},
        rate_table::RateTable,
    },
    io::rates::read_rate_table,
    prelude::*,
};

#[derive(Parser)]
pub struct MarketArgs {
    #[clap(long, env = "MARKET_SIMULATOR_PROVINCE")]
    pub province: Jurisdiction,

    #[clap(long, env = "MARKET_SIMULATOR_COMMODITY", default_value = "gas")]
    pub commodity: Commodity,

    /// Local delivery zone, required for Ontario gas.
    #[clap(long, env = "MARKET_SIMULATOR_ZONE")]
    pub zone: Option<Zone>,
}

impl MarketArgs {
    pub const fn market(&self) -> Market {
        Market::new(self.province, self.commodity)
    }
}

#[derive(Parser)]
pub struct DataArgs {
    /// Directory with the historical rate files and the client site table.
    #[clap(long, env = "MARKET_SIMULATOR_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Explicit rate file, overrides the market's conventional file name.
    #[clap(long, env = "MARKET_SIMULATOR_RATES_FILE")]
    pub rates_file: Option<PathBuf>,

    #[clap(long, env = "MARKET_SIMULATOR_SITES_FILE", default_value = "client_data_by_site.csv")]
    pub sites_file: PathBuf,

    /// Table with one consumption row per client.
    #[clap(
        long,
        env = "MARKET_SIMULATOR_PROFILES_FILE",
        default_value = "client_consumption_data.csv"
    )]
    pub profiles_file: PathBuf,
}

impl DataArgs {
    pub fn rates_path(&self, market: Market) -> Result<PathBuf, CalculationError> {
        match &self.rates_file {
            Some(path) => Ok(path.clone()),
            None => Ok(self.data_dir.join(market.rates_file_name()?)),
        }
    }

    pub fn sites_path(&self) -> PathBuf {
        self.data_dir.join(&self.sites_file)
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.data_dir.join(&self.profiles_file)
    }

    pub fn read_rate_table(&self, market: Market) -> Result<RateTable> {
        let path = self.rates_path(market)?;
        read_rate_table(&path, market.required_columns()?)
    }
}

#[derive(Parser)]
pub struct WindowArgs {
    /// First day of the analysis, defaults to the contract start or the first rate on record.
    #[clap(long, env = "MARKET_SIMULATOR_START")]
    pub start: Option<NaiveDate>,

    /// Last day of the analysis (inclusive), defaults to the last rate on record.
    #[clap(long, env = "MARKET_SIMULATOR_END")]
    pub end: Option<NaiveDate>,
}

impl WindowArgs {
    /// Fill the open ends from `default_start` and the span of the rate table.
    pub fn resolve(
        &self,
        rate_table: &RateTable,
        default_start: Option<NaiveDate>,
    ) -> Result<RangeInclusive<NaiveDate>> {
        let span = rate_table.date_span();
        let start = self
            .start
            .or(default_start)
            .or_else(|| span.as_ref().map(|span| *span.start()))
            .context("the rate table is empty, specify `--start`")?;
        let end = self
            .end
            .or_else(|| span.as_ref().map(|span| *span.end()))
            .context("the rate table is empty, specify `--end`")?;
        Ok(start..=end)
    }
}
