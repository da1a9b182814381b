use std::{fs, path::PathBuf};

use chrono::NaiveDate;
use clap::Parser;

use crate::{
    cli::market::{DataArgs, MarketArgs, WindowArgs},
    core::{
        comparison::Comparison,
        consumption::ConsumptionProfile,
        hedge::Hedge,
        portfolio::{SiteSelection, Subject, select_subject},
        report::CostReport,
    },
    io::{profiles::read_client_profile_table, sites::read_site_table},
    prelude::*,
    quantity::{percentage::Percentage, rate::Rate},
};

#[derive(Parser)]
pub struct CompareArgs {
    #[clap(flatten)]
    pub market: MarketArgs,

    #[clap(flatten)]
    pub data: DataArgs,

    #[clap(flatten)]
    pub window: WindowArgs,

    #[clap(flatten)]
    pub subject: SubjectArgs,

    #[clap(flatten)]
    pub hedge: HedgeArgs,

    /// Bill the client cost on the annual total spread equally over the months.
    #[clap(long, env = "MARKET_SIMULATOR_REDISTRIBUTE")]
    pub redistribute: bool,

    /// Write the report to this file: JSON for `.json`, TOML otherwise.
    #[clap(long, env = "MARKET_SIMULATOR_OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,
}

/// A manual consumption profile, a client profile row, or a client from the site table.
#[derive(Parser)]
pub struct SubjectArgs {
    /// Twelve comma-separated monthly volumes, January first.
    #[clap(
        long,
        env = "MARKET_SIMULATOR_CONSUMPTION",
        value_delimiter = ',',
        conflicts_with_all = ["client", "profile"],
        required_unless_present_any = ["client", "profile"]
    )]
    pub consumption: Vec<f64>,

    /// Admin fee for a manual or profile subject, in the market's price unit.
    #[clap(long, env = "MARKET_SIMULATOR_ADMIN_FEE", conflicts_with = "client")]
    pub admin_fee: Option<f64>,

    /// Client name in the site table.
    #[clap(long, env = "MARKET_SIMULATOR_CLIENT", conflicts_with = "profile")]
    pub client: Option<String>,

    /// Client name in the single-row client profile table.
    #[clap(long, env = "MARKET_SIMULATOR_PROFILE")]
    pub profile: Option<String>,

    /// Single site of the client, all sites are aggregated when omitted.
    #[clap(long = "site", env = "MARKET_SIMULATOR_SITE", requires = "client")]
    pub site_id: Option<String>,
}

#[derive(Parser)]
pub struct HedgeArgs {
    /// Share of the monthly volume bought at the fixed rate, enables the hedge.
    #[clap(
        long = "hedge-portion-percent",
        env = "MARKET_SIMULATOR_HEDGE_PORTION_PERCENT",
        requires = "hedge_fixed_rate"
    )]
    pub hedge_portion: Option<f64>,

    /// First day of the hedge window, defaults to the analysis start.
    #[clap(long, env = "MARKET_SIMULATOR_HEDGE_START", requires = "hedge_portion")]
    pub hedge_start: Option<NaiveDate>,

    #[clap(long, env = "MARKET_SIMULATOR_HEDGE_TERM_MONTHS", default_value = "12")]
    pub hedge_term_months: u32,

    /// Fee-inclusive price of the hedged volume, in the market's price unit.
    #[clap(long, env = "MARKET_SIMULATOR_HEDGE_FIXED_RATE", requires = "hedge_portion")]
    pub hedge_fixed_rate: Option<f64>,
}

impl HedgeArgs {
    fn hedge(&self, default_start: NaiveDate) -> Result<Option<Hedge>> {
        let Some(portion) = self.hedge_portion else {
            return Ok(None);
        };
        let fixed_rate =
            self.hedge_fixed_rate.context("`--hedge-fixed-rate` is required for a hedge")?;
        Ok(Some(
            Hedge::builder()
                .portion(Percentage::from(portion))
                .start(self.hedge_start.unwrap_or(default_start))
                .term_months(self.hedge_term_months)
                .fixed_rate(Rate::from(fixed_rate))
                .build(),
        ))
    }
}

#[instrument(skip_all)]
pub fn compare(args: &CompareArgs) -> Result<CostReport> {
    let market = args.market.market();
    let subject = resolve_subject(args)?;
    let rate_table = args.data.read_rate_table(market)?;
    let window = args.window.resolve(&rate_table, subject.contract_start)?;
    let hedge = args.hedge.hedge(*window.start())?;

    let report = Comparison::builder()
        .rate_table(&rate_table)
        .market(market)
        .maybe_zone(args.market.zone)
        .window(window)
        .consumption(&subject.consumption)
        .admin_fee(subject.admin_fee)
        .maybe_hedge(hedge)
        .maybe_contract_start(subject.contract_start)
        .redistribute(args.redistribute)
        .build()
        .run()?;

    if let Some(path) = &args.output_file {
        let serialized = if path.extension().is_some_and(|extension| extension == "json") {
            serde_json::to_string_pretty(&report)?
        } else {
            toml::to_string(&report)?
        };
        fs::write(path, serialized)
            .with_context(|| format!("failed to write the report to `{}`", path.display()))?;
        info!(path = %path.display(), "saved the report");
    }
    Ok(report)
}

fn resolve_subject(args: &CompareArgs) -> Result<Subject> {
    let subject = &args.subject;
    if let Some(client_name) = &subject.client {
        let records = read_site_table(&args.data.sites_path())?;
        let selection =
            subject.site_id.clone().map_or(SiteSelection::Aggregate, SiteSelection::Site);
        return Ok(select_subject(&records, client_name, args.market.market(), &selection)?);
    }
    let consumption = match &subject.profile {
        Some(client_name) => read_client_profile_table(&args.data.profiles_path())?
            .into_iter()
            .find(|profile| &profile.client_name == client_name)
            .with_context(|| format!("no consumption profile for client `{client_name}`"))?
            .consumption,
        None => ConsumptionProfile::try_from_slice(&subject.consumption)?,
    };
    Ok(Subject {
        consumption,
        admin_fee: Rate::from(subject.admin_fee.unwrap_or_default()),
        contract_start: None,
        site_ids: Vec::new(),
    })
}
