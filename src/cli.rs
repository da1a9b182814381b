mod clients;
mod compare;
mod market;
mod rates;

use clap::{Parser, Subcommand};

pub use self::{clients::clients, compare::compare, rates::rates};
use crate::cli::{clients::ClientsArgs, compare::CompareArgs, rates::RatesArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: compare the utility cost against the client cost over a date range.
    #[clap(name = "compare")]
    Compare(Box<CompareArgs>),

    /// Preview the monthly averaged rates of a market.
    #[clap(name = "rates")]
    Rates(Box<RatesArgs>),

    /// List the clients and sites on record.
    #[clap(name = "clients")]
    Clients(Box<ClientsArgs>),
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use clap::CommandFactory;

    use super::*;

    const CONSUMPTION: &str = "1,2,3,4,5,6,7,8,9,10,11,12";

    fn compare_args(extra: &[&str]) -> clap::error::Result<CompareArgs> {
        let args = ["market-simulator", "compare", "--province", "alberta"]
            .into_iter()
            .chain(extra.iter().copied());
        match Args::try_parse_from(args)?.command {
            Command::Compare(args) => Ok(*args),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_command_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_window_and_hedge_start_are_distinct() {
        let args = compare_args(&[
            "--consumption",
            CONSUMPTION,
            "--start",
            "2023-01-01",
            "--end",
            "2023-12-31",
            "--hedge-portion-percent",
            "50",
            "--hedge-fixed-rate",
            "2",
            "--hedge-start",
            "2023-03-01",
        ])
        .unwrap();
        assert_eq!(args.window.start, NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(args.window.end, NaiveDate::from_ymd_opt(2023, 12, 31));
        assert_eq!(args.hedge.hedge_start, NaiveDate::from_ymd_opt(2023, 3, 1));
        assert_eq!(args.hedge.hedge_portion, Some(50.0));
        assert_eq!(args.hedge.hedge_fixed_rate, Some(2.0));
        assert_eq!(args.subject.consumption.len(), 12);
    }

    #[test]
    fn test_hedge_requires_fixed_rate() {
        let args = compare_args(&["--consumption", CONSUMPTION, "--hedge-portion-percent", "50"]);
        assert!(args.is_err());
    }

    #[test]
    fn test_subject_sources_are_exclusive() {
        assert!(compare_args(&[]).is_err());
        assert!(compare_args(&["--consumption", CONSUMPTION, "--client", "Acme"]).is_err());
        assert!(compare_args(&["--client", "Acme", "--profile", "Acme"]).is_err());

        let args = compare_args(&["--profile", "Acme", "--admin-fee", "0.5"]).unwrap();
        assert_eq!(args.subject.profile.as_deref(), Some("Acme"));
        assert_eq!(args.subject.admin_fee, Some(0.5));
    }
}
