#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod core;
mod fmt;
mod io;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, clients, compare, rates},
    core::error::CalculationError,
    prelude::*,
    tables::{
        build_clients_table,
        build_consumption_table,
        build_costs_table,
        build_monthly_rates_table,
        build_verdict_table,
    },
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    if let Err(error) = run(args.command) {
        if error.downcast_ref::<CalculationError>().is_some_and(CalculationError::is_configuration_gap)
        {
            error!("configuration gap, this market is not supported");
        }
        return Err(error);
    }

    info!("done!");
    Ok(())
}

fn run(command: Command) -> Result {
    match command {
        Command::Compare(args) => {
            let report = compare(&args)?;
            let volume_unit = report.market.volume_unit()?;
            println!(
                "{}",
                build_consumption_table(&report.consumption, report.redistributed, volume_unit),
            );
            println!(
                "{}",
                build_monthly_rates_table(&report.monthly_rates, report.price_unit, volume_unit),
            );
            println!("{}", build_costs_table(&report));
            println!("{}", build_verdict_table(report.verdict));
        }
        Command::Rates(args) => {
            let market = args.market.market();
            let monthly_rates = rates(&args)?;
            println!(
                "{}",
                build_monthly_rates_table(&monthly_rates, market.price_unit()?, market.volume_unit()?),
            );
        }
        Command::Clients(args) => {
            let records = clients(&args)?;
            println!("{}", build_clients_table(&records));
        }
    }
    Ok(())
}
