use clap::Parser;

use crate::{
    cli::market::DataArgs,
    core::portfolio::SiteRecord,
    io::sites::read_site_table,
    prelude::*,
};

#[derive(Parser)]
pub struct ClientsArgs {
    #[clap(flatten)]
    pub data: DataArgs,

    /// Only list the sites of this client.
    #[clap(long, env = "MARKET_SIMULATOR_CLIENT")]
    pub client: Option<String>,
}

/// Site records ordered by client, market and site.
#[instrument(skip_all)]
pub fn clients(args: &ClientsArgs) -> Result<Vec<SiteRecord>> {
    let mut records = read_site_table(&args.data.sites_path())?;
    if let Some(client_name) = &args.client {
        records.retain(|record| &record.client_name == client_name);
        ensure!(!records.is_empty(), "no sites on record for client `{client_name}`");
    }
    records.sort_by(|lhs, rhs| {
        (&lhs.client_name, lhs.province, lhs.commodity, &lhs.site_id).cmp(&(
            &rhs.client_name,
            rhs.province,
            rhs.commodity,
            &rhs.site_id,
        ))
    });
    Ok(records)
}
