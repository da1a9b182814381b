use chrono::NaiveDate;
use itertools::Itertools;

use crate::{
    core::{
        consumption::ConsumptionProfile,
        error::CalculationError,
        market::{Commodity, Jurisdiction, Market},
    },
    prelude::*,
    quantity::rate::Rate,
};

/// One physical site of a client, as kept in the client reference table.
#[derive(Clone, Debug)]
pub struct SiteRecord {
    pub client_name: String,
    pub site_id: String,
    pub province: Jurisdiction,
    pub commodity: Commodity,
    pub contract_start_date: NaiveDate,
    pub admin_fee: Rate,
    pub consumption: ConsumptionProfile,
}

impl SiteRecord {
    #[must_use]
    pub const fn market(&self) -> Market {
        Market::new(self.province, self.commodity)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SiteSelection {
    /// Combine all matching sites into one virtual site.
    Aggregate,

    /// Use a single site as is.
    Site(String),
}

/// Consumption, fee and contract start the calculation runs on.
#[derive(Clone, Debug)]
pub struct Subject {
    pub consumption: ConsumptionProfile,
    pub admin_fee: Rate,

    /// Earliest contract start, known for clients on record only.
    pub contract_start: Option<NaiveDate>,

    pub site_ids: Vec<String>,
}

/// Derive the calculation subject from the sites of one client in one market.
#[instrument(skip_all, fields(client = client_name, market = %market))]
pub fn select_subject(
    records: &[SiteRecord],
    client_name: &str,
    market: Market,
    selection: &SiteSelection,
) -> Result<Subject, CalculationError> {
    let sites = records
        .iter()
        .filter(|record| record.client_name == client_name && record.market() == market)
        .collect_vec();
    if sites.is_empty() {
        return Err(CalculationError::missing_data(format!(
            "no sites for client `{client_name}` in {market}",
        )));
    }

    let subject = match selection {
        SiteSelection::Aggregate => aggregate(&sites),
        SiteSelection::Site(site_id) => {
            let site =
                sites.iter().find(|record| &record.site_id == site_id).ok_or_else(|| {
                    CalculationError::missing_data(format!(
                        "client `{client_name}` has no site `{site_id}` in {market}",
                    ))
                })?;
            Some(Subject {
                consumption: site.consumption,
                admin_fee: site.admin_fee,
                contract_start: Some(site.contract_start_date),
                site_ids: vec![site.site_id.clone()],
            })
        }
    }
    .ok_or_else(|| CalculationError::missing_data("no sites to aggregate"))?;

    info!(
        n_sites = subject.site_ids.len(),
        contract_start = ?subject.contract_start,
        admin_fee = %subject.admin_fee,
        "selected",
    );
    Ok(subject)
}

/// Sum of volumes, earliest contract start, and mean admin fee.
fn aggregate(sites: &[&SiteRecord]) -> Option<Subject> {
    let contract_start = sites.iter().map(|site| site.contract_start_date).min()?;
    #[allow(clippy::cast_precision_loss)]
    let admin_fee = sites.iter().map(|site| site.admin_fee).sum::<Rate>() / sites.len() as f64;
    Some(Subject {
        consumption: sites.iter().map(|site| site.consumption).sum(),
        admin_fee,
        contract_start: Some(contract_start),
        site_ids: sites.iter().map(|site| site.site_id.clone()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{core::rate_table::tests::date, quantity::volume::Volume};

    const ALBERTA_GAS: Market = Market::new(Jurisdiction::Alberta, Commodity::Gas);

    fn site(
        client_name: &str,
        site_id: &str,
        province: Jurisdiction,
        start: NaiveDate,
        admin_fee: f64,
        january: f64,
    ) -> SiteRecord {
        let mut volumes = [10.0; 12];
        volumes[0] = january;
        SiteRecord {
            client_name: client_name.to_string(),
            site_id: site_id.to_string(),
            province,
            commodity: Commodity::Gas,
            contract_start_date: start,
            admin_fee: Rate::from(admin_fee),
            consumption: ConsumptionProfile::try_from_slice(&volumes).unwrap(),
        }
    }

    fn records() -> Vec<SiteRecord> {
        vec![
            site("Acme", "Site 001", Jurisdiction::Alberta, date(2022, 5, 1), 2.0, 100.0),
            site("Acme", "Site 002", Jurisdiction::Alberta, date(2021, 9, 15), 3.0, 150.0),
            site("Acme", "Site 003", Jurisdiction::Ontario, date(2020, 1, 1), 9.0, 999.0),
            site("Other", "Site 004", Jurisdiction::Alberta, date(2019, 1, 1), 7.0, 500.0),
        ]
    }

    #[test]
    fn test_aggregate() {
        let subject =
            select_subject(&records(), "Acme", ALBERTA_GAS, &SiteSelection::Aggregate).unwrap();
        assert_eq!(subject.consumption.get(1).unwrap(), Volume::from(250.0));
        assert_eq!(subject.consumption.get(2).unwrap(), Volume::from(20.0));
        assert_abs_diff_eq!(subject.admin_fee.into_inner(), 2.5);
        assert_eq!(subject.contract_start, Some(date(2021, 9, 15)));
        assert_eq!(subject.site_ids, ["Site 001", "Site 002"]);
    }

    #[test]
    fn test_single_site() {
        let selection = SiteSelection::Site("Site 001".to_string());
        let subject = select_subject(&records(), "Acme", ALBERTA_GAS, &selection).unwrap();
        assert_eq!(subject.consumption.get(1).unwrap(), Volume::from(100.0));
        assert_abs_diff_eq!(subject.admin_fee.into_inner(), 2.0);
        assert_eq!(subject.contract_start, Some(date(2022, 5, 1)));
    }

    #[test]
    fn test_site_of_other_market() {
        let selection = SiteSelection::Site("Site 003".to_string());
        let error = select_subject(&records(), "Acme", ALBERTA_GAS, &selection).unwrap_err();
        assert!(matches!(error, CalculationError::MissingData(_)));
    }

    #[test]
    fn test_unknown_client() {
        let error = select_subject(&records(), "Nobody", ALBERTA_GAS, &SiteSelection::Aggregate)
            .unwrap_err();
        assert!(matches!(error, CalculationError::MissingData(_)));
    }
}
