use std::{fs::File, io::Read, path::Path};

use serde::{Deserialize, Deserializer};

use crate::{
    core::{
        consumption::ConsumptionProfile,
        error::CalculationError,
        market::{Commodity, Jurisdiction},
        portfolio::SiteRecord,
    },
    io::parse_date,
    prelude::*,
    quantity::rate::Rate,
};

/// Row of the client site table, one per site and market.
#[derive(Deserialize)]
struct SiteRow {
    client_name: String,

    #[serde(rename = "site_ID", deserialize_with = "deserialize_site_id")]
    site_id: String,

    province: Jurisdiction,
    commodity: Commodity,
    contract_start_date: String,
    client_admin_fee: f64,

    #[serde(rename = "January")]
    january: f64,
    #[serde(rename = "February")]
    february: f64,
    #[serde(rename = "March")]
    march: f64,
    #[serde(rename = "April")]
    april: f64,
    #[serde(rename = "May")]
    may: f64,
    #[serde(rename = "June")]
    june: f64,
    #[serde(rename = "July")]
    july: f64,
    #[serde(rename = "August")]
    august: f64,
    #[serde(rename = "September")]
    september: f64,
    #[serde(rename = "October")]
    october: f64,
    #[serde(rename = "November")]
    november: f64,
    #[serde(rename = "December")]
    december: f64,
}

/// Site identifiers are sometimes exported as floats (`3.0`).
fn deserialize_site_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let site_id = String::deserialize(deserializer)?;
    Ok(site_id.strip_suffix(".0").map_or_else(|| site_id.clone(), str::to_string))
}

impl TryFrom<SiteRow> for SiteRecord {
    type Error = Error;

    fn try_from(row: SiteRow) -> Result<Self> {
        let consumption = ConsumptionProfile::try_from_slice(&[
            row.january,
            row.february,
            row.march,
            row.april,
            row.may,
            row.june,
            row.july,
            row.august,
            row.september,
            row.october,
            row.november,
            row.december,
        ])?;
        Ok(Self {
            contract_start_date: parse_date(&row.contract_start_date)?,
            admin_fee: Rate::from(row.client_admin_fee),
            client_name: row.client_name,
            site_id: row.site_id,
            province: row.province,
            commodity: row.commodity,
            consumption,
        })
    }
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_site_table(path: &Path) -> Result<Vec<SiteRecord>> {
    let file = File::open(path)
        .map_err(|error| CalculationError::missing_data(format!("{}: {error}", path.display())))?;
    let records = read_sites(file)
        .with_context(|| format!("failed to read client sites from `{}`", path.display()))?;
    info!(n_sites = records.len(), "loaded client sites");
    Ok(records)
}

pub fn read_sites<R: Read>(reader: R) -> Result<Vec<SiteRecord>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    reader
        .deserialize::<SiteRow>()
        .enumerate()
        .map(|(index, row)| {
            let line = index + 2;
            row.map_err(Error::from)
                .and_then(SiteRecord::try_from)
                .with_context(|| format!("line {line}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::rate_table::tests::date;

    const SITES: &str = "\
client_name,site_ID,province,commodity,contract_start_date,client_admin_fee,January,February,March,April,May,June,July,August,September,October,November,December
Acme,1,Alberta,gas,2022-05-01,2.0,100,90,80,70,60,50,40,30,20,10,0,5
Acme,2.0,AB,natural gas,2021-11-15 00:00:00,3.0,150,0,0,0,0,0,0,0,0,0,0,0
Beta,1,Quebec,gas,2023-01-01,1.5,1,1,1,1,1,1,1,1,1,1,1,1
";

    #[test]
    fn test_read_sites() {
        let records = read_sites(SITES.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);

        let second = &records[1];
        assert_eq!(second.site_id, "2");
        assert_eq!(second.province, Jurisdiction::Alberta);
        assert_eq!(second.commodity, Commodity::Gas);
        assert_eq!(second.contract_start_date, date(2021, 11, 15));
        assert_abs_diff_eq!(second.admin_fee.into_inner(), 3.0);
        assert_abs_diff_eq!(second.consumption.get(1).unwrap().into_inner(), 150.0);
        assert_abs_diff_eq!(records[0].consumption.total().into_inner(), 555.0);
    }

    #[test]
    fn test_negative_volume() {
        let sites = SITES.replace("2023-01-01,1.5,1,", "2023-01-01,1.5,-1,");
        let error = read_sites(sites.as_bytes()).unwrap_err();
        assert!(format!("{error:#}").contains("line 4"));
    }

    #[test]
    fn test_missing_month_column() {
        assert!(read_sites("client_name,site_ID\nAcme,1\n".as_bytes()).is_err());
    }
}
