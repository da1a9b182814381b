use std::{fs::File, io::Read, path::Path};

use crate::{
    core::{
        consumption::{ConsumptionProfile, MONTH_NAMES},
        error::CalculationError,
    },
    io::parse_cell,
    prelude::*,
};

const CLIENT_NAME_COLUMN: &str = "client_name";

/// Consumption of a single-site client, one row per client.
#[derive(Clone, Debug)]
pub struct ClientProfile {
    pub client_name: String,
    pub consumption: ConsumptionProfile,
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_client_profile_table(path: &Path) -> Result<Vec<ClientProfile>> {
    let file = File::open(path)
        .map_err(|error| CalculationError::missing_data(format!("{}: {error}", path.display())))?;
    let profiles = read_client_profiles(file)
        .with_context(|| format!("failed to read client profiles from `{}`", path.display()))?;
    info!(n_clients = profiles.len(), "loaded client profiles");
    Ok(profiles)
}

pub fn read_client_profiles<R: Read>(reader: R) -> Result<Vec<ClientProfile>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();
    let position = |name: &str| headers.iter().position(|header| header == name);

    let missing = [CLIENT_NAME_COLUMN]
        .into_iter()
        .chain(MONTH_NAMES)
        .filter(|name| position(name).is_none())
        .collect::<Vec<_>>();
    let months = MONTH_NAMES.map(position).into_iter().collect::<Option<Vec<_>>>();
    let (Some(client_name), Some(months)) = (position(CLIENT_NAME_COLUMN), months) else {
        return Err(CalculationError::missing_data(format!(
            "client profile table lacks column(s): {}",
            missing.join(", "),
        ))
        .into());
    };

    let mut profiles = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = index + 2;
        let volumes = months
            .iter()
            .zip(MONTH_NAMES)
            .map(|(column, name)| {
                parse_cell(record.get(*column).unwrap_or_default())?
                    .with_context(|| format!("no `{name}` volume"))
            })
            .collect::<Result<Vec<f64>>>()
            .with_context(|| format!("line {line}"))?;
        profiles.push(ClientProfile {
            client_name: record.get(client_name).unwrap_or_default().to_string(),
            consumption: ConsumptionProfile::try_from_slice(&volumes)
                .with_context(|| format!("line {line}"))?,
        });
    }
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const PROFILES: &str = "\
client_name,January,February,March,April,May,June,July,August,September,October,November,December
Acme,100,90,80,70,60,50,40,30,20,10,0,5
Beta,1,1,1,1,1,1,1,1,1,1,1,1
";

    #[test]
    fn test_read_client_profiles() {
        let profiles = read_client_profiles(PROFILES.as_bytes()).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].client_name, "Acme");
        assert_abs_diff_eq!(profiles[0].consumption.get(1).unwrap().into_inner(), 100.0);
        assert_abs_diff_eq!(profiles[1].consumption.total().into_inner(), 12.0);
    }

    #[test]
    fn test_missing_month_column() {
        let error = read_client_profiles("client_name,January\nAcme,1\n".as_bytes()).unwrap_err();
        let error = error.downcast::<CalculationError>().unwrap();
        assert!(matches!(error, CalculationError::MissingData(_)));
        assert!(error.to_string().contains("December"));
    }

    #[test]
    fn test_empty_volume() {
        let profiles = PROFILES.replace("Beta,1,", "Beta,,");
        let error = read_client_profiles(profiles.as_bytes()).unwrap_err();
        let message = format!("{error:#}");
        assert!(message.contains("line 3"));
        assert!(message.contains("January"));
    }
}
