use std::{collections::BTreeMap, fs::File, io::Read, path::Path};

use csv::StringRecord;
use enumset::EnumSet;

use crate::{
    core::{
        error::CalculationError,
        rate_table::{RateObservation, RateTable, UtilityColumn},
    },
    io::{parse_cell, parse_date},
    prelude::*,
    quantity::rate::Rate,
};

const DATE_COLUMN: &str = "date";
const WHOLESALE_COLUMN: &str = "wholesale_rate";

/// Read a historical rate file, failing fast when any of `required` is absent.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_rate_table(path: &Path, required: EnumSet<UtilityColumn>) -> Result<RateTable> {
    let file = File::open(path)
        .map_err(|error| CalculationError::missing_data(format!("{}: {error}", path.display())))?;
    let table = read_rates(file, required)
        .with_context(|| format!("failed to read rates from `{}`", path.display()))?;
    info!(
        n_observations = table.observations().len(),
        columns = ?table.columns(),
        "loaded rates",
    );
    Ok(table)
}

/// Header-driven reader: unknown columns are ignored, empty cells are absent.
pub fn read_rates<R: Read>(reader: R, required: EnumSet<UtilityColumn>) -> Result<RateTable> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();
    let layout = Layout::try_from_headers(&headers, required)?;

    let mut observations = Vec::new();
    let mut n_skipped = 0_usize;
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = index + 2;
        match layout.parse(&record).with_context(|| format!("line {line}"))? {
            Some(observation) => observations.push(observation),
            None => n_skipped += 1,
        }
    }
    if n_skipped != 0 {
        warn!(n_skipped, "rows without a wholesale rate are skipped");
    }
    Ok(RateTable::new(layout.utility_columns.keys().copied().collect(), observations))
}

/// Column positions of one rate file.
struct Layout {
    date: usize,
    wholesale_rate: usize,
    utility_columns: BTreeMap<UtilityColumn, usize>,
}

impl Layout {
    fn try_from_headers(
        headers: &StringRecord,
        required: EnumSet<UtilityColumn>,
    ) -> Result<Self, CalculationError> {
        let position = |name: &str| headers.iter().position(|header| header == name);
        let utility_columns: BTreeMap<_, _> = headers
            .iter()
            .enumerate()
            .filter_map(|(index, header)| {
                UtilityColumn::from_column_name(header).map(|column| (column, index))
            })
            .collect();

        let mut missing = Vec::new();
        let date = position(DATE_COLUMN);
        let wholesale_rate = position(WHOLESALE_COLUMN);
        if date.is_none() {
            missing.push(DATE_COLUMN.to_string());
        }
        if wholesale_rate.is_none() {
            missing.push(WHOLESALE_COLUMN.to_string());
        }
        missing.extend(
            required
                .iter()
                .filter(|column| !utility_columns.contains_key(column))
                .map(|column| column.to_string()),
        );
        match (date, wholesale_rate) {
            (Some(date), Some(wholesale_rate)) if missing.is_empty() => {
                Ok(Self { date, wholesale_rate, utility_columns })
            }
            _ => Err(CalculationError::missing_data(format!(
                "rate file lacks column(s): {}",
                missing.join(", "),
            ))),
        }
    }

    fn parse(&self, record: &StringRecord) -> Result<Option<RateObservation>> {
        let cell = |index: usize| record.get(index).unwrap_or_default();
        let date = parse_date(cell(self.date))?;
        let Some(wholesale_rate) = parse_cell(cell(self.wholesale_rate))? else {
            return Ok(None);
        };
        let mut utility_rates = BTreeMap::new();
        for (column, index) in &self.utility_columns {
            if let Some(rate) = parse_cell(cell(*index)).with_context(|| format!("`{column}`"))? {
                utility_rates.insert(*column, Rate::from(rate));
            }
        }
        Ok(Some(RateObservation { date, wholesale_rate: Rate::from(wholesale_rate), utility_rates }))
    }
}
