//! CSV sources: the historical rate series and the client tables.

pub mod profiles;
pub mod rates;
pub mod sites;

use chrono::{NaiveDate, NaiveDateTime};

use crate::prelude::*;

/// Parse a plain `%Y-%m-%d` date, also accepting a trailing time of day.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|date_time| date_time.date())
        })
        .with_context(|| format!("`{value}` is not a date"))
}

/// Parse an optional numeric cell: empty cells are absent.
fn parse_cell(value: &str) -> Result<Option<f64>> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    value.parse().map(Some).with_context(|| format!("`{value}` is not a number"))
}
