use std::{
    collections::BTreeMap,
    ops::{Add, Div},
};

use chrono::{Datelike, Days, NaiveDate};

pub trait MonthStart {
    /// First calendar day of the month.
    #[must_use]
    fn month_start(&self) -> NaiveDate;
}

impl MonthStart for NaiveDate {
    fn month_start(&self) -> NaiveDate {
        *self - Days::new(u64::from(self.day0()))
    }
}

impl<T> AverageMonthly for T where T: ?Sized {}

pub trait AverageMonthly {
    /// Arithmetic mean of the values per calendar month, keyed by the month start.
    ///
    /// Months without observations are absent.
    fn average_monthly<V>(self) -> BTreeMap<NaiveDate, V>
    where
        Self: Sized + Iterator<Item = (NaiveDate, V)>,
        V: Copy + Add<V, Output = V> + Div<f64, Output = V>,
    {
        let mut sums: BTreeMap<NaiveDate, (V, u32)> = BTreeMap::new();
        for (date, value) in self {
            sums.entry(date.month_start())
                .and_modify(|(sum, weight)| {
                    *sum = *sum + value;
                    *weight += 1;
                })
                .or_insert((value, 1));
        }
        sums.into_iter().map(|(month, (sum, weight))| (month, sum / f64::from(weight))).collect()
    }
}
