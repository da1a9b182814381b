use serde::Serialize;

use crate::{core::error::CalculationError, quantity::volume::Volume};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Volume per calendar month number.
///
/// The same 12-month pattern repeats for every year of the analysed range:
/// there is no year-specific consumption.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, derive_more::From)]
#[serde(transparent)]
pub struct ConsumptionProfile([Volume; 12]);

impl ConsumptionProfile {
    pub fn try_from_slice(volumes: &[f64]) -> Result<Self, CalculationError> {
        let volumes: [f64; 12] = volumes.try_into().map_err(|_| {
            CalculationError::missing_data(format!(
                "expected 12 monthly volumes, got {}",
                volumes.len(),
            ))
        })?;
        if let Some(negative) = volumes.iter().find(|volume| **volume < 0.0 || volume.is_nan()) {
            return Err(CalculationError::missing_data(format!(
                "monthly volume must be non-negative, got {negative}",
            )));
        }
        Ok(Self(volumes.map(Volume::from)))
    }

    /// Volume for the month number `1..=12`.
    pub fn get(&self, month: u32) -> Result<Volume, CalculationError> {
        month
            .checked_sub(1)
            .and_then(|index| self.0.get(index as usize))
            .copied()
            .ok_or(CalculationError::InvalidMonth(month))
    }

    pub fn total(&self) -> Volume {
        self.0.iter().copied().sum()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|volume| *volume == Volume::ZERO)
    }

    /// The annual total spread equally over the twelve months.
    pub fn redistributed(&self) -> Self {
        Self([self.total() / 12.0; 12])
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Volume)> {
        (1..=12).zip(self.0)
    }
}

impl std::ops::Add for ConsumptionProfile {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs += rhs;
        }
        self
    }
}

impl std::iter::Sum for ConsumptionProfile {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |sum, profile| sum + profile)
    }
}
