use enumset::EnumSet;
use serde::{Deserialize, Serialize};

use crate::{
    core::{error::CalculationError, rate_table::UtilityColumn},
    quantity::rate::PriceUnit,
};

#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    derive_more::Display,
)]
pub enum Jurisdiction {
    /// Regulated-rate market.
    #[serde(alias = "AB")]
    Alberta,

    /// Two local delivery zones for gas.
    #[serde(alias = "ON")]
    Ontario,

    #[serde(alias = "QC")]
    Quebec,
}

#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Commodity {
    #[display("gas")]
    #[serde(alias = "natural gas")]
    Gas,

    #[display("electricity")]
    #[serde(alias = "ele")]
    Electricity,
}

/// Local delivery zone of a multi-zone jurisdiction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, derive_more::Display)]
pub enum Zone {
    /// Enbridge Gas Distribution.
    #[display("EGD")]
    Egd,

    #[display("Union South")]
    UnionSouth,
}

/// Which rate column serves as the utility comparator.
#[derive(Copy, Clone, Debug)]
enum UtilitySource {
    Single(UtilityColumn),
    Zoned { egd: UtilityColumn, union_south: UtilityColumn },
}

/// Everything that depends on the jurisdiction and commodity alone.
#[derive(Copy, Clone, Debug)]
struct Rule {
    utility: UtilitySource,
    price_unit: PriceUnit,
    volume_unit: &'static str,
    file_name: &'static str,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, derive_more::Display)]
#[display("{jurisdiction} {commodity}")]
pub struct Market {
    pub jurisdiction: Jurisdiction,
    pub commodity: Commodity,
}

impl Market {
    pub const fn new(jurisdiction: Jurisdiction, commodity: Commodity) -> Self {
        Self { jurisdiction, commodity }
    }

    fn rule(self) -> Result<Rule, CalculationError> {
        match (self.jurisdiction, self.commodity) {
            (Jurisdiction::Alberta, Commodity::Gas) => Ok(Rule {
                utility: UtilitySource::Single(UtilityColumn::Regulated),
                price_unit: PriceUnit::Dollars,
                volume_unit: "GJ",
                file_name: "historical_data_AB_gas.csv",
            }),
            (Jurisdiction::Alberta, Commodity::Electricity) => Ok(Rule {
                utility: UtilitySource::Single(UtilityColumn::Regulated),
                price_unit: PriceUnit::Dollars,
                volume_unit: "GJ",
                file_name: "historical_data_AB_ele.csv",
            }),
            (Jurisdiction::Ontario, Commodity::Gas) => Ok(Rule {
                utility: UtilitySource::Zoned {
                    egd: UtilityColumn::LocalEgd,
                    union_south: UtilityColumn::LocalUnionSouth,
                },
                price_unit: PriceUnit::Cents,
                volume_unit: "m³",
                file_name: "historical_data_ON_gas.csv",
            }),
            (Jurisdiction::Quebec, Commodity::Gas) => Ok(Rule {
                utility: UtilitySource::Single(UtilityColumn::Utility),
                price_unit: PriceUnit::Cents,
                volume_unit: "m³",
                file_name: "historical_data_QC_gas.csv",
            }),
            (jurisdiction, commodity) => Err(CalculationError::UnsupportedCombination {
                jurisdiction,
                commodity,
                reason: "no utility rate or unit convention is defined",
            }),
        }
    }

    /// Pick the rate column that represents the utility price.
    ///
    /// Multi-zone markets require an explicit zone, there is no default.
    pub fn utility_column(self, zone: Option<Zone>) -> Result<UtilityColumn, CalculationError> {
        match self.rule()?.utility {
            UtilitySource::Single(column) => Ok(column),
            UtilitySource::Zoned { egd, union_south } => match zone {
                Some(Zone::Egd) => Ok(egd),
                Some(Zone::UnionSouth) => Ok(union_south),
                None => Err(CalculationError::UnsupportedCombination {
                    jurisdiction: self.jurisdiction,
                    commodity: self.commodity,
                    reason: "a delivery zone must be chosen",
                }),
            },
        }
    }

    /// Columns the rate file of this market must carry besides `date` and `wholesale_rate`.
    pub fn required_columns(self) -> Result<EnumSet<UtilityColumn>, CalculationError> {
        Ok(match self.rule()?.utility {
            UtilitySource::Single(column) => EnumSet::only(column),
            UtilitySource::Zoned { egd, union_south } => egd | union_south,
        })
    }

    pub fn price_unit(self) -> Result<PriceUnit, CalculationError> {
        Ok(self.rule()?.price_unit)
    }

    pub fn volume_unit(self) -> Result<&'static str, CalculationError> {
        Ok(self.rule()?.volume_unit)
    }

    /// Conventional name of the historical rate file.
    pub fn rates_file_name(self) -> Result<&'static str, CalculationError> {
        Ok(self.rule()?.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALBERTA_GAS: Market = Market::new(Jurisdiction::Alberta, Commodity::Gas);
    const ONTARIO_GAS: Market = Market::new(Jurisdiction::Ontario, Commodity::Gas);
    const QUEBEC_GAS: Market = Market::new(Jurisdiction::Quebec, Commodity::Gas);

    #[test]
    fn test_regulated_market_ignores_zone() {
        assert_eq!(ALBERTA_GAS.utility_column(None).unwrap(), UtilityColumn::Regulated);
        assert_eq!(ALBERTA_GAS.utility_column(Some(Zone::Egd)).unwrap(), UtilityColumn::Regulated);
        let alberta_electricity = Market::new(Jurisdiction::Alberta, Commodity::Electricity);
        assert_eq!(alberta_electricity.utility_column(None).unwrap(), UtilityColumn::Regulated);
    }

    #[test]
    fn test_zoned_market() {
        assert_eq!(ONTARIO_GAS.utility_column(Some(Zone::Egd)).unwrap(), UtilityColumn::LocalEgd);
        assert_eq!(
            ONTARIO_GAS.utility_column(Some(Zone::UnionSouth)).unwrap(),
            UtilityColumn::LocalUnionSouth,
        );
    }

    #[test]
    fn test_zoned_market_requires_zone() {
        let error = ONTARIO_GAS.utility_column(None).unwrap_err();
        assert!(error.is_configuration_gap());
    }

    #[test]
    fn test_single_zone_market() {
        assert_eq!(QUEBEC_GAS.utility_column(None).unwrap(), UtilityColumn::Utility);
    }

    #[test]
    fn test_unsupported_combination() {
        for market in [
            Market::new(Jurisdiction::Ontario, Commodity::Electricity),
            Market::new(Jurisdiction::Quebec, Commodity::Electricity),
        ] {
            assert!(matches!(
                market.utility_column(Some(Zone::Egd)),
                Err(CalculationError::UnsupportedCombination { .. })
            ));
            assert!(market.price_unit().is_err());
        }
    }

    #[test]
    fn test_price_units() {
        assert_eq!(ALBERTA_GAS.price_unit().unwrap(), PriceUnit::Dollars);
        assert_eq!(ONTARIO_GAS.price_unit().unwrap(), PriceUnit::Cents);
        assert_eq!(QUEBEC_GAS.price_unit().unwrap(), PriceUnit::Cents);
    }

    #[test]
    fn test_required_columns() {
        let columns = ONTARIO_GAS.required_columns().unwrap();
        assert!(columns.contains(UtilityColumn::LocalEgd));
        assert!(columns.contains(UtilityColumn::LocalUnionSouth));
        assert_eq!(columns.len(), 2);
    }
}
