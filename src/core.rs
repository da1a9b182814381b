pub mod calculator;
pub mod comparison;
pub mod consumption;
pub mod error;
pub mod hedge;
pub mod market;
pub mod portfolio;
pub mod rate_table;
pub mod report;
pub mod series;
