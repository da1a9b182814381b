mod average;

pub use self::average::AverageMonthly;
