use std::fmt::{Display, Formatter};

/// Number with two decimals and `,` as the thousands separator.
pub struct Thousands(pub f64);

impl Display for Thousands {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let formatted = format!("{:.2}", self.0);
        let (integer, fraction) = formatted.split_once('.').unwrap_or((&formatted, "00"));
        let (sign, digits) = match integer.strip_prefix('-') {
            Some(digits) => ("-", digits),
            None => ("", integer),
        };
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, digit) in digits.chars().enumerate() {
            if i != 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        write!(f, "{sign}{grouped}.{fraction}")
    }
}

/// Month label as in `Jan 2023`.
pub struct MonthLabel(pub chrono::NaiveDate);

impl Display for MonthLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%b %Y"))
    }
}
