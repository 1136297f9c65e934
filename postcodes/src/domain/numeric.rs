//! Number-or-string arguments.
//!
//! Coordinates and distances often arrive as text (query strings, CLI args,
//! form fields). `NumericArg` accepts either form and parses in one place, so
//! an unparseable value is reported before any other work happens.

use std::fmt;

/// Error returned when an argument is not a decimal number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{value:?} is not a number")]
pub struct InvalidNumber {
    pub value: String,
}

/// A numeric argument given either as a number or as text to be parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericArg {
    Number(f64),
    Text(String),
}

impl NumericArg {
    /// Parse to an `f64`.
    ///
    /// Text is trimmed before parsing. NaN is rejected in either form.
    /// Infinities parse; range checks belong to the value they build.
    pub fn parse(&self) -> Result<f64, InvalidNumber> {
        let value = match self {
            NumericArg::Number(n) => *n,
            NumericArg::Text(s) => s.trim().parse::<f64>().map_err(|_| InvalidNumber {
                value: s.clone(),
            })?,
        };

        if value.is_nan() {
            return Err(InvalidNumber {
                value: self.to_string(),
            });
        }

        Ok(value)
    }
}

impl fmt::Display for NumericArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericArg::Number(n) => write!(f, "{n}"),
            NumericArg::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for NumericArg {
    fn from(n: f64) -> Self {
        NumericArg::Number(n)
    }
}

impl From<f32> for NumericArg {
    fn from(n: f32) -> Self {
        NumericArg::Number(f64::from(n))
    }
}

impl From<i32> for NumericArg {
    fn from(n: i32) -> Self {
        NumericArg::Number(f64::from(n))
    }
}

impl From<u32> for NumericArg {
    fn from(n: u32) -> Self {
        NumericArg::Number(f64::from(n))
    }
}

impl From<&str> for NumericArg {
    fn from(s: &str) -> Self {
        NumericArg::Text(s.to_string())
    }
}

impl From<String> for NumericArg {
    fn from(s: String) -> Self {
        NumericArg::Text(s)
    }
}

impl From<&String> for NumericArg {
    fn from(s: &String) -> Self {
        NumericArg::Text(s.clone())
    }
}
