use crate::utils::error::{HumanizeError, Result};
use crate::utils::printf::float_repr;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numeric input to the formatters.
///
/// Integers stay exact up to `i128`; everything else is carried as `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i128),
    Float(f64),
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Self {
                    Number::Int(value as i128)
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(v) => v,
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Number::Int(_) => true,
            Number::Float(v) => v.is_finite(),
        }
    }

    /// The value truncated toward zero, if it fits in an `i128`.
    pub fn truncate(self) -> Option<i128> {
        match self {
            Number::Int(n) => Some(n),
            Number::Float(v) if v.is_finite() && v.abs() < 1.0e38 => Some(v.trunc() as i128),
            Number::Float(_) => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(v) => f.write_str(&float_repr(*v)),
        }
    }
}

impl FromStr for Number {
    type Err = HumanizeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => return Err(HumanizeError::invalid_input(s, "empty string")),
            "nan" | "+nan" | "-nan" => return Ok(Number::Float(f64::NAN)),
            "inf" | "+inf" | "infinity" | "+infinity" => return Ok(Number::Float(f64::INFINITY)),
            "-inf" | "-infinity" => return Ok(Number::Float(f64::NEG_INFINITY)),
            _ => {}
        }

        if let Ok(n) = trimmed.parse::<i128>() {
            return Ok(Number::Int(n));
        }
        trimmed
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| HumanizeError::invalid_input(s, "not a number"))
    }
}

/// Time units, ordered from the smallest to the largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

impl Unit {
    pub const ALL: [Unit; 8] = [
        Unit::Microseconds,
        Unit::Milliseconds,
        Unit::Seconds,
        Unit::Minutes,
        Unit::Hours,
        Unit::Days,
        Unit::Months,
        Unit::Years,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Unit::Microseconds => "microseconds",
            Unit::Milliseconds => "milliseconds",
            Unit::Seconds => "seconds",
            Unit::Minutes => "minutes",
            Unit::Hours => "hours",
            Unit::Days => "days",
            Unit::Months => "months",
            Unit::Years => "years",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = HumanizeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Unit::ALL
            .into_iter()
            .find(|unit| unit.name() == wanted)
            .ok_or_else(|| HumanizeError::invalid_input(s, "unknown time unit"))
    }
}

/// Grammatical gender used for ordinal suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub(crate) fn context_suffix(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Unit family used by file size formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeStyle {
    /// `kB`, `MB`, ... with base 1000.
    #[default]
    Decimal,
    /// `KiB`, `MiB`, ... with base 1024.
    Binary,
    /// `K`, `M`, ... with base 1024 and no space, like `ls -h`.
    Gnu,
}

impl SizeStyle {
    pub fn base(self) -> f64 {
        match self {
            SizeStyle::Decimal => 1000.0,
            SizeStyle::Binary | SizeStyle::Gnu => 1024.0,
        }
    }

    pub fn suffixes(self) -> &'static [&'static str; 10] {
        match self {
            SizeStyle::Decimal => &SUFFIXES_DECIMAL,
            SizeStyle::Binary => &SUFFIXES_BINARY,
            SizeStyle::Gnu => &SUFFIXES_GNU,
        }
    }
}

pub static SUFFIXES_DECIMAL: [&str; 10] = [
    " kB", " MB", " GB", " TB", " PB", " EB", " ZB", " YB", " RB", " QB",
];
pub static SUFFIXES_BINARY: [&str; 10] = [
    " KiB", " MiB", " GiB", " TiB", " PiB", " EiB", " ZiB", " YiB", " RiB", " QiB",
];
pub static SUFFIXES_GNU: [&str; 10] = ["K", "M", "G", "T", "P", "E", "Z", "Y", "R", "Q"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_parsing() {
        assert_eq!("1234".parse::<Number>().unwrap(), Number::Int(1234));
        assert_eq!(" -12 ".parse::<Number>().unwrap(), Number::Int(-12));
        assert_eq!("12.5".parse::<Number>().unwrap(), Number::Float(12.5));
        assert_eq!("1e3".parse::<Number>().unwrap(), Number::Float(1000.0));
        assert!("NaN".parse::<Number>().unwrap().as_f64().is_nan());
        assert_eq!(
            "-inf".parse::<Number>().unwrap(),
            Number::Float(f64::NEG_INFINITY)
        );
        assert!("twelve".parse::<Number>().is_err());
        assert!("".parse::<Number>().is_err());
    }

    #[test]
    fn test_number_truncate() {
        assert_eq!(Number::Float(-3.9).truncate(), Some(-3));
        assert_eq!(Number::Float(f64::NAN).truncate(), None);
        assert_eq!(Number::Float(1e300).truncate(), None);
        assert_eq!(Number::from(7u8).truncate(), Some(7));
    }

    #[test]
    fn test_unit_order_and_parse() {
        assert!(Unit::Microseconds < Unit::Seconds);
        assert!(Unit::Years > Unit::Months);
        assert_eq!("HOURS".parse::<Unit>().unwrap(), Unit::Hours);
        assert!("fortnights".parse::<Unit>().is_err());
    }

    #[test]
    fn test_size_style() {
        assert_eq!(SizeStyle::Binary.base(), 1024.0);
        assert_eq!(SizeStyle::Decimal.suffixes()[0], " kB");
        assert_eq!(SizeStyle::Gnu.suffixes()[9], "Q");
    }
}
