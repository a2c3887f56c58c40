//! Byte counts as human-readable sizes.

use crate::core::number::format_not_finite;
use crate::domain::model::{Number, SizeStyle};
use crate::utils::error::Result;
use crate::utils::printf::Printf;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_SIZE_FORMAT: &str = "%.1f";

/// Options for [`naturalsize_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOptions {
    #[serde(default)]
    pub style: SizeStyle,
    /// printf format for the scaled value.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    DEFAULT_SIZE_FORMAT.to_string()
}

impl Default for SizeOptions {
    fn default() -> Self {
        Self {
            style: SizeStyle::Decimal,
            format: default_format(),
        }
    }
}

impl SizeOptions {
    pub fn binary() -> Self {
        Self {
            style: SizeStyle::Binary,
            ..Self::default()
        }
    }

    pub fn gnu() -> Self {
        Self {
            style: SizeStyle::Gnu,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }
}

/// `3_000_000 → "3.0 MB"` with decimal suffixes.
pub fn naturalsize(value: impl Into<Number>) -> String {
    match Printf::single(DEFAULT_SIZE_FORMAT) {
        Ok(format) => size_in(value.into(), SizeStyle::Decimal, &format),
        Err(_) => value.into().to_string(),
    }
}

pub fn naturalsize_with(value: impl Into<Number>, options: &SizeOptions) -> Result<String> {
    let format = Printf::single(&options.format)?;
    Ok(size_in(value.into(), options.style, &format))
}

/// Parse a byte count from text, then format it.
pub fn naturalsize_str(value: &str, options: &SizeOptions) -> Result<String> {
    let number: Number = value.parse()?;
    crate::naturalsize_with(number, options)
}

/// `base^exponent` as the nearest `f64`.
pub(crate) fn divisor(style: SizeStyle, exponent: usize) -> f64 {
    let base: u128 = match style {
        SizeStyle::Decimal => 1000,
        SizeStyle::Binary | SizeStyle::Gnu => 1024,
    };
    base.pow(exponent as u32) as f64
}

/// Integer part of a byte count, the way `%d` renders it.
pub(crate) fn whole_bytes(number: Number) -> String {
    match number {
        Number::Int(n) => n.to_string(),
        Number::Float(v) => format!("{:.0}", v.trunc()),
    }
}

/// Index into the suffix table, at least 1.
pub(crate) fn size_exponent(abs_bytes: f64, style: SizeStyle) -> usize {
    let suffixes = style.suffixes().len();
    let exponent = (abs_bytes.ln() / style.base().ln()).min(suffixes as f64) as usize;
    exponent.max(1)
}

fn size_in(number: Number, style: SizeStyle, format: &Printf) -> String {
    if !number.is_finite() {
        return format_not_finite(number.as_f64());
    }
    let bytes = number.as_f64();
    let abs_bytes = bytes.abs();
    let gnu = style == SizeStyle::Gnu;

    if abs_bytes == 1.0 && !gnu {
        return format!("{} Byte", whole_bytes(number));
    }
    if abs_bytes < style.base() {
        return if gnu {
            format!("{}B", whole_bytes(number))
        } else {
            format!("{} Bytes", whole_bytes(number))
        };
    }

    let exponent = size_exponent(abs_bytes, style);
    format!(
        "{}{}",
        format.apply(bytes / divisor(style, exponent)),
        style.suffixes()[exponent - 1]
    )
}
