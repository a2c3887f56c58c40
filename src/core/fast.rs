//! Accelerated `intcomma`, `intword` and `naturalsize`.
//!
//! Drop-in replacements for the reference formatters. Integers are grouped
//! from a digit buffer instead of a regex loop, default formats are parsed
//! once per process, and scale thresholds come from precomputed tables.
//! Output must match the reference implementations byte for byte.

use crate::core::filesize::{size_exponent, whole_bytes, SizeOptions, DEFAULT_SIZE_FORMAT};
use crate::core::locale::translator;
use crate::core::number::{
    format_not_finite, integer_string, plain_decimal, power_word, split_magnitude,
    DEFAULT_WORD_FORMAT, POWERS, POWER_EXPONENTS,
};
use crate::domain::model::{Number, SizeStyle};
use crate::domain::ports::Translator;
use crate::utils::error::Result;
use crate::utils::printf::Printf;
use std::sync::OnceLock;

const fn exact_powers() -> [u128; 11] {
    let mut out = [0u128; 11];
    let mut i = 0;
    while i < out.len() {
        out[i] = 10u128.pow(POWER_EXPONENTS[i]);
        i += 1;
    }
    out
}

/// 10^3 through 10^33; every `u128` is below a googol.
const EXACT_POWERS: [u128; 11] = exact_powers();

const DECIMAL_DIVISORS: [f64; 11] = [
    1.0, 1e3, 1e6, 1e9, 1e12, 1e15, 1e18, 1e21, 1e24, 1e27, 1e30,
];

fn cached_format(cell: &'static OnceLock<Option<Printf>>, spec: &str) -> Option<&'static Printf> {
    cell.get_or_init(|| Printf::single(spec).ok()).as_ref()
}

fn word_format() -> Option<&'static Printf> {
    static WORD: OnceLock<Option<Printf>> = OnceLock::new();
    cached_format(&WORD, DEFAULT_WORD_FORMAT)
}

fn size_format() -> Option<&'static Printf> {
    static SIZE: OnceLock<Option<Printf>> = OnceLock::new();
    cached_format(&SIZE, DEFAULT_SIZE_FORMAT)
}

pub fn intcomma(value: impl Into<Number>) -> String {
    intcomma_with(value, None)
}

pub fn intcomma_with(value: impl Into<Number>, ndigits: Option<usize>) -> String {
    let tr = translator();
    intcomma_in(tr.get(), value.into(), ndigits)
}

fn write_digits(mut n: u128, buf: &mut [u8; 39]) -> &[u8] {
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    &buf[pos..]
}

fn push_grouped(out: &mut String, digits: &[u8], separator: &str) {
    let len = digits.len();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(char::from(*digit));
    }
}

fn intcomma_in(tr: &dyn Translator, number: Number, ndigits: Option<usize>) -> String {
    if !number.is_finite() {
        return format_not_finite(number.as_f64());
    }
    let separator = tr.thousands_separator();

    if let (Number::Int(n), None | Some(0)) = (number, ndigits) {
        let mut buf = [0u8; 39];
        let digits = write_digits(n.unsigned_abs(), &mut buf);
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len() + 1);
        if n < 0 {
            out.push('-');
        }
        push_grouped(&mut out, digits, separator);
        return out;
    }

    let plain = plain_decimal(number, ndigits);
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let split = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let (whole, tail) = unsigned.split_at(split);

    let mut out = String::with_capacity(plain.len() + whole.len() / 3 * separator.len() + 4);
    out.push_str(sign);
    push_grouped(&mut out, whole.as_bytes(), separator);
    out.push_str(&tail.replace('.', tr.decimal_separator()));
    out
}

pub fn intword(value: impl Into<Number>) -> String {
    let number = value.into();
    match word_format() {
        Some(format) => {
            let tr = translator();
            intword_in(tr.get(), number, format)
        }
        None => integer_string(number),
    }
}

pub fn intword_with(value: impl Into<Number>, format: &str) -> Result<String> {
    let format = Printf::single(format)?;
    let tr = translator();
    Ok(intword_in(tr.get(), value.into(), &format))
}

fn intword_in(tr: &dyn Translator, number: Number, format: &Printf) -> String {
    if !number.is_finite() {
        return format_not_finite(number.as_f64());
    }
    let (negative, magnitude, exact) = split_magnitude(number);
    let prefix = if negative { "-" } else { "" };

    let index = match exact {
        Some(n) if n < EXACT_POWERS[0] => {
            return format!("{}{}", prefix, n);
        }
        Some(n) => EXACT_POWERS.partition_point(|power| *power <= n),
        None => {
            let index = POWERS.partition_point(|power| *power <= magnitude);
            if index == POWERS.len() {
                return format!("{}{}", prefix, integer_string(number).trim_start_matches('-'));
            }
            index
        }
    };

    let chopped = magnitude / POWERS[index - 1];
    let rendered = format.apply(chopped);
    if rendered.trim().parse::<f64>().ok() == Some(POWERS[index] / POWERS[index - 1]) {
        let chopped = magnitude / POWERS[index];
        return format!(
            "{}{} {}",
            prefix,
            format.apply(chopped),
            power_word(tr, index, chopped)
        );
    }
    format!("{}{} {}", prefix, rendered, power_word(tr, index - 1, chopped))
}

pub fn naturalsize(value: impl Into<Number>) -> String {
    let number = value.into();
    match size_format() {
        Some(format) => size_in(number, SizeStyle::Decimal, format),
        None => number.to_string(),
    }
}

pub fn naturalsize_with(value: impl Into<Number>, options: &SizeOptions) -> Result<String> {
    let format = Printf::single(&options.format)?;
    Ok(size_in(value.into(), options.style, &format))
}

fn size_divisor(style: SizeStyle, exponent: usize) -> f64 {
    match style {
        SizeStyle::Decimal => DECIMAL_DIVISORS[exponent],
        SizeStyle::Binary | SizeStyle::Gnu => 2f64.powi(10 * exponent as i32),
    }
}

fn size_in(number: Number, style: SizeStyle, format: &Printf) -> String {
    if !number.is_finite() {
        return format_not_finite(number.as_f64());
    }
    let bytes = number.as_f64();
    let abs_bytes = bytes.abs();

    if abs_bytes < style.base() {
        let whole = whole_bytes(number);
        return match style {
            SizeStyle::Gnu => format!("{}B", whole),
            _ if abs_bytes == 1.0 => format!("{} Byte", whole),
            _ => format!("{} Bytes", whole),
        };
    }

    let exponent = size_exponent(abs_bytes, style);
    let mut out = format.apply(bytes / size_divisor(style, exponent));
    out.push_str(style.suffixes()[exponent - 1]);
    out
}

/// Group many values under one locale snapshot.
pub fn intcomma_batch(values: &[Number], ndigits: Option<usize>) -> Vec<String> {
    let tr = translator();
    let tr = tr.get();
    map_values(values, |number| intcomma_in(tr, number, ndigits))
}

pub fn intword_batch(values: &[Number], format: &str) -> Result<Vec<String>> {
    let format = Printf::single(format)?;
    let tr = translator();
    let tr = tr.get();
    Ok(map_values(values, |number| intword_in(tr, number, &format)))
}

pub fn naturalsize_batch(values: &[Number], options: &SizeOptions) -> Result<Vec<String>> {
    let format = Printf::single(&options.format)?;
    Ok(map_values(values, |number| size_in(number, options.style, &format)))
}

#[cfg(feature = "parallel")]
fn map_values<F>(values: &[Number], render: F) -> Vec<String>
where
    F: Fn(Number) -> String + Send + Sync,
{
    use rayon::prelude::*;
    values.par_iter().map(|number| render(*number)).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_values<F>(values: &[Number], render: F) -> Vec<String>
where
    F: Fn(Number) -> String,
{
    values.iter().map(|number| render(*number)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_powers_table() {
        assert_eq!(EXACT_POWERS[0], 1_000);
        assert_eq!(EXACT_POWERS[10], 10u128.pow(33));
    }

    #[test]
    fn test_push_grouped() {
        let mut out = String::new();
        push_grouped(&mut out, b"1234567", ",");
        assert_eq!(out, "1,234,567");
        let mut out = String::new();
        push_grouped(&mut out, b"123", ",");
        assert_eq!(out, "123");
    }

    #[test]
    fn test_fast_formatters() {
        assert_eq!(intcomma(i128::MIN + 1).matches(',').count(), 12);
        assert_eq!(intcomma(-1_234_567), "-1,234,567");
        assert_eq!(intcomma(1234.5), "1,234.5");
        assert_eq!(intcomma_with(1234, Some(2)), "1,234.00");
        assert_eq!(intword(1_200_000), "1.2 million");
        assert_eq!(intword(999), "999");
        assert_eq!(naturalsize(1), "1 Byte");
        assert_eq!(naturalsize(42_000), "42.0 kB");
        assert_eq!(
            naturalsize_with(4096, &SizeOptions::gnu()).unwrap(),
            "4.0K"
        );
    }

    #[test]
    fn test_batches() {
        let values: Vec<Number> = vec![1_000.into(), 12_400.into(), 1.5e9.into()];
        assert_eq!(
            intcomma_batch(&values, None),
            vec!["1,000", "12,400", "1,500,000,000.0"]
        );
        assert_eq!(
            intword_batch(&values, "%.1f").unwrap(),
            vec!["1.0 thousand", "12.4 thousand", "1.5 billion"]
        );
        assert_eq!(
            naturalsize_batch(&values, &SizeOptions::default()).unwrap(),
            vec!["1.0 kB", "12.4 kB", "1.5 GB"]
        );
        assert!(naturalsize_batch(&values, &SizeOptions::default().with_format("%")).is_err());
    }
}
