//! Number humanization: grouping, words, ordinals, fractions, SI prefixes.
//!
//! These are the reference implementations. `intcomma` and `intword` also
//! have accelerated twins in [`crate::core::fast`] that must render exactly
//! the same strings.

use crate::core::locale::translator;
use crate::domain::model::{Gender, Number};
use crate::domain::ports::Translator;
use crate::utils::error::Result;
use crate::utils::printf::{float_repr, Printf};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Word scales used by `intword`, as powers of ten.
pub(crate) const POWER_EXPONENTS: [u32; 12] = [3, 6, 9, 12, 15, 18, 21, 24, 27, 30, 33, 100];

pub(crate) const POWERS: [f64; 12] = [
    1e3, 1e6, 1e9, 1e12, 1e15, 1e18, 1e21, 1e24, 1e27, 1e30, 1e33, 1e100,
];

pub(crate) const HUMAN_POWERS: [(&str, &str); 12] = [
    ("thousand", "thousand"),
    ("million", "million"),
    ("billion", "billion"),
    ("trillion", "trillion"),
    ("quadrillion", "quadrillion"),
    ("quintillion", "quintillion"),
    ("sextillion", "sextillion"),
    ("septillion", "septillion"),
    ("octillion", "octillion"),
    ("nonillion", "nonillion"),
    ("decillion", "decillion"),
    ("googol", "googol"),
];

const ORDINAL_SUFFIXES: [&str; 10] = ["th", "st", "nd", "rd", "th", "th", "th", "th", "th", "th"];

const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

const SUPERSCRIPTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

const LARGE_PREFIXES: [&str; 10] = ["k", "M", "G", "T", "P", "E", "Z", "Y", "R", "Q"];
const SMALL_PREFIXES: [&str; 10] = ["m", "μ", "n", "p", "f", "a", "z", "y", "r", "q"];

pub(crate) const DEFAULT_WORD_FORMAT: &str = "%.1f";

/// `NaN`, `+Inf` or `-Inf`.
pub fn format_not_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "+Inf".to_string()
    } else {
        "-Inf".to_string()
    }
}

/// Parse a string written with the active locale's separators.
pub fn parse_localized(value: &str) -> Result<Number> {
    let tr = translator();
    let tr = tr.get();
    let cleaned = value
        .replace(tr.thousands_separator(), "")
        .replace(tr.decimal_separator(), ".");
    cleaned.parse()
}

impl Number {
    /// See [`parse_localized`].
    pub fn parse_localized(value: &str) -> Result<Self> {
        parse_localized(value)
    }
}

/// Integer digits of a number truncated toward zero.
pub(crate) fn integer_string(number: Number) -> String {
    match number.truncate() {
        Some(n) => n.to_string(),
        None => format!("{:.0}", number.as_f64().trunc()),
    }
}

/// Ordinal with the masculine suffix: `1 → "1st"`, `12 → "12th"`.
pub fn ordinal(value: impl Into<Number>) -> String {
    ordinal_gendered(value, Gender::Male)
}

pub fn ordinal_gendered(value: impl Into<Number>, gender: Gender) -> String {
    let number = value.into();
    if !number.is_finite() {
        return format_not_finite(number.as_f64());
    }
    let Some(n) = number.truncate() else {
        return integer_string(number);
    };

    let digit = if (11..=13).contains(&n.rem_euclid(100)) {
        0
    } else {
        n.rem_euclid(10) as usize
    };
    let context = format!("{} ({})", digit, gender.context_suffix());
    let tr = translator();
    format!("{}{}", n, tr.get().pgettext(&context, ORDINAL_SUFFIXES[digit]))
}

/// Group the integer part with the locale's thousands separator.
pub fn intcomma(value: impl Into<Number>) -> String {
    intcomma_with(value, None)
}

/// Like [`intcomma`], rounding to `ndigits` decimals first.
pub fn intcomma_with(value: impl Into<Number>, ndigits: Option<usize>) -> String {
    let tr = translator();
    intcomma_in(tr.get(), value.into(), ndigits)
}

/// Parse a localized numeric string and group it.
pub fn intcomma_str(value: &str, ndigits: Option<usize>) -> Result<String> {
    let number = parse_localized(value)?;
    Ok(crate::intcomma_with(number, ndigits))
}

/// Plain decimal rendering before grouping.
pub(crate) fn plain_decimal(number: Number, ndigits: Option<usize>) -> String {
    match (number, ndigits) {
        (Number::Int(n), None) | (Number::Int(n), Some(0)) => n.to_string(),
        (Number::Int(n), Some(digits)) => format!("{}.{}", n, "0".repeat(digits)),
        (Number::Float(v), Some(digits)) => format!("{:.*}", digits, v),
        (Number::Float(v), None) => float_repr(v),
    }
}

fn grouping_regex() -> &'static Regex {
    static GROUPING: OnceLock<Regex> = OnceLock::new();
    GROUPING.get_or_init(|| Regex::new(r"^(-?\d+)(\d{3})").expect("static grouping regex"))
}

fn intcomma_in(tr: &dyn Translator, number: Number, ndigits: Option<usize>) -> String {
    if !number.is_finite() {
        return format_not_finite(number.as_f64());
    }
    let separator = tr.thousands_separator();
    let mut orig = plain_decimal(number, ndigits).replace('.', tr.decimal_separator());

    loop {
        let grouped = grouping_regex()
            .replace(&orig, |caps: &Captures| {
                format!("{}{}{}", &caps[1], separator, &caps[2])
            })
            .into_owned();
        if grouped == orig {
            return grouped;
        }
        orig = grouped;
    }
}

/// Large numbers as words: `1_200_000 → "1.2 million"`.
pub fn intword(value: impl Into<Number>) -> String {
    let tr = translator();
    match Printf::single(DEFAULT_WORD_FORMAT) {
        Ok(format) => intword_in(tr.get(), value.into(), &format),
        Err(_) => integer_string(value.into()),
    }
}

/// [`intword`] with a printf format for the scaled value, e.g. `"%0.3f"`.
pub fn intword_with(value: impl Into<Number>, format: &str) -> Result<String> {
    let format = Printf::single(format)?;
    let tr = translator();
    Ok(intword_in(tr.get(), value.into(), &format))
}

/// Sign, magnitude and exact digits (when they fit) of a truncated number.
pub(crate) fn split_magnitude(number: Number) -> (bool, f64, Option<u128>) {
    match number.truncate() {
        Some(n) => (n < 0, n.unsigned_abs() as f64, Some(n.unsigned_abs())),
        None => {
            let v = number.as_f64().trunc();
            (v < 0.0, v.abs(), None)
        }
    }
}

pub(crate) fn power_word(tr: &dyn Translator, index: usize, chopped: f64) -> String {
    let (singular, plural) = HUMAN_POWERS[index];
    tr.ngettext(singular, plural, chopped.ceil() as u64).to_string()
}

fn intword_in(tr: &dyn Translator, number: Number, format: &Printf) -> String {
    if !number.is_finite() {
        return format_not_finite(number.as_f64());
    }
    let (negative, magnitude, exact) = split_magnitude(number);
    let prefix = if negative { "-" } else { "" };

    if exact.is_some_and(|n| n < 1000) {
        return format!("{}{}", prefix, integer_string(number).trim_start_matches('-'));
    }

    for index in 1..POWERS.len() {
        let below = match exact {
            Some(n) => 10u128
                .checked_pow(POWER_EXPONENTS[index])
                .map_or(true, |power| n < power),
            None => magnitude < POWERS[index],
        };
        if !below {
            continue;
        }

        let chopped = magnitude / POWERS[index - 1];
        let powers_difference = POWERS[index] / POWERS[index - 1];
        let rendered = format.apply(chopped);
        if rendered.trim().parse::<f64>().ok() == Some(powers_difference) {
            let chopped = magnitude / POWERS[index];
            return format!(
                "{}{} {}",
                prefix,
                format.apply(chopped),
                power_word(tr, index, chopped)
            );
        }
        return format!(
            "{}{} {}",
            prefix,
            rendered,
            power_word(tr, index - 1, chopped)
        );
    }

    format!("{}{}", prefix, integer_string(number).trim_start_matches('-'))
}

/// Associated-Press style: numbers below ten as words.
pub fn apnumber(value: impl Into<Number>) -> String {
    let number = value.into();
    if !number.is_finite() {
        return format_not_finite(number.as_f64());
    }
    match number.truncate() {
        Some(n) if (0..10).contains(&n) => {
            let tr = translator();
            tr.get().gettext(DIGIT_WORDS[n as usize]).to_string()
        }
        _ => integer_string(number),
    }
}

/// Whole part plus a fraction with denominator at most 1000.
pub fn fractional(value: impl Into<Number>) -> String {
    let v = value.into().as_f64();
    if !v.is_finite() {
        return format_not_finite(v);
    }

    let whole = v.trunc();
    let (numerator, denominator) = limit_denominator(v - whole, 1000);

    if whole != 0.0 && numerator == 0 && denominator == 1 {
        return format!("{:.0}", whole);
    }
    if whole == 0.0 {
        return format!("{}/{}", numerator, denominator);
    }
    format!("{:.0} {}/{}", whole, numerator.unsigned_abs(), denominator)
}

/// Exact `numerator / denominator` of a float in `[0, 1)`; `None` when the
/// denominator would exceed 2^100.
fn exact_ratio(value: f64) -> Option<(u128, u128)> {
    if value == 0.0 {
        return Some((0, 1));
    }
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };

    if exponent >= 0 {
        return Some(((mantissa as u128) << exponent, 1));
    }
    let shift = (-exponent) as u32;
    if shift > 100 {
        return None;
    }
    let numerator = mantissa as u128;
    let denominator = 1u128 << shift;
    let divisor = gcd(numerator, denominator);
    Some((numerator / divisor, denominator / divisor))
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Closest fraction to `value` with a denominator of at most `max_denominator`.
fn limit_denominator(value: f64, max_denominator: u128) -> (i128, u128) {
    let negative = value < 0.0;
    let Some((n, d)) = exact_ratio(value.abs()) else {
        return (0, 1);
    };

    let (p, q) = if d <= max_denominator {
        (n, d)
    } else {
        let (mut p0, mut q0, mut p1, mut q1) = (0u128, 1u128, 1u128, 0u128);
        let (mut num, mut den) = (n, d);
        loop {
            let a = num / den;
            let q2 = q0 + a * q1;
            if q2 > max_denominator {
                break;
            }
            (p0, q0, p1, q1) = (p1, q1, p0 + a * p1, q2);
            (num, den) = (den, num - a * den);
        }
        let k = (max_denominator - q0) / q1;
        if 2 * den * (q0 + k * q1) <= d {
            (p1, q1)
        } else {
            (p0 + k * p1, q0 + k * q1)
        }
    };

    let p = p as i128;
    (if negative { -p } else { p }, q)
}

/// `500 → "5.00 x 10²"`.
pub fn scientific(value: impl Into<Number>) -> String {
    scientific_with(value, 2)
}

pub fn scientific_with(value: impl Into<Number>, precision: usize) -> String {
    let v = value.into().as_f64();
    if !v.is_finite() {
        return format_not_finite(v);
    }

    let raw = format!("{:.*e}", precision, v);
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let superscript: String = exponent
        .chars()
        .filter_map(|c| match c {
            '-' => Some('⁻'),
            d => d.to_digit(10).map(|d| SUPERSCRIPTS[d as usize]),
        })
        .collect();
    format!("{} x 10{}", mantissa, superscript)
}

/// Bound a value for display: `"<0.01"`, `">99%"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Clamp {
    floor: Option<f64>,
    ceil: Option<f64>,
    floor_token: String,
    ceil_token: String,
}

impl Default for Clamp {
    fn default() -> Self {
        Self {
            floor: None,
            ceil: None,
            floor_token: "<".to_string(),
            ceil_token: ">".to_string(),
        }
    }
}

impl Clamp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn floor(mut self, floor: f64) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn ceil(mut self, ceil: f64) -> Self {
        self.ceil = Some(ceil);
        self
    }

    pub fn floor_token(mut self, token: impl Into<String>) -> Self {
        self.floor_token = token.into();
        self
    }

    pub fn ceil_token(mut self, token: impl Into<String>) -> Self {
        self.ceil_token = token.into();
        self
    }

    fn clamped(&self, number: Number) -> (Number, &str) {
        let v = number.as_f64();
        match (self.floor, self.ceil) {
            (Some(floor), _) if v < floor => (Number::Float(floor), &self.floor_token),
            (_, Some(ceil)) if v > ceil => (Number::Float(ceil), &self.ceil_token),
            _ => (number, ""),
        }
    }

    /// Render with the value's plain representation.
    pub fn display(&self, value: impl Into<Number>) -> String {
        self.format_with(value, |n| n.to_string())
    }

    /// Render the clamped value with a printf format such as `"%.2f"`.
    pub fn format(&self, value: impl Into<Number>, format: &str) -> Result<String> {
        let format = Printf::single(format)?;
        Ok(self.format_with(value, |n| format.apply(n.as_f64())))
    }

    /// Render the clamped value with a caller-supplied formatter.
    pub fn format_with<F>(&self, value: impl Into<Number>, formatter: F) -> String
    where
        F: FnOnce(Number) -> String,
    {
        let number = value.into();
        if !number.is_finite() {
            return format_not_finite(number.as_f64());
        }
        let (clamped, token) = self.clamped(number);
        format!("{}{}", token, formatter(clamped))
    }
}

/// SI prefix notation with three significant digits: `1500 → "1.50 k"`.
pub fn metric(value: impl Into<Number>, unit: &str) -> String {
    metric_with(value, unit, 3)
}

pub fn metric_with(value: impl Into<Number>, unit: &str, precision: usize) -> String {
    let v = value.into().as_f64();
    if !v.is_finite() {
        return format_not_finite(v);
    }

    let exponent = if v != 0.0 {
        v.abs().log10().floor() as i32
    } else {
        0
    };
    if !(-30..33).contains(&exponent) {
        return format!("{}{}", scientific_with(v, precision.saturating_sub(1)), unit);
    }

    let scaled = v / 10f64.powf((exponent.div_euclid(3) * 3) as f64);
    let prefix = if exponent >= 3 {
        LARGE_PREFIXES[(exponent / 3 - 1) as usize]
    } else if exponent < 0 {
        SMALL_PREFIXES[((-exponent - 1) / 3) as usize]
    } else {
        ""
    };
    let decimals = (precision as i32 - exponent.rem_euclid(3) - 1).max(0) as usize;
    let space = if (unit.is_empty() && prefix.is_empty()) || matches!(unit, "°" | "′" | "″") {
        ""
    } else {
        " "
    };
    format!("{:.*}{}{}{}", decimals, scaled, space, prefix, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(101), "101st");
        assert_eq!(ordinal(111), "111th");
        assert_eq!(ordinal(1002), "1002nd");
        assert_eq!(ordinal(-1), "-1th");
        assert_eq!(ordinal(3.9), "3rd");
        assert_eq!(ordinal(f64::NAN), "NaN");
        assert_eq!(ordinal_gendered(1, Gender::Female), "1st");
    }

    #[test]
    fn test_intcomma() {
        assert_eq!(intcomma(100), "100");
        assert_eq!(intcomma(1000), "1,000");
        assert_eq!(intcomma(10123), "10,123");
        assert_eq!(intcomma(-10311), "-10,311");
        assert_eq!(intcomma(1_000_000), "1,000,000");
        assert_eq!(intcomma(1234.5454545), "1,234.5454545");
        assert_eq!(intcomma(1234.0), "1,234.0");
        assert_eq!(intcomma_with(1234.5454545, Some(2)), "1,234.55");
        assert_eq!(intcomma_with(14308.40, Some(1)), "14,308.4");
        assert_eq!(intcomma_with(1234, Some(2)), "1,234.00");
        assert_eq!(intcomma_with(0.0, Some(0)), "0");
        assert_eq!(intcomma(f64::NEG_INFINITY), "-Inf");
    }

    #[test]
    fn test_intcomma_str() {
        assert_eq!(intcomma_str("1234567", None).unwrap(), "1,234,567");
        assert_eq!(intcomma_str("1,234,567", None).unwrap(), "1,234,567");
        assert_eq!(intcomma_str("10311.26", Some(1)).unwrap(), "10,311.3");
        assert_eq!(intcomma_str("nan", None).unwrap(), "NaN");
        assert!(intcomma_str("abc", None).is_err());
    }

    #[test]
    fn test_intword() {
        assert_eq!(intword(100), "100");
        assert_eq!(intword(-999), "-999");
        assert_eq!(intword(12_400), "12.4 thousand");
        assert_eq!(intword(1_000_000), "1.0 million");
        assert_eq!(intword(1_200_000_000), "1.2 billion");
        assert_eq!(intword(-1_200_000_000), "-1.2 billion");
        assert_eq!(intword(999_999), "1.0 million");
        assert_eq!(intword(8_100_000_000_000_000_000_000_000_000_000_000i128), "8.1 decillion");
        assert_eq!(intword(1e101), format!("{:.0}", 1e101));
        assert_eq!(intword_with(1_234_000, "%0.3f").unwrap(), "1.234 million");
        assert!(intword_with(1_234_000, "%q").is_err());
        assert_eq!(intword(f64::NAN), "NaN");
    }

    #[test]
    fn test_apnumber() {
        assert_eq!(apnumber(0), "zero");
        assert_eq!(apnumber(5), "five");
        assert_eq!(apnumber(9), "nine");
        assert_eq!(apnumber(10), "10");
        assert_eq!(apnumber(-1), "-1");
        assert_eq!(apnumber(f64::INFINITY), "+Inf");
    }

    #[test]
    fn test_fractional() {
        assert_eq!(fractional(0.3), "3/10");
        assert_eq!(fractional(1.3), "1 3/10");
        assert_eq!(fractional(1), "1");
        assert_eq!(fractional(0), "0/1");
        assert_eq!(fractional(0.5), "1/2");
        assert_eq!(fractional(1.0 / 3.0), "1/3");
        assert_eq!(fractional(-0.25), "-1/4");
        assert_eq!(fractional(-1.25), "-1 1/4");
        assert_eq!(fractional(1e-9), "0/1");
    }

    #[test]
    fn test_limit_denominator_matches_best_approximation() {
        assert_eq!(limit_denominator(std::f64::consts::PI - 3.0, 1000), (16, 113));
        assert_eq!(limit_denominator(0.999_9, 1000), (1, 1));
    }

    #[test]
    fn test_scientific() {
        assert_eq!(scientific(500), "5.00 x 10²");
        assert_eq!(scientific(-500), "-5.00 x 10²");
        assert_eq!(scientific(0.3), "3.00 x 10⁻¹");
        assert_eq!(scientific(1), "1.00 x 10⁰");
        assert_eq!(scientific_with(1000, 1), "1.0 x 10³");
        assert_eq!(scientific_with(1e-12, 0), "1 x 10⁻¹²");
    }

    #[test]
    fn test_clamp() {
        assert_eq!(Clamp::new().floor(0.01).display(0.0001), "<0.01");
        assert_eq!(Clamp::new().ceil(0.99).format(0.999, "%.2f").unwrap(), ">0.99");
        assert_eq!(
            Clamp::new()
                .ceil(0.99)
                .format_with(0.999, |n| format!("{:.0}%", n.as_f64() * 100.0)),
            ">99%"
        );
        assert_eq!(
            Clamp::new()
                .floor(1.0)
                .floor_token("under ")
                .format(0.5, "%.0f")
                .unwrap(),
            "under 1"
        );
        assert_eq!(Clamp::new().floor(0.0).ceil(1.0).display(0.5), "0.5");
        assert_eq!(Clamp::new().display(f64::NAN), "NaN");
    }

    #[test]
    fn test_metric() {
        assert_eq!(metric(1500, "V"), "1.50 kV");
        assert_eq!(metric(-1500, "V"), "-1.50 kV");
        assert_eq!(metric(2e8, "W"), "200 MW");
        assert_eq!(metric(220e-6, "F"), "220 μF");
        assert_eq!(metric_with(1e-14, "", 1), "10 f");
        assert_eq!(metric(0, ""), "0.00");
        assert_eq!(metric(1, "°"), "1.00°");
        assert_eq!(metric(12.5, ""), "12.5");
        assert_eq!(metric(1e40, "W"), "1.00 x 10⁴⁰W");
    }
}
