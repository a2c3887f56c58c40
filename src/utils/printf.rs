//! printf-style format specifications.
//!
//! Formatters accept user formats such as `"%.1f"`, `"%0.3f"` or `"%d"`, and
//! translated templates such as `"%d seconds"` or `"%s ago"`. A format is
//! parsed once into [`Printf`] and can then be rendered many times.

use crate::utils::error::{HumanizeError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn spec_regex() -> &'static Regex {
    static SPEC: OnceLock<Regex> = OnceLock::new();
    SPEC.get_or_init(|| {
        Regex::new(r"%([-+ 0#]*)(\d+)?(?:\.(\d*))?([diufFeEgGs%])").expect("static printf regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Int,
    Fixed,
    Exp { upper: bool },
    General { upper: bool },
    Str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Spec {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    alt: bool,
    width: usize,
    precision: Option<usize>,
    conversion: Conversion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Spec(Spec),
}

/// A single value substituted into a format.
#[derive(Debug, Clone, Copy)]
pub enum Arg<'a> {
    Int(i128),
    Float(f64),
    Str(&'a str),
}

/// A parsed printf-style format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Printf {
    source: String,
    pieces: Vec<Piece>,
}

impl Printf {
    pub fn parse(format: &str) -> Result<Self> {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in spec_regex().captures_iter(format) {
            let whole = caps.get(0).expect("group 0 always matches");
            let between = &format[last..whole.start()];
            if between.contains('%') {
                return Err(invalid_format(format, "unsupported conversion"));
            }
            literal.push_str(between);
            last = whole.end();

            let conversion = match &caps[4] {
                "%" => {
                    literal.push('%');
                    continue;
                }
                "d" | "i" | "u" => Conversion::Int,
                "f" | "F" => Conversion::Fixed,
                "e" => Conversion::Exp { upper: false },
                "E" => Conversion::Exp { upper: true },
                "g" => Conversion::General { upper: false },
                "G" => Conversion::General { upper: true },
                _ => Conversion::Str,
            };

            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }

            let flags = caps.get(1).map_or("", |m| m.as_str());
            let width = match caps.get(2) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map_err(|_| invalid_format(format, "width out of range"))?,
                None => 0,
            };
            let precision = match caps.get(3) {
                Some(m) if m.as_str().is_empty() => Some(0),
                Some(m) => Some(
                    m.as_str()
                        .parse()
                        .map_err(|_| invalid_format(format, "precision out of range"))?,
                ),
                None => None,
            };

            pieces.push(Piece::Spec(Spec {
                left: flags.contains('-'),
                zero: flags.contains('0'),
                plus: flags.contains('+'),
                space: flags.contains(' '),
                alt: flags.contains('#'),
                width,
                precision,
                conversion,
            }));
        }

        let tail = &format[last..];
        if tail.contains('%') {
            return Err(invalid_format(format, "unsupported conversion"));
        }
        literal.push_str(tail);
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self {
            source: format.to_string(),
            pieces,
        })
    }

    /// Parse a format that must consume exactly one numeric value.
    pub fn single(format: &str) -> Result<Self> {
        let parsed = Self::parse(format)?;
        match parsed.placeholders() {
            1 => Ok(parsed),
            n => Err(invalid_format(
                format,
                &format!("expected exactly one placeholder, found {}", n),
            )),
        }
    }

    pub fn placeholders(&self) -> usize {
        self.pieces
            .iter()
            .filter(|p| matches!(p, Piece::Spec(_)))
            .count()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn render(&self, args: &[Arg<'_>]) -> Result<String> {
        if args.len() != self.placeholders() {
            return Err(invalid_format(
                &self.source,
                &format!(
                    "expected {} argument(s), got {}",
                    self.placeholders(),
                    args.len()
                ),
            ));
        }

        let mut out = String::with_capacity(self.source.len() + 16);
        let mut args = args.iter();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Spec(spec) => {
                    let arg = args.next().copied().unwrap_or(Arg::Str(""));
                    render_spec(spec, arg, &mut out)?;
                }
            }
        }
        Ok(out)
    }

    /// Render a format holding a single numeric placeholder.
    pub fn apply(&self, value: f64) -> String {
        let mut out = String::with_capacity(self.source.len() + 16);
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Spec(spec) => {
                    let _ = render_spec(spec, Arg::Float(value), &mut out);
                }
            }
        }
        out
    }
}

/// One-shot formatting.
pub fn sprintf(format: &str, args: &[Arg<'_>]) -> Result<String> {
    Printf::parse(format)?.render(args)
}

fn invalid_format(spec: &str, reason: &str) -> HumanizeError {
    HumanizeError::InvalidFormat {
        spec: spec.to_string(),
        reason: reason.to_string(),
    }
}

fn render_spec(spec: &Spec, arg: Arg<'_>, out: &mut String) -> Result<()> {
    let body = match (spec.conversion, arg) {
        (Conversion::Str, Arg::Str(s)) => {
            pad(out, spec, "", s, false);
            return Ok(());
        }
        (Conversion::Str, Arg::Int(n)) => {
            pad(out, spec, "", &n.to_string(), false);
            return Ok(());
        }
        (Conversion::Str, Arg::Float(v)) => {
            pad(out, spec, "", &float_repr(v), false);
            return Ok(());
        }
        (_, Arg::Str(s)) => {
            return Err(invalid_format(
                s,
                "a number is required for numeric conversions",
            ))
        }
        (conversion, Arg::Int(n)) => numeric_body(spec, conversion, Numeric::Int(n)),
        (conversion, Arg::Float(v)) => numeric_body(spec, conversion, Numeric::Float(v)),
    };

    let (negative, digits) = match body.strip_prefix('-') {
        Some(rest) => (true, rest.to_string()),
        None => (false, body),
    };
    let sign = if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    };
    let finite = digits.chars().next().is_some_and(|c| c.is_ascii_digit());
    pad(out, spec, sign, &digits, finite);
    Ok(())
}

enum Numeric {
    Int(i128),
    Float(f64),
}

fn numeric_body(spec: &Spec, conversion: Conversion, value: Numeric) -> String {
    match (conversion, value) {
        (Conversion::Int, Numeric::Int(n)) => n.to_string(),
        (Conversion::Int, Numeric::Float(v)) if v.is_finite() => format!("{:.0}", v.trunc()),
        (_, Numeric::Float(v)) if !v.is_finite() => non_finite_lower(v),
        (conversion, Numeric::Int(n)) => numeric_body(spec, conversion, Numeric::Float(n as f64)),
        (Conversion::Fixed, Numeric::Float(v)) => {
            format!("{:.*}", spec.precision.unwrap_or(6), v)
        }
        (Conversion::Exp { upper }, Numeric::Float(v)) => {
            let text = exp_notation(v, spec.precision.unwrap_or(6));
            if upper {
                text.to_uppercase()
            } else {
                text
            }
        }
        (Conversion::General { upper }, Numeric::Float(v)) => {
            let text = general_notation(v, spec.precision.unwrap_or(6), spec.alt);
            if upper {
                text.to_uppercase()
            } else {
                text
            }
        }
        (Conversion::Int | Conversion::Str, Numeric::Float(v)) => float_repr(v),
    }
}

fn pad(out: &mut String, spec: &Spec, sign: &str, body: &str, zero_fill: bool) {
    let len = sign.chars().count() + body.chars().count();
    let fill = spec.width.saturating_sub(len);
    if spec.left {
        out.push_str(sign);
        out.push_str(body);
        out.extend(std::iter::repeat(' ').take(fill));
    } else if spec.zero && zero_fill {
        out.push_str(sign);
        out.extend(std::iter::repeat('0').take(fill));
        out.push_str(body);
    } else {
        out.extend(std::iter::repeat(' ').take(fill));
        out.push_str(sign);
        out.push_str(body);
    }
}

fn non_finite_lower(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}

/// `1.50e+03`, with a signed exponent of at least two digits.
fn exp_notation(value: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = split_exponent(&raw);
    format!("{}e{}", mantissa, signed_exponent(exponent))
}

fn general_notation(value: f64, precision: usize, alt: bool) -> String {
    let precision = precision.max(1);
    let raw = format!("{:.*e}", precision - 1, value);
    let (_, exponent) = split_exponent(&raw);

    let text = if exponent >= -4 && exponent < precision as i32 {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        format!("{:.*}", decimals, value)
    } else {
        exp_notation(value, precision - 1)
    };
    if alt {
        return text;
    }

    match text.split_once('e') {
        Some((mantissa, exp)) => format!("{}e{}", strip_fraction_zeros(mantissa), exp),
        None => strip_fraction_zeros(&text).to_string(),
    }
}

fn strip_fraction_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn split_exponent(raw: &str) -> (&str, i32) {
    match raw.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (raw, 0),
    }
}

fn signed_exponent(exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}{:02}", sign, exponent.abs())
}

/// Shortest round-trip representation of a float.
///
/// Plain decimal notation for exponents in `-4..16` with at least one
/// fractional digit (`1234.0`), scientific notation otherwise (`1e+16`).
pub fn float_repr(value: f64) -> String {
    if !value.is_finite() {
        return non_finite_lower(value);
    }

    let raw = format!("{:e}", value);
    let (mantissa, exponent) = split_exponent(&raw);
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let sign = if negative { "-" } else { "" };

    if (-4..16).contains(&exponent) {
        let body = if exponent >= 0 {
            let int_len = exponent as usize + 1;
            if digits.len() <= int_len {
                format!("{}{}.0", digits, "0".repeat(int_len - digits.len()))
            } else {
                format!("{}.{}", &digits[..int_len], &digits[int_len..])
            }
        } else {
            format!("0.{}{}", "0".repeat((-exponent - 1) as usize), digits)
        };
        format!("{}{}", sign, body)
    } else {
        let body = if digits.len() > 1 {
            format!("{}.{}", &digits[..1], &digits[1..])
        } else {
            digits
        };
        format!("{}{}e{}", sign, body, signed_exponent(exponent))
    }
}
