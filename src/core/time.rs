//! Relative times, calendar days and precise durations.
//!
//! Every entry point accepts a [`TimeValue`]: a naive local datetime, a
//! signed duration, or a number of seconds. Durations are normalized the
//! same way everywhere: absolute value, then whole days, seconds within the
//! day and microseconds within the second.

use crate::core::locale::translator;
use crate::core::number::intcomma;
use crate::domain::model::Unit;
use crate::domain::ports::Translator;
use crate::utils::error::{HumanizeError, Result};
use crate::utils::printf::{sprintf, Arg, Printf};
use crate::utils::validation;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};
use std::collections::BTreeSet;

const SECONDS_PER_DAY: i64 = 86_400;
const MICROS_PER_SECOND: i64 = 1_000_000;
const MAX_DAYS: i64 = 999_999_999;

const DEFAULT_DAY_FORMAT: &str = "%b %d";
const DEFAULT_YEAR_FORMAT: &str = "%b %d %Y";
const DEFAULT_PRECISE_FORMAT: &str = "%0.2f";

/// Input accepted by the time formatters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeValue {
    /// A point in time, in local wall-clock time.
    At(NaiveDateTime),
    /// A signed span. Positive spans lie in the past.
    Delta(TimeDelta),
    /// A signed number of seconds.
    Seconds(f64),
}

impl From<NaiveDateTime> for TimeValue {
    fn from(value: NaiveDateTime) -> Self {
        TimeValue::At(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TimeValue {
    fn from(value: DateTime<Tz>) -> Self {
        TimeValue::At(value.with_timezone(&Local).naive_local())
    }
}

impl From<TimeDelta> for TimeValue {
    fn from(value: TimeDelta) -> Self {
        TimeValue::Delta(value)
    }
}

impl From<std::time::Duration> for TimeValue {
    fn from(value: std::time::Duration) -> Self {
        match TimeDelta::from_std(value) {
            Ok(delta) => TimeValue::Delta(delta),
            Err(_) => TimeValue::Seconds(value.as_secs_f64()),
        }
    }
}

macro_rules! time_value_from_seconds {
    ($($t:ty),*) => {
        $(
            impl From<$t> for TimeValue {
                fn from(value: $t) -> Self {
                    TimeValue::Seconds(value as f64)
                }
            }
        )*
    };
}

time_value_from_seconds!(i32, i64, u32, u64, f32, f64);

/// Absolute duration split into days, seconds and microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    days: i64,
    seconds: i64,
    micros: i64,
}

impl Span {
    fn from_delta(delta: TimeDelta) -> Self {
        let delta = delta.abs();
        let total_seconds = delta.num_seconds();
        Span {
            days: total_seconds / SECONDS_PER_DAY,
            seconds: total_seconds % SECONDS_PER_DAY,
            micros: i64::from(delta.subsec_nanos() / 1_000),
        }
    }

    fn from_seconds(value: f64) -> Result<Self> {
        validation::validate_finite("seconds", value)?;
        let total_micros = (value.abs() * 1e6).round_ties_even();
        let limit = (MAX_DAYS as f64 + 1.0) * SECONDS_PER_DAY as f64 * 1e6;
        if total_micros >= limit {
            return Err(HumanizeError::invalid_input(
                value,
                "duration is out of range",
            ));
        }

        let total_micros = total_micros as i64;
        let micros_per_day = SECONDS_PER_DAY * MICROS_PER_SECOND;
        Ok(Span {
            days: total_micros / micros_per_day,
            seconds: (total_micros % micros_per_day) / MICROS_PER_SECOND,
            micros: total_micros % MICROS_PER_SECOND,
        })
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Normalized span plus the tense implied by the input, if any.
fn span_and_tense(value: TimeValue, now: NaiveDateTime, precise: bool) -> Result<(Span, Option<bool>)> {
    match value {
        TimeValue::At(date) => Ok((Span::from_delta(now - date), Some(date > now))),
        TimeValue::Delta(delta) => Ok((Span::from_delta(delta), Some(delta < TimeDelta::zero()))),
        TimeValue::Seconds(seconds) => {
            let seconds = if precise { seconds } else { seconds.trunc() };
            Ok((Span::from_seconds(seconds)?, None))
        }
    }
}

fn check_minimum_unit(unit: Unit) -> Result<()> {
    match unit {
        Unit::Seconds | Unit::Milliseconds | Unit::Microseconds => Ok(()),
        other => Err(HumanizeError::UnsupportedUnit {
            unit: other.to_string(),
        }),
    }
}

/// Substitute one argument into a translated template.
fn fill(template: &str, arg: Arg<'_>) -> String {
    sprintf(template, &[arg]).unwrap_or_else(|err| {
        tracing::warn!(template, error = %err, "malformed translated template");
        template.to_string()
    })
}

fn plural_text(tr: &dyn Translator, singular: &str, plural: &str, n: i64) -> String {
    let template = tr.ngettext(singular, plural, n.unsigned_abs());
    fill(template, Arg::Int(i128::from(n)))
}

/// Options for [`naturaldelta_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaOptions {
    /// Describe spans between 30 days and a year in months.
    pub months: bool,
    /// One of seconds, milliseconds or microseconds.
    pub minimum_unit: Unit,
}

impl Default for DeltaOptions {
    fn default() -> Self {
        Self {
            months: true,
            minimum_unit: Unit::Seconds,
        }
    }
}

/// A span without tense: `"3 minutes"`, `"a year"`, `"1 year, 4 days"`.
pub fn naturaldelta(value: impl Into<TimeValue>) -> Result<String> {
    naturaldelta_with(value, &DeltaOptions::default())
}

pub fn naturaldelta_with(value: impl Into<TimeValue>, options: &DeltaOptions) -> Result<String> {
    check_minimum_unit(options.minimum_unit)?;
    let span = match value.into() {
        TimeValue::Delta(delta) => Span::from_delta(delta),
        TimeValue::Seconds(seconds) => Span::from_seconds(seconds)?,
        TimeValue::At(date) => {
            return Err(HumanizeError::invalid_input(
                date,
                "naturaldelta takes a duration, not a point in time",
            ))
        }
    };
    let tr = translator();
    Ok(describe_span(tr.get(), span, options))
}

fn describe_span(tr: &dyn Translator, span: Span, options: &DeltaOptions) -> String {
    let min_unit = options.minimum_unit;
    let years = span.days / 365;
    let days = span.days % 365;
    let num_months = (days as f64 / 30.5).floor() as i64;

    if years == 0 && days < 1 {
        let seconds = span.seconds;
        if seconds == 0 {
            let micros = span.micros;
            if min_unit == Unit::Microseconds && micros < 1_000 {
                return plural_text(tr, "%d microsecond", "%d microseconds", micros);
            }
            if min_unit == Unit::Milliseconds
                || (min_unit == Unit::Microseconds && (1_000..MICROS_PER_SECOND).contains(&micros))
            {
                let millis = micros as f64 / 1_000.0;
                let template = tr.ngettext("%d millisecond", "%d milliseconds", millis as u64);
                return fill(template, Arg::Float(millis));
            }
            return tr.gettext("a moment").to_string();
        }
        return match seconds {
            1 => tr.gettext("a second").to_string(),
            2..=59 => plural_text(tr, "%d second", "%d seconds", seconds),
            60..=119 => tr.gettext("a minute").to_string(),
            120..=3_599 => plural_text(tr, "%d minute", "%d minutes", seconds / 60),
            3_600..=7_199 => tr.gettext("an hour").to_string(),
            _ => plural_text(tr, "%d hour", "%d hours", seconds / 3_600),
        };
    }

    if years == 0 {
        if days == 1 {
            return tr.gettext("a day").to_string();
        }
        if !options.months || num_months == 0 {
            return plural_text(tr, "%d day", "%d days", days);
        }
        if num_months == 1 {
            return tr.gettext("a month").to_string();
        }
        return plural_text(tr, "%d month", "%d months", num_months);
    }

    if years == 1 {
        if num_months == 0 && days == 0 {
            return tr.gettext("a year").to_string();
        }
        if num_months == 0 || !options.months {
            return plural_text(tr, "1 year, %d day", "1 year, %d days", days);
        }
        if num_months == 1 {
            return tr.gettext("1 year, 1 month").to_string();
        }
        return plural_text(tr, "1 year, %d month", "1 year, %d months", num_months);
    }

    let template = tr
        .ngettext("%d year", "%d years", years.unsigned_abs())
        .replace("%d", "%s");
    fill(&template, Arg::Str(&intcomma(years)))
}

/// Options for [`naturaltime_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaturalTimeOptions {
    /// Tense for plain second counts, which carry none of their own.
    pub future: bool,
    pub months: bool,
    pub minimum_unit: Unit,
    /// Reference instant; the current local time when `None`.
    pub when: Option<NaiveDateTime>,
}

impl Default for NaturalTimeOptions {
    fn default() -> Self {
        Self {
            future: false,
            months: true,
            minimum_unit: Unit::Seconds,
            when: None,
        }
    }
}

/// A span with tense: `"3 minutes ago"`, `"a day from now"`, `"now"`.
pub fn naturaltime(value: impl Into<TimeValue>) -> Result<String> {
    naturaltime_with(value, &NaturalTimeOptions::default())
}

pub fn naturaltime_with(value: impl Into<TimeValue>, options: &NaturalTimeOptions) -> Result<String> {
    check_minimum_unit(options.minimum_unit)?;
    let reference = options.when.unwrap_or_else(now);
    let (span, tense) = span_and_tense(value.into(), reference, false)?;
    let future = tense.unwrap_or(options.future);

    let tr = translator();
    let tr = tr.get();
    let delta_options = DeltaOptions {
        months: options.months,
        minimum_unit: options.minimum_unit,
    };
    let delta = describe_span(tr, span, &delta_options);
    if delta == tr.gettext("a moment") {
        return Ok(tr.gettext("now").to_string());
    }

    let template = if future {
        tr.gettext("%s from now")
    } else {
        tr.gettext("%s ago")
    };
    Ok(fill(template, Arg::Str(&delta)))
}

/// Options for [`naturalday_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOptions<'a> {
    /// strftime format for dates other than yesterday, today and tomorrow.
    pub format: &'a str,
    /// Reference day; the current local date when `None`.
    pub today: Option<NaiveDate>,
}

impl Default for DayOptions<'_> {
    fn default() -> Self {
        Self {
            format: DEFAULT_DAY_FORMAT,
            today: None,
        }
    }
}

fn to_date(value: &impl Datelike) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(value.year(), value.month(), value.day()).ok_or_else(|| {
        HumanizeError::invalid_input(
            format!("{}-{}-{}", value.year(), value.month(), value.day()),
            "not a calendar date",
        )
    })
}

fn strftime(date: NaiveDate, format: &str) -> Result<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(HumanizeError::InvalidFormat {
            spec: format.to_string(),
            reason: "invalid strftime directive".to_string(),
        });
    }
    Ok(date.format_with_items(items.into_iter()).to_string())
}

/// `"today"`, `"tomorrow"`, `"yesterday"`, or the date as `"Mar 05"`.
pub fn naturalday(value: impl Datelike) -> Result<String> {
    naturalday_with(value, &DayOptions::default())
}

pub fn naturalday_with(value: impl Datelike, options: &DayOptions<'_>) -> Result<String> {
    let date = to_date(&value)?;
    let today = options.today.unwrap_or_else(|| Local::now().date_naive());
    let tr = translator();
    let tr = tr.get();

    match date.signed_duration_since(today).num_days() {
        0 => Ok(tr.gettext("today").to_string()),
        1 => Ok(tr.gettext("tomorrow").to_string()),
        -1 => Ok(tr.gettext("yesterday").to_string()),
        _ => strftime(date, options.format),
    }
}

/// Like [`naturalday`], adding the year for dates about five months away or more.
pub fn naturaldate(value: impl Datelike) -> Result<String> {
    naturaldate_with(value, None)
}

pub fn naturaldate_with(value: impl Datelike, today: Option<NaiveDate>) -> Result<String> {
    let date = to_date(&value)?;
    let reference = today.unwrap_or_else(|| Local::now().date_naive());
    let days_apart = date.signed_duration_since(reference).num_days().abs();
    let format = if days_apart as f64 >= 5.0 * 365.0 / 12.0 {
        DEFAULT_YEAR_FORMAT
    } else {
        DEFAULT_DAY_FORMAT
    };
    naturalday_with(
        date,
        &DayOptions {
            format,
            today: Some(reference),
        },
    )
}

/// Options for [`precisedelta_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreciseOptions {
    /// Smallest unit shown; anything below it is folded into it.
    pub minimum_unit: Unit,
    /// Units never shown; their amount is carried into smaller units.
    pub suppress: Vec<Unit>,
    /// printf format for a fractional amount of the minimum unit.
    pub format: String,
    /// Reference instant for datetime inputs.
    pub when: Option<NaiveDateTime>,
}

impl Default for PreciseOptions {
    fn default() -> Self {
        Self {
            minimum_unit: Unit::Seconds,
            suppress: Vec::new(),
            format: DEFAULT_PRECISE_FORMAT.to_string(),
            when: None,
        }
    }
}

impl PreciseOptions {
    pub fn minimum_unit(mut self, unit: Unit) -> Self {
        self.minimum_unit = unit;
        self
    }

    pub fn suppress(mut self, units: impl IntoIterator<Item = Unit>) -> Self {
        self.suppress.extend(units);
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }
}

/// Every non-zero unit down to the minimum: `"2 days, 1 hour and 33.12 seconds"`.
pub fn precisedelta(value: impl Into<TimeValue>) -> Result<String> {
    precisedelta_with(value, &PreciseOptions::default())
}

/// Smallest unit actually shown once suppression is applied.
fn suitable_minimum_unit(min_unit: Unit, suppress: &BTreeSet<Unit>) -> Result<Unit> {
    if !suppress.contains(&min_unit) {
        return Ok(min_unit);
    }
    Unit::ALL
        .into_iter()
        .find(|unit| *unit > min_unit && !suppress.contains(unit))
        .ok_or(HumanizeError::SuppressedMinimumUnit {
            unit: min_unit.to_string(),
        })
}

/// Divides a unit out of a running amount.
struct Breakdown<'a> {
    min_unit: Unit,
    suppress: &'a BTreeSet<Unit>,
    format: &'a Printf,
}

impl Breakdown<'_> {
    fn round(&self, value: f64) -> f64 {
        self.format
            .apply(value)
            .trim()
            .parse()
            .unwrap_or(value)
    }

    fn quotient_and_remainder(&self, value: f64, divisor: f64, unit: Unit) -> (f64, f64) {
        if unit == self.min_unit {
            (self.round(value / divisor), 0.0)
        } else if self.suppress.contains(&unit) {
            (0.0, value)
        } else {
            ((value / divisor).floor(), value.rem_euclid(divisor))
        }
    }
}

pub fn precisedelta_with(value: impl Into<TimeValue>, options: &PreciseOptions) -> Result<String> {
    let format = Printf::single(&options.format)?;
    let reference = options.when.unwrap_or_else(now);
    let (span, _) = span_and_tense(value.into(), reference, true)?;

    let mut suppress: BTreeSet<Unit> = options.suppress.iter().copied().collect();
    let min_unit = suitable_minimum_unit(options.minimum_unit, &suppress)?;
    suppress.extend(Unit::ALL.into_iter().take_while(|unit| *unit != min_unit));

    let breakdown = Breakdown {
        min_unit,
        suppress: &suppress,
        format: &format,
    };

    let (years, days) = breakdown.quotient_and_remainder(span.days as f64, 365.0, Unit::Years);
    let (months, days) = breakdown.quotient_and_remainder(days, 30.5, Unit::Months);
    let secs = days * SECONDS_PER_DAY as f64 + span.seconds as f64;
    let (days, secs) = breakdown.quotient_and_remainder(secs, SECONDS_PER_DAY as f64, Unit::Days);
    let (hours, secs) = breakdown.quotient_and_remainder(secs, 3_600.0, Unit::Hours);
    let (minutes, secs) = breakdown.quotient_and_remainder(secs, 60.0, Unit::Minutes);
    let usecs = secs * MICROS_PER_SECOND as f64 + span.micros as f64;
    let (secs, usecs) = breakdown.quotient_and_remainder(usecs, MICROS_PER_SECOND as f64, Unit::Seconds);
    let (msecs, usecs) = breakdown.quotient_and_remainder(usecs, 1_000.0, Unit::Milliseconds);
    let (usecs, _) = breakdown.quotient_and_remainder(usecs, 1.0, Unit::Microseconds);

    let amounts = [
        (Unit::Years, years, ("%d year", "%d years")),
        (Unit::Months, months, ("%d month", "%d months")),
        (Unit::Days, days, ("%d day", "%d days")),
        (Unit::Hours, hours, ("%d hour", "%d hours")),
        (Unit::Minutes, minutes, ("%d minute", "%d minutes")),
        (Unit::Seconds, secs, ("%d second", "%d seconds")),
        (Unit::Milliseconds, msecs, ("%d millisecond", "%d milliseconds")),
        (Unit::Microseconds, usecs, ("%d microsecond", "%d microseconds")),
    ];

    let tr = translator();
    let tr = tr.get();
    let mut texts: Vec<String> = Vec::new();
    for (unit, amount, (singular, plural)) in amounts {
        if amount > 0.0 || (texts.is_empty() && unit == min_unit) {
            let count = if amount > 1.0 && amount < 2.0 { 2 } else { amount as u64 };
            let template = tr.ngettext(singular, plural, count);

            let text = if unit == min_unit && amount.fract() > 0.0 {
                fill(&template.replace("%d", format.as_str()), Arg::Float(amount))
            } else if unit == Unit::Years {
                fill(&template.replace("%d", "%s"), Arg::Str(&intcomma(amount as i64)))
            } else {
                fill(template, Arg::Float(amount))
            };
            texts.push(text);
        }
        if unit == min_unit {
            break;
        }
    }

    Ok(join_words(tr, texts))
}

fn join_words(tr: &dyn Translator, mut texts: Vec<String>) -> String {
    match texts.len() {
        0 => String::new(),
        1 => texts.remove(0),
        _ => {
            let tail = texts.pop().unwrap_or_default();
            let head = texts.join(", ");
            match sprintf(tr.gettext("%s and %s"), &[Arg::Str(&head), Arg::Str(&tail)]) {
                Ok(joined) => joined,
                Err(_) => format!("{} and {}", head, tail),
            }
        }
    }
}
