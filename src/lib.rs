//! Human-readable numbers, byte counts, durations, dates and lists.
//!
//! ```
//! assert_eq!(humanize::intcomma(1_234_567), "1,234,567");
//! assert_eq!(humanize::naturalsize(3_000_000), "3.0 MB");
//! assert_eq!(humanize::ordinal(22), "22nd");
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

/// Whether the crate-root `intcomma`, `intword` and `naturalsize` are the
/// accelerated implementations.
pub const FAST_ENABLED: bool = cfg!(feature = "fast");

#[cfg(feature = "fast")]
pub use crate::core::fast::{
    intcomma, intcomma_with, intword, intword_with, naturalsize, naturalsize_with,
};
#[cfg(not(feature = "fast"))]
pub use crate::core::filesize::{naturalsize, naturalsize_with};
#[cfg(not(feature = "fast"))]
pub use crate::core::number::{intcomma, intcomma_with, intword, intword_with};

pub use crate::core::fast::{intcomma_batch, intword_batch, naturalsize_batch};
pub use crate::core::filesize::{naturalsize_str, SizeOptions};
pub use crate::core::lists::natural_list;
pub use crate::core::locale::{
    activate, activate_from_dir, available_locales, current_locale, deactivate,
    decimal_separator, scoped, thousands_separator, LocaleGuard,
};
pub use crate::core::number::{
    apnumber, fractional, intcomma_str, metric, metric_with, ordinal, ordinal_gendered,
    parse_localized, scientific, scientific_with, Clamp,
};
pub use crate::core::time::{
    naturaldate, naturaldate_with, naturalday, naturalday_with, naturaldelta, naturaldelta_with,
    naturaltime, naturaltime_with, precisedelta, precisedelta_with, DayOptions, DeltaOptions,
    NaturalTimeOptions, PreciseOptions, TimeValue,
};
pub use crate::domain::model::{Gender, Number, SizeStyle, Unit};
pub use crate::utils::error::{HumanizeError, Result};
