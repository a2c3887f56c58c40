use crate::domain::model::Unit;
use crate::utils::error::Result;
use crate::utils::printf::Printf;
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "humanize")]
#[command(about = "Turn numbers, byte counts, durations and lists into human-readable text")]
pub struct CliConfig {
    /// Locale tag such as de_DE or pt-BR; English when unset.
    #[arg(long, env = "HUMANIZE_LOCALE", global = true)]
    pub locale: Option<String>,

    /// Directory holding extra `<locale>.toml` catalogs.
    #[arg(long, global = true)]
    pub locale_dir: Option<PathBuf>,

    /// Print one JSON object per input instead of plain lines.
    #[arg(long, global = true)]
    pub json: bool,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 1234567 -> 1,234,567
    Intcomma {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<String>,
        #[arg(long)]
        ndigits: Option<usize>,
    },
    /// 1200000 -> 1.2 million
    Intword {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<String>,
        #[arg(long, default_value = "%.1f")]
        format: String,
    },
    /// 3 -> 3rd
    Ordinal {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<String>,
        #[arg(long)]
        female: bool,
    },
    /// 4 -> four
    Apnumber {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<String>,
    },
    /// 1.3 -> 1 3/10
    Fractional {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<String>,
    },
    /// 500 -> 5.00 x 10²
    Scientific {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<String>,
        #[arg(long, default_value_t = 2)]
        precision: usize,
    },
    /// 1500 -> 1.50 k
    Metric {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<String>,
        #[arg(long, default_value = "")]
        unit: String,
        #[arg(long, default_value_t = 3)]
        precision: usize,
    },
    /// 3000000 -> 3.0 MB
    Size {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<String>,
        #[arg(long)]
        binary: bool,
        #[arg(long, conflicts_with = "binary")]
        gnu: bool,
        #[arg(long, default_value = "%.1f")]
        format: String,
    },
    /// 3600 (seconds) -> an hour
    Delta {
        #[arg(required = true, allow_hyphen_values = true)]
        seconds: Vec<String>,
        #[arg(long, default_value = "seconds")]
        minimum_unit: Unit,
        #[arg(long)]
        no_months: bool,
    },
    /// 3600 (seconds) -> an hour ago
    Time {
        #[arg(required = true, allow_hyphen_values = true)]
        seconds: Vec<String>,
        #[arg(long)]
        future: bool,
    },
    /// 2024-03-05 -> Mar 05, today, yesterday
    Day {
        #[arg(required = true)]
        dates: Vec<NaiveDate>,
        /// Add the year for dates about five months away or more.
        #[arg(long)]
        with_year: bool,
    },
    /// 3633.5 (seconds) -> 1 hour and 33.50 seconds
    Precise {
        #[arg(required = true, allow_hyphen_values = true)]
        seconds: Vec<String>,
        #[arg(long, default_value = "seconds")]
        minimum_unit: Unit,
        #[arg(long, value_delimiter = ',')]
        suppress: Vec<Unit>,
        #[arg(long, default_value = "%0.2f")]
        format: String,
    },
    /// a b c -> a, b and c
    List { items: Vec<String> },
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(locale) = &self.locale {
            validation::validate_non_empty_string("locale", locale)?;
        }

        match &self.command {
            Command::Intword { format, .. }
            | Command::Size { format, .. }
            | Command::Precise { format, .. } => {
                Printf::single(format)?;
            }
            Command::Scientific { precision, .. } => {
                validation::validate_range("precision", *precision, 0, 64)?;
            }
            Command::Metric { precision, .. } => {
                validation::validate_range("precision", *precision, 1, 64)?;
            }
            Command::Intcomma {
                ndigits: Some(ndigits),
                ..
            } => {
                validation::validate_range("ndigits", *ndigits, 0, 64)?;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_subcommands() {
        let config = parse(&["humanize", "intcomma", "1234", "--ndigits", "2"]);
        assert!(matches!(
            config.command,
            Command::Intcomma {
                ndigits: Some(2),
                ..
            }
        ));

        let config = parse(&[
            "humanize",
            "precise",
            "3633",
            "--minimum-unit",
            "minutes",
            "--suppress",
            "hours,days",
        ]);
        match config.command {
            Command::Precise {
                minimum_unit,
                suppress,
                ..
            } => {
                assert_eq!(minimum_unit, Unit::Minutes);
                assert_eq!(suppress, vec![Unit::Hours, Unit::Days]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_negative_values() {
        match parse(&["humanize", "intcomma", "-1234", "5"]).command {
            Command::Intcomma { values, .. } => assert_eq!(values, vec!["-1234", "5"]),
            other => panic!("unexpected command {:?}", other),
        }
        match parse(&["humanize", "size", "-1500", "--binary"]).command {
            Command::Size { values, binary, .. } => {
                assert_eq!(values, vec!["-1500"]);
                assert!(binary);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(CliConfig::try_parse_from(["humanize", "scientific", "-0.25"]).is_ok());
        assert!(CliConfig::try_parse_from(["humanize", "ordinal", "-3"]).is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let config = parse(&["humanize", "size", "3000", "--json", "--locale", "fr_FR"]);
        assert!(config.json);
        assert_eq!(config.locale.as_deref(), Some("fr_FR"));
    }

    #[test]
    fn test_rejects_conflicting_and_unknown() {
        assert!(CliConfig::try_parse_from(["humanize", "size", "1", "--binary", "--gnu"]).is_err());
        assert!(CliConfig::try_parse_from(["humanize", "delta", "1", "--minimum-unit", "eons"]).is_err());
        assert!(CliConfig::try_parse_from(["humanize", "day", "yesterday"]).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(parse(&["humanize", "intword", "1", "--format", "%.2f"])
            .validate()
            .is_ok());
        assert!(parse(&["humanize", "intword", "1", "--format", "plain"])
            .validate()
            .is_err());
        assert!(parse(&["humanize", "metric", "1", "--precision", "0"])
            .validate()
            .is_err());
    }
}
