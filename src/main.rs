use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use humanize::config::{CliConfig, Command};
use humanize::utils::logger::{self, LogFormat};
use humanize::utils::validation::Validate;
use humanize::{
    DayOptions, DeltaOptions, Gender, NaturalTimeOptions, Number, PreciseOptions, SizeOptions,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Rendered {
    input: String,
    output: String,
}

fn main() -> Result<()> {
    let config = CliConfig::parse();

    let format = if config.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, config.verbose);
    tracing::debug!(?config, "parsed command line");

    config.validate().context("invalid arguments")?;
    select_locale(&config)?;

    let rendered = render(&config.command)?;
    if config.json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        for item in rendered {
            println!("{}", item.output);
        }
    }
    Ok(())
}

/// `--locale` / `HUMANIZE_LOCALE` first, then the OS locale, then English.
fn select_locale(config: &CliConfig) -> Result<()> {
    if let Some(locale) = &config.locale {
        match &config.locale_dir {
            Some(dir) => humanize::activate_from_dir(locale, dir),
            None => humanize::activate(locale),
        }
        .with_context(|| format!("cannot activate locale '{}'", locale))?;
        tracing::info!(locale = %locale, "locale selected");
        return Ok(());
    }

    match sys_locale::get_locale() {
        Some(system) => {
            if let Err(e) = humanize::activate(&system) {
                tracing::debug!(locale = %system, error = %e, "system locale unavailable, using English");
            }
        }
        None => tracing::debug!("no system locale reported, using English"),
    }
    Ok(())
}

fn numbers(values: &[String]) -> Result<Vec<(String, Number)>> {
    values
        .iter()
        .map(|value| {
            let number = Number::parse_localized(value)
                .with_context(|| format!("'{}' is not a number", value))?;
            Ok((value.clone(), number))
        })
        .collect()
}

fn seconds(values: &[String]) -> Result<Vec<(String, f64)>> {
    Ok(numbers(values)?
        .into_iter()
        .map(|(input, number)| (input, number.as_f64()))
        .collect())
}

fn each<T, F>(inputs: Vec<(String, T)>, mut render: F) -> Result<Vec<Rendered>>
where
    F: FnMut(T) -> humanize::Result<String>,
{
    inputs
        .into_iter()
        .map(|(input, value)| {
            let output = render(value).with_context(|| format!("cannot format '{}'", input))?;
            Ok(Rendered { input, output })
        })
        .collect()
}

fn render(command: &Command) -> Result<Vec<Rendered>> {
    match command {
        Command::Intcomma { values, ndigits } => {
            let inputs = numbers(values)?;
            let batch: Vec<Number> = inputs.iter().map(|(_, n)| *n).collect();
            Ok(inputs
                .into_iter()
                .zip(humanize::intcomma_batch(&batch, *ndigits))
                .map(|((input, _), output)| Rendered { input, output })
                .collect())
        }
        Command::Intword { values, format } => {
            each(numbers(values)?, |n| humanize::intword_with(n, format))
        }
        Command::Ordinal { values, female } => {
            let gender = if *female { Gender::Female } else { Gender::Male };
            each(numbers(values)?, |n| Ok(humanize::ordinal_gendered(n, gender)))
        }
        Command::Apnumber { values } => each(numbers(values)?, |n| Ok(humanize::apnumber(n))),
        Command::Fractional { values } => {
            each(numbers(values)?, |n| Ok(humanize::fractional(n)))
        }
        Command::Scientific { values, precision } => each(numbers(values)?, |n| {
            Ok(humanize::scientific_with(n, *precision))
        }),
        Command::Metric {
            values,
            unit,
            precision,
        } => each(numbers(values)?, |n| {
            Ok(humanize::metric_with(n, unit, *precision))
        }),
        Command::Size {
            values,
            binary,
            gnu,
            format,
        } => {
            let options = match (binary, gnu) {
                (true, _) => SizeOptions::binary(),
                (_, true) => SizeOptions::gnu(),
                _ => SizeOptions::default(),
            }
            .with_format(format.clone());
            each(numbers(values)?, |n| humanize::naturalsize_with(n, &options))
        }
        Command::Delta {
            seconds: values,
            minimum_unit,
            no_months,
        } => {
            let options = DeltaOptions {
                months: !no_months,
                minimum_unit: *minimum_unit,
            };
            each(seconds(values)?, |s| humanize::naturaldelta_with(s, &options))
        }
        Command::Time {
            seconds: values,
            future,
        } => {
            let options = NaturalTimeOptions {
                future: *future,
                ..NaturalTimeOptions::default()
            };
            each(seconds(values)?, |s| humanize::naturaltime_with(s, &options))
        }
        Command::Day { dates, with_year } => {
            let inputs: Vec<(String, NaiveDate)> =
                dates.iter().map(|d| (d.to_string(), *d)).collect();
            if *with_year {
                each(inputs, |d| humanize::naturaldate(d))
            } else {
                each(inputs, |d| humanize::naturalday_with(d, &DayOptions::default()))
            }
        }
        Command::Precise {
            seconds: values,
            minimum_unit,
            suppress,
            format,
        } => {
            let options = PreciseOptions::default()
                .minimum_unit(*minimum_unit)
                .suppress(suppress.iter().copied())
                .format(format.clone());
            each(seconds(values)?, |s| humanize::precisedelta_with(s, &options))
        }
        Command::List { items } => Ok(vec![Rendered {
            input: items.join(" "),
            output: humanize::natural_list(items),
        }]),
    }
}
