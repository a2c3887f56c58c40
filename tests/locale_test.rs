//! Everything that switches the process-wide locale lives in this binary and
//! runs under `LOCALE_LOCK`.

use chrono::TimeDelta;
use humanize::core::{fast, number};
use humanize::{
    activate, activate_from_dir, current_locale, deactivate, decimal_separator, intcomma,
    intcomma_str, intword, natural_list, naturaldelta, naturaltime, ordinal, ordinal_gendered,
    scoped, thousands_separator, Gender, HumanizeError,
};
use std::fs;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

static LOCALE_LOCK: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    let guard = LOCALE_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    deactivate();
    guard
}

#[test]
fn test_german_catalog() {
    let _lock = serial();
    activate("de_DE").unwrap();

    assert_eq!(current_locale().as_deref(), Some("de_DE"));
    assert_eq!(thousands_separator(), ".");
    assert_eq!(decimal_separator(), ",");
    assert_eq!(intcomma(1_234_567), "1.234.567");
    assert_eq!(intcomma(1234.5), "1.234,5");
    assert_eq!(intcomma_str("1.234.567,5", None).unwrap(), "1.234.567,5");
    assert_eq!(intword(1_200_000), "1.2 Millionen");
    assert_eq!(ordinal(3), "3.");
    assert_eq!(humanize::apnumber(5), "fünf");
    assert_eq!(naturaldelta(30).unwrap(), "30 Sekunden");
    assert_eq!(naturaltime(TimeDelta::hours(1)).unwrap(), "vor eine Stunde");
    assert_eq!(natural_list(&["a", "b", "c"]), "a, b und c");

    deactivate();
}

#[test]
fn test_bare_language_and_posix_tags() {
    let _lock = serial();

    activate("de").unwrap();
    assert_eq!(current_locale().as_deref(), Some("de_DE"));
    activate("pt-BR").unwrap();
    assert_eq!(current_locale().as_deref(), Some("pt_BR"));
    activate("fr_FR.UTF-8").unwrap();
    assert_eq!(current_locale().as_deref(), Some("fr_FR"));

    activate("en_US").unwrap();
    assert_eq!(current_locale(), None);
    assert_eq!(intcomma(1234), "1,234");
}

#[test]
fn test_unknown_locale_keeps_current() {
    let _lock = serial();
    activate("it_IT").unwrap();

    assert!(matches!(
        activate("tlh_XX"),
        Err(HumanizeError::LocaleNotFound { .. })
    ));
    assert_eq!(current_locale().as_deref(), Some("it_IT"));

    deactivate();
}

#[test]
fn test_scoped_restores_previous_locale() {
    let _lock = serial();
    activate("fr_FR").unwrap();

    {
        let _guard = scoped("ru_RU").unwrap();
        assert_eq!(current_locale().as_deref(), Some("ru_RU"));
        assert_eq!(thousands_separator(), ",");
        assert_eq!(naturaldelta(21).unwrap(), "21 секунду");
        assert_eq!(naturaldelta(22).unwrap(), "22 секунды");
        assert_eq!(naturaldelta(5).unwrap(), "5 секунд");
        assert_eq!(
            naturaltime(TimeDelta::minutes(-3)).unwrap(),
            "через 3 минуты"
        );
        assert_eq!(intword(5_000), "5.0 тысяч");
    }

    assert_eq!(current_locale().as_deref(), Some("fr_FR"));
    assert_eq!(thousands_separator(), " ");
    assert_eq!(intcomma(1_234_567), "1 234 567");
    assert_eq!(naturaldelta(0).unwrap(), "un moment");

    {
        let _guard = scoped("en").unwrap();
        assert_eq!(intcomma(1_234_567), "1,234,567");
    }
    assert_eq!(intcomma(1_234_567), "1 234 567");

    deactivate();
    assert_eq!(current_locale(), None);
    assert_eq!(thousands_separator(), ",");
}

#[test]
fn test_french_plural_and_gender() {
    let _lock = serial();
    activate("fr_FR").unwrap();

    assert_eq!(ordinal(1), "1er");
    assert_eq!(ordinal_gendered(1, Gender::Female), "1re");
    assert_eq!(ordinal(2), "2e");
    assert_eq!(naturaldelta(2).unwrap(), "2 secondes");
    assert_eq!(natural_list(&["un", "deux"]), "un et deux");

    deactivate();
}

#[test]
fn test_fast_and_reference_agree_under_locale() {
    let _lock = serial();
    activate("de_DE").unwrap();

    for value in [1234.5678, -98_765_432.125, 0.5, 1e21] {
        assert_eq!(
            fast::intcomma_with(value, Some(2)),
            number::intcomma_with(value, Some(2))
        );
        assert_eq!(fast::intcomma(value), number::intcomma(value));
    }
    assert_eq!(fast::intcomma_with(1234.5678, Some(2)), "1.234,57");
    assert_eq!(fast::intword(3_500_000), number::intword(3_500_000));

    deactivate();
}

const CUSTOM: &str = r#"
locale = "xx_XX"
plural_rule = "one_other"
thousands_separator = "'"

[messages]
"a second" = "one tick"

[plurals]
"%d second" = ["%d tick", "%d ticks"]
"#;

#[test]
fn test_activate_from_dir() {
    let _lock = serial();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("xx_XX.toml"), CUSTOM).unwrap();

    activate_from_dir("xx_XX", dir.path()).unwrap();
    assert_eq!(current_locale().as_deref(), Some("xx_XX"));
    assert_eq!(intcomma(1_234_567), "1'234'567");
    assert_eq!(naturaldelta(1).unwrap(), "one tick");
    assert_eq!(naturaldelta(3).unwrap(), "3 ticks");
    assert_eq!(naturaldelta(60).unwrap(), "a minute");

    assert!(matches!(
        activate_from_dir("yy_YY", dir.path()),
        Err(HumanizeError::LocaleNotFound { .. })
    ));

    fs::write(dir.path().join("zz_ZZ.toml"), "locale = ").unwrap();
    assert!(matches!(
        activate_from_dir("zz_ZZ", dir.path()),
        Err(HumanizeError::CatalogParse { .. })
    ));
    assert_eq!(current_locale().as_deref(), Some("xx_XX"));

    deactivate();
}

const SWISS_GERMAN: &str = r#"
locale = "de_DE"
plural_rule = "one_other"
thousands_separator = "'"
"#;

#[test]
fn test_dir_catalog_is_cached_by_name() {
    let _lock = serial();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("xw_XW.toml"), CUSTOM.replace("xx_XX", "xw_XW")).unwrap();

    activate_from_dir("xw_XW", dir.path()).unwrap();
    deactivate();
    drop(dir);

    activate("xw_XW").unwrap();
    assert_eq!(current_locale().as_deref(), Some("xw_XW"));
    assert_eq!(naturaldelta(3).unwrap(), "3 ticks");

    deactivate();
}

#[test]
fn test_dir_catalog_does_not_replace_builtin() {
    let _lock = serial();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("de_DE.toml"), SWISS_GERMAN).unwrap();

    activate_from_dir("de_DE", dir.path()).unwrap();
    assert_eq!(intcomma(1_234_567), "1'234'567");

    activate("de_DE").unwrap();
    assert_eq!(intcomma(1_234_567), "1.234.567");

    deactivate();
}
