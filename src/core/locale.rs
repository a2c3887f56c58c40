//! Process-wide active locale.
//!
//! The active catalog lives behind a single `RwLock`; formatters take a
//! snapshot of it per call. Catalogs are parsed once and cached for the life
//! of the process.
//!
//! # Invariants
//!
//! 1. With no active catalog every lookup returns the English message id,
//!    and the separators are `,` and `.`.
//! 2. Dropping a [`LocaleGuard`] restores exactly the catalog that was
//!    active when the guard was created.

use crate::config::catalog::Catalog;
use crate::domain::ports::{NullTranslator, Translator};
use crate::utils::error::{HumanizeError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use unic_langid::LanguageIdentifier;

static CURRENT: RwLock<Option<Arc<Catalog>>> = RwLock::new(None);

fn registry() -> &'static RwLock<HashMap<String, Arc<Catalog>>> {
    static REGISTRY: OnceLock<RwLock<HashMap<String, Arc<Catalog>>>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Activate a locale for every subsequent formatting call.
///
/// English tags (`en`, `en_US`, ...) reset to untranslated output.
pub fn activate(locale: &str) -> Result<()> {
    let catalog = resolve(locale, None)?;
    replace(catalog);
    Ok(())
}

/// Activate a locale from `<dir>/<locale>.toml` instead of the built-in set.
pub fn activate_from_dir(locale: &str, dir: impl AsRef<Path>) -> Result<()> {
    let catalog = resolve(locale, Some(dir.as_ref()))?;
    replace(catalog);
    Ok(())
}

/// Return to untranslated English output.
pub fn deactivate() {
    replace(None);
    tracing::debug!("locale deactivated");
}

/// Activate a locale until the returned guard is dropped.
pub fn scoped(locale: &str) -> Result<LocaleGuard> {
    let catalog = resolve(locale, None)?;
    Ok(LocaleGuard {
        previous: replace(catalog),
    })
}

/// Restores the previously active locale when dropped.
#[must_use = "the previous locale is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct LocaleGuard {
    previous: Option<Arc<Catalog>>,
}

impl Drop for LocaleGuard {
    fn drop(&mut self) {
        let restored = self.previous.take();
        tracing::debug!(
            locale = restored.as_ref().map_or("en", |c| c.locale.as_str()),
            "restoring previous locale"
        );
        replace(restored);
    }
}

/// Tag of the active catalog, `None` for English.
pub fn current_locale() -> Option<String> {
    active().map(|catalog| catalog.locale.clone())
}

pub fn available_locales() -> Vec<&'static str> {
    Catalog::embedded_locales().collect()
}

pub fn thousands_separator() -> String {
    translator().get().thousands_separator().to_string()
}

pub fn decimal_separator() -> String {
    translator().get().decimal_separator().to_string()
}

/// Snapshot of the active translator.
pub struct ActiveTranslator(Option<Arc<Catalog>>);

impl ActiveTranslator {
    pub fn get(&self) -> &dyn Translator {
        match &self.0 {
            Some(catalog) => catalog.as_ref(),
            None => &NullTranslator,
        }
    }
}

pub fn translator() -> ActiveTranslator {
    ActiveTranslator(active())
}

fn active() -> Option<Arc<Catalog>> {
    CURRENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn replace(catalog: Option<Arc<Catalog>>) -> Option<Arc<Catalog>> {
    let mut current = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *current, catalog)
}

fn resolve(locale: &str, dir: Option<&Path>) -> Result<Option<Arc<Catalog>>> {
    let trimmed = locale.trim();
    if trimmed.is_empty() {
        return Err(HumanizeError::invalid_input(locale, "empty locale tag"));
    }
    if trimmed.starts_with("en") {
        tracing::debug!(locale = trimmed, "English locale requested, using message ids");
        return Ok(None);
    }

    let candidates = candidates(trimmed);
    let catalog = match dir {
        Some(dir) => load_from_dir(trimmed, &candidates, dir)?,
        None => load_embedded(trimmed, &candidates)?,
    };
    tracing::debug!(requested = trimmed, locale = %catalog.locale, "locale activated");
    Ok(Some(catalog))
}

/// Lookup names for a tag, most specific first: `de_DE.UTF-8` gives
/// `de_DE`, `de`.
fn candidates(locale: &str) -> Vec<String> {
    let base = locale.split(['.', '@']).next().unwrap_or(locale);
    let mut names = Vec::new();

    match base.parse::<LanguageIdentifier>() {
        Ok(id) => {
            let language = id.language.as_str().to_string();
            if let Some(region) = &id.region {
                names.push(format!("{}_{}", language, region.as_str()));
            }
            names.push(language);
        }
        Err(_) => names.push(base.to_string()),
    }
    names
}

fn cached(candidates: &[String]) -> Option<Arc<Catalog>> {
    let registry = registry().read().unwrap_or_else(PoisonError::into_inner);
    candidates.iter().find_map(|candidate| {
        let catalog = registry.get(candidate)?;
        tracing::trace!(locale = %candidate, "catalog cache hit");
        Some(Arc::clone(catalog))
    })
}

fn load_embedded(locale: &str, candidates: &[String]) -> Result<Arc<Catalog>> {
    if let Some(catalog) = cached(candidates) {
        return Ok(catalog);
    }

    let mut names: Vec<&str> = Vec::new();
    for candidate in candidates {
        if let Some(name) = Catalog::embedded_locales().find(|name| *name == candidate.as_str()) {
            names.push(name);
        }
    }
    // A bare language also matches the first embedded catalog for it.
    if let Some(language) = candidates.last() {
        let prefix = format!("{}_", language);
        names.extend(Catalog::embedded_locales().filter(|name| name.starts_with(&prefix)));
    }

    let name = names
        .first()
        .copied()
        .ok_or_else(|| HumanizeError::LocaleNotFound {
            locale: locale.to_string(),
        })?;

    if let Some(catalog) = cached(&[name.to_string()]) {
        return Ok(catalog);
    }

    let catalog = match Catalog::embedded(name) {
        Some(parsed) => Arc::new(parsed?),
        None => {
            return Err(HumanizeError::LocaleNotFound {
                locale: locale.to_string(),
            })
        }
    };
    registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.to_string(), Arc::clone(&catalog));
    Ok(catalog)
}

/// Catalogs named like a built-in one are activated but never cached, so
/// `activate` keeps returning the built-in catalog for that name.
fn load_from_dir(locale: &str, candidates: &[String], dir: &Path) -> Result<Arc<Catalog>> {
    for candidate in candidates {
        let path = dir.join(format!("{}.toml", candidate));
        if !path.is_file() {
            continue;
        }
        tracing::debug!(path = %path.display(), "loading catalog from disk");
        let catalog = Arc::new(Catalog::from_file(&path)?);
        if !Catalog::embedded_locales().any(|name| name == catalog.locale) {
            registry()
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(catalog.locale.clone(), Arc::clone(&catalog));
        } else {
            tracing::debug!(locale = %catalog.locale, "not caching catalog that shadows a built-in one");
        }
        return Ok(catalog);
    }

    Err(HumanizeError::LocaleNotFound {
        locale: format!("{} (in {})", locale, dir.display()),
    })
}
