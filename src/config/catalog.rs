use crate::domain::plural::PluralRule;
use crate::domain::ports::Translator;
use crate::utils::error::{HumanizeError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Catalogs compiled into the crate, keyed by canonical locale tag.
pub const EMBEDDED: &[(&str, &str)] = &[
    ("de_DE", include_str!("../../locale/de_DE.toml")),
    ("es_ES", include_str!("../../locale/es_ES.toml")),
    ("fr_FR", include_str!("../../locale/fr_FR.toml")),
    ("it_IT", include_str!("../../locale/it_IT.toml")),
    ("pt_BR", include_str!("../../locale/pt_BR.toml")),
    ("ru_RU", include_str!("../../locale/ru_RU.toml")),
];

/// Translations and number separators for one locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub locale: String,
    /// Defaults to the usual rule for the catalog's language.
    #[serde(default)]
    pub plural_rule: Option<PluralRule>,
    pub thousands_separator: Option<String>,
    pub decimal_separator: Option<String>,
    #[serde(default)]
    pub messages: HashMap<String, String>,
    #[serde(default)]
    pub plurals: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub contexts: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    /// Load a catalog from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HumanizeError::IoError)?;
        let name = path
            .as_ref()
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        Self::from_toml_str(&name, &content)
    }

    pub fn from_toml_str(name: &str, content: &str) -> Result<Self> {
        let catalog: Catalog =
            toml::from_str(content).map_err(|e| HumanizeError::CatalogParse {
                locale: name.to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        catalog.validate()?;
        tracing::debug!(
            locale = %catalog.locale,
            messages = catalog.messages.len(),
            plurals = catalog.plurals.len(),
            "loaded translation catalog"
        );
        Ok(catalog)
    }

    /// Parse one of the catalogs compiled into the crate.
    pub fn embedded(tag: &str) -> Option<Result<Self>> {
        EMBEDDED
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(name, content)| Self::from_toml_str(name, content))
    }

    pub fn embedded_locales() -> impl Iterator<Item = &'static str> {
        EMBEDDED.iter().map(|(name, _)| *name)
    }

    pub fn plural_rule(&self) -> PluralRule {
        self.plural_rule.unwrap_or_else(|| {
            let language = self.locale.split(['_', '-']).next().unwrap_or_default();
            PluralRule::for_language(language)
        })
    }
}

impl Validate for Catalog {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("locale", &self.locale)?;

        if let Some(sep) = &self.thousands_separator {
            validation::validate_non_empty_string("thousands_separator", sep)?;
        }
        if let Some(sep) = &self.decimal_separator {
            validation::validate_non_empty_string("decimal_separator", sep)?;
        }
        validation::validate_distinct(
            "separators",
            [Translator::thousands_separator(self), Translator::decimal_separator(self)],
        )?;

        let expected = self.plural_rule().form_count();
        for (msgid, forms) in &self.plurals {
            validation::validate_form_count(&format!("plurals.{}", msgid), forms, expected)?;
        }
        Ok(())
    }
}

impl Translator for Catalog {
    fn gettext<'a>(&'a self, msgid: &'a str) -> &'a str {
        self.messages.get(msgid).map_or(msgid, String::as_str)
    }

    fn ngettext<'a>(&'a self, singular: &'a str, plural: &'a str, n: u64) -> &'a str {
        match self.plurals.get(singular) {
            Some(forms) => forms
                .get(self.plural_rule().index(n))
                .map_or(plural, String::as_str),
            None if n == 1 => singular,
            None => plural,
        }
    }

    fn pgettext<'a>(&'a self, context: &str, msgid: &'a str) -> &'a str {
        self.contexts
            .get(context)
            .and_then(|messages| messages.get(msgid))
            .map_or(msgid, String::as_str)
    }

    fn thousands_separator(&self) -> &str {
        self.thousands_separator.as_deref().unwrap_or(",")
    }

    fn decimal_separator(&self) -> &str {
        self.decimal_separator.as_deref().unwrap_or(".")
    }
}
