/// Message lookup used by every formatter.
///
/// Lookups fall back to the English message id when a translation is
/// missing, so an implementation never fails.
pub trait Translator: Send + Sync {
    fn gettext<'a>(&'a self, msgid: &'a str) -> &'a str;
    fn ngettext<'a>(&'a self, singular: &'a str, plural: &'a str, n: u64) -> &'a str;
    fn pgettext<'a>(&'a self, context: &str, msgid: &'a str) -> &'a str;
    fn thousands_separator(&self) -> &str;
    fn decimal_separator(&self) -> &str;
}

/// English, untranslated output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTranslator;

impl Translator for NullTranslator {
    fn gettext<'a>(&'a self, msgid: &'a str) -> &'a str {
        msgid
    }

    fn ngettext<'a>(&'a self, singular: &'a str, plural: &'a str, n: u64) -> &'a str {
        if n == 1 {
            singular
        } else {
            plural
        }
    }

    fn pgettext<'a>(&'a self, _context: &str, msgid: &'a str) -> &'a str {
        msgid
    }

    fn thousands_separator(&self) -> &str {
        ","
    }

    fn decimal_separator(&self) -> &str {
        "."
    }
}
