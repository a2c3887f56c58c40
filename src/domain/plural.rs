//! gettext-style plural selection.
//!
//! Each rule maps a count to the index of the form to use in a catalog's
//! plural array. The number of forms per rule is fixed, and catalogs are
//! validated against it when loaded.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralRule {
    /// `n != 1`: English, German, Spanish, Italian, ...
    #[default]
    OneOther,
    /// `n > 1`: French, Brazilian Portuguese.
    ZeroOneOther,
    /// one / few / many: Russian, Ukrainian.
    EastSlavic,
    /// A single form: Japanese, Chinese, Korean, Vietnamese.
    Invariant,
}

impl PluralRule {
    /// Rule for a bare language code such as `"de"` or `"ru"`.
    pub fn for_language(language: &str) -> Self {
        match language {
            "fr" | "pt" => PluralRule::ZeroOneOther,
            "ru" | "uk" | "be" => PluralRule::EastSlavic,
            "ja" | "zh" | "ko" | "vi" => PluralRule::Invariant,
            _ => PluralRule::OneOther,
        }
    }

    pub fn form_count(self) -> usize {
        match self {
            PluralRule::OneOther | PluralRule::ZeroOneOther => 2,
            PluralRule::EastSlavic => 3,
            PluralRule::Invariant => 1,
        }
    }

    pub fn index(self, n: u64) -> usize {
        match self {
            PluralRule::OneOther => usize::from(n != 1),
            PluralRule::ZeroOneOther => usize::from(n > 1),
            PluralRule::EastSlavic => {
                let (m10, m100) = (n % 10, n % 100);
                if m10 == 1 && m100 != 11 {
                    0
                } else if (2..=4).contains(&m10) && !(12..=14).contains(&m100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Invariant => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_other() {
        assert_eq!(PluralRule::OneOther.index(0), 1);
        assert_eq!(PluralRule::OneOther.index(1), 0);
        assert_eq!(PluralRule::OneOther.index(2), 1);
    }

    #[test]
    fn test_zero_one_other() {
        assert_eq!(PluralRule::ZeroOneOther.index(0), 0);
        assert_eq!(PluralRule::ZeroOneOther.index(1), 0);
        assert_eq!(PluralRule::ZeroOneOther.index(2), 1);
    }

    #[test]
    fn test_east_slavic() {
        let rule = PluralRule::EastSlavic;
        assert_eq!(rule.index(1), 0);
        assert_eq!(rule.index(21), 0);
        assert_eq!(rule.index(11), 2);
        assert_eq!(rule.index(3), 1);
        assert_eq!(rule.index(13), 2);
        assert_eq!(rule.index(24), 1);
        assert_eq!(rule.index(5), 2);
        assert_eq!(rule.index(0), 2);
    }

    #[test]
    fn test_for_language() {
        assert_eq!(PluralRule::for_language("fr"), PluralRule::ZeroOneOther);
        assert_eq!(PluralRule::for_language("ru"), PluralRule::EastSlavic);
        assert_eq!(PluralRule::for_language("de"), PluralRule::OneOther);
        assert_eq!(PluralRule::Invariant.form_count(), 1);
    }
}
