use crate::core::locale::translator;
use crate::utils::printf::{sprintf, Arg};
use std::fmt::Display;

/// Join items as prose: `["a", "b", "c"] → "a, b and c"`.
///
/// The final conjunction comes from the active locale's `"%s and %s"`.
pub fn natural_list<T: Display>(items: &[T]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let head = init
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            let tail = last.to_string();
            let tr = translator();
            sprintf(
                tr.get().gettext("%s and %s"),
                &[Arg::Str(&head), Arg::Str(&tail)],
            )
            .unwrap_or_else(|_| format!("{} and {}", head, tail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_list() {
        assert_eq!(natural_list::<&str>(&[]), "");
        assert_eq!(natural_list(&["one"]), "one");
        assert_eq!(natural_list(&["one", "two"]), "one and two");
        assert_eq!(natural_list(&["one", "two", "three"]), "one, two and three");
        assert_eq!(natural_list(&[1, 2, 3, 4]), "1, 2, 3 and 4");
    }
}
