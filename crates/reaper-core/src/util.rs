//! Small shared helpers.

/// The username field (and a few others) is historically delivered as a
/// list; this returns the first non-empty string in it.
pub fn first_non_empty<'a, I, S>(items: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + 'a,
{
    items
        .into_iter()
        .map(|s| s.as_ref())
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_first_non_empty() {
        let items = vec!["".to_string(), "".to_string(), "alice".to_string()];
        assert_eq!(first_non_empty(&items), Some("alice"));
    }

    #[test]
    fn none_when_all_empty() {
        let items: Vec<String> = vec!["".to_string()];
        assert_eq!(first_non_empty(&items), None);
    }

    #[test]
    fn none_when_list_empty() {
        let items: Vec<String> = vec![];
        assert_eq!(first_non_empty(&items), None);
    }

    proptest::proptest! {
        /// Agrees with a plain iterator search for the first non-empty
        /// string, for any list of arbitrary (possibly empty) strings.
        #[test]
        fn matches_naive_first_non_empty(items in proptest::collection::vec(".{0,6}", 0..8)) {
            let expected = items.iter().map(String::as_str).find(|s| !s.is_empty());
            proptest::prop_assert_eq!(first_non_empty(&items), expected);
        }
    }
}
