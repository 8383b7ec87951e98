//! Prefix validation and per-strategy normalization

use std::borrow::Cow;

use super::error::{ResolveError, ResolveResult};
use crate::environment::SEPARATOR;

/// A validated configuration namespace prefix
///
/// The two binding generations disagree on the prefix shape: the legacy lookup
/// matches keys literally and needs the trailing separator, the modern binder
/// takes a property name and rejects it. Normalization never touches the
/// caller's string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix<'a> {
    raw: &'a str,
}

impl<'a> Prefix<'a> {
    /// Validate a caller-supplied prefix
    ///
    /// The prefix must be non-empty and must not consist of the separator alone.
    pub fn new(raw: &'a str) -> ResolveResult<Self> {
        if raw.is_empty() {
            return Err(ResolveError::InvalidPrefix {
                prefix: raw.to_string(),
                reason: "prefix must not be empty",
            });
        }
        if raw.strip_suffix(SEPARATOR).map_or(false, str::is_empty) {
            return Err(ResolveError::InvalidPrefix {
                prefix: raw.to_string(),
                reason: "prefix must name a namespace, not only the separator",
            });
        }
        Ok(Self { raw })
    }

    /// The prefix exactly as supplied
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Legacy form: trailing separator appended when absent
    pub fn legacy_form(&self) -> Cow<'a, str> {
        if self.raw.ends_with(SEPARATOR) {
            Cow::Borrowed(self.raw)
        } else {
            Cow::Owned(format!("{}{SEPARATOR}", self.raw))
        }
    }

    /// Modern form: exactly one trailing separator removed when present
    pub fn modern_form(&self) -> &'a str {
        self.raw.strip_suffix(SEPARATOR).unwrap_or(self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_empty_and_separator_only() {
        assert!(matches!(Prefix::new(""), Err(ResolveError::InvalidPrefix { .. })));
        assert!(matches!(Prefix::new("."), Err(ResolveError::InvalidPrefix { .. })));
        assert!(Prefix::new("..").is_ok());
    }

    #[test]
    fn test_legacy_form() {
        assert_eq!(Prefix::new("db").unwrap().legacy_form(), "db.");
        assert_eq!(Prefix::new("db.").unwrap().legacy_form(), "db.");
        assert!(matches!(Prefix::new("db.").unwrap().legacy_form(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_modern_form() {
        assert_eq!(Prefix::new("db").unwrap().modern_form(), "db");
        assert_eq!(Prefix::new("db.").unwrap().modern_form(), "db");
        // Only one separator is removed
        assert_eq!(Prefix::new("db..").unwrap().modern_form(), "db.");
    }

    proptest! {
        #[test]
        fn prop_legacy_form_ends_with_single_added_separator(raw in "[a-z][a-z0-9.-]{0,12}") {
            let prefix = Prefix::new(&raw).unwrap();
            let legacy = prefix.legacy_form();
            prop_assert!(legacy.ends_with(SEPARATOR));
            if raw.ends_with(SEPARATOR) {
                prop_assert_eq!(&*legacy, raw.as_str());
            } else {
                prop_assert_eq!(legacy.into_owned(), format!("{raw}."));
            }
            // The caller's string is untouched
            prop_assert_eq!(prefix.as_str(), raw.as_str());
        }

        #[test]
        fn prop_modern_form_strips_exactly_one_separator(base in "[a-z][a-z0-9-]{0,12}") {
            let with = format!("{base}.");
            prop_assert_eq!(Prefix::new(&with).unwrap().modern_form(), base.as_str());
            prop_assert_eq!(Prefix::new(&base).unwrap().modern_form(), base.as_str());
        }

        #[test]
        fn prop_forms_agree_on_namespace(base in "[a-z][a-z0-9-]{0,12}", trailing in any::<bool>()) {
            let raw = if trailing { format!("{base}.") } else { base.clone() };
            let prefix = Prefix::new(&raw).unwrap();
            prop_assert_eq!(prefix.legacy_form().into_owned(), format!("{}.", prefix.modern_form()));
        }
    }
}
