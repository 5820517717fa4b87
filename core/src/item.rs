//! Name identity shared by flags and options.

use std::fmt;

use crate::error::ConfigError;
use crate::names::{is_long, is_short};

/// The long/short name pair identifying a registered flag or option.
///
/// The long name is mandatory. The short name is optional and stored as an
/// empty string when absent. When built from a pair, the two strings may be
/// given in either order: if the first is not a valid long name the pair is
/// swapped before validation.
///
/// Equality and hashing are structural over both names.
///
/// # Examples
///
/// ```
/// use cmd_parser_core::Item;
///
/// let item = Item::pair("-l", "--len").unwrap();
/// assert_eq!(item.long(), "--len");
/// assert_eq!(item.short(), Some("-l"));
/// assert_eq!(item.to_string(), "-l, --len");
///
/// let long_only = Item::new("--scale").unwrap();
/// assert_eq!(long_only.short(), None);
/// assert_eq!(long_only.to_string(), "--scale");
///
/// assert!(Item::new("-s").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    long: String,
    short: String,
}

impl Item {
    /// Creates an item with a long name only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLongName`] if `long` is not a valid long
    /// name.
    pub fn new(long: impl Into<String>) -> Result<Self, ConfigError> {
        Self::validated(long.into(), String::new())
    }

    /// Creates an item from a long and short name given in either order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLongName`] if neither arrangement yields
    /// a valid long name, or [`ConfigError::InvalidShortName`] if the short
    /// name is not `-` followed by exactly one letter or digit.
    pub fn pair(first: impl Into<String>, second: impl Into<String>) -> Result<Self, ConfigError> {
        Self::validated(first.into(), second.into())
    }

    fn validated(mut long: String, mut short: String) -> Result<Self, ConfigError> {
        if !short.is_empty() && !is_long(&long) {
            std::mem::swap(&mut long, &mut short);
        }

        if !is_long(&long) {
            return Err(ConfigError::InvalidLongName(long));
        }
        // A lone "-" passes the lexical check but is not a usable short form.
        if !is_short(&short) || short == "-" {
            return Err(ConfigError::InvalidShortName(short));
        }

        Ok(Self { long, short })
    }

    /// The long name, e.g. `--len`.
    pub fn long(&self) -> &str {
        &self.long
    }

    /// The short name, e.g. `-l`, if one was given.
    pub fn short(&self) -> Option<&str> {
        (!self.short.is_empty()).then_some(self.short.as_str())
    }

    /// Iterates over the long name and, if present, the short name.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.long.as_str()).chain(self.short())
    }

    /// Checks if `name` is this item's long or short name.
    ///
    /// The empty string never matches, even for items without a short form.
    pub fn matches(&self, name: &str) -> bool {
        !name.is_empty() && (self.long == name || self.short == name)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.short() {
            Some(short) => write!(f, "{short}, {}", self.long),
            None => f.write_str(&self.long),
        }
    }
}

/// Conversion into a validated [`Item`].
///
/// Implemented for a single long name (`&str`, `String`), for name pairs in
/// either order (`(&str, &str)`, `[&str; 2]`) and for [`Item`] itself, so
/// registration methods accept any of them.
pub trait IntoItem {
    /// Validates and converts `self`.
    fn into_item(self) -> Result<Item, ConfigError>;
}

impl IntoItem for Item {
    fn into_item(self) -> Result<Item, ConfigError> {
        Ok(self)
    }
}

impl IntoItem for &Item {
    fn into_item(self) -> Result<Item, ConfigError> {
        Ok(self.clone())
    }
}

impl IntoItem for &str {
    fn into_item(self) -> Result<Item, ConfigError> {
        Item::new(self)
    }
}

impl IntoItem for String {
    fn into_item(self) -> Result<Item, ConfigError> {
        Item::new(self)
    }
}

impl IntoItem for (&str, &str) {
    fn into_item(self) -> Result<Item, ConfigError> {
        Item::pair(self.0, self.1)
    }
}

impl IntoItem for [&str; 2] {
    fn into_item(self) -> Result<Item, ConfigError> {
        let [first, second] = self;
        Item::pair(first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_order_insensitive() {
        let a = Item::pair("--gzip", "-g").unwrap();
        let b = Item::pair("-g", "--gzip").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.long(), "--gzip");
        assert_eq!(a.short(), Some("-g"));
    }

    #[test]
    fn test_rejects_invalid_names() {
        assert_eq!(
            Item::new("len"),
            Err(ConfigError::InvalidLongName("len".to_string()))
        );
        assert_eq!(
            Item::pair("--len", "-ll"),
            Err(ConfigError::InvalidShortName("-ll".to_string()))
        );
        assert_eq!(
            Item::pair("--len", "-"),
            Err(ConfigError::InvalidShortName("-".to_string()))
        );
        // Neither arrangement has a valid long name.
        assert_eq!(
            Item::pair("-a", "-b"),
            Err(ConfigError::InvalidLongName("-b".to_string()))
        );
    }

    #[test]
    fn test_single_short_name_is_not_an_item() {
        assert!(matches!(
            Item::new("-v"),
            Err(ConfigError::InvalidLongName(_))
        ));
    }

    #[test]
    fn test_matches_ignores_empty_token() {
        let item = Item::new("--scale").unwrap();
        assert!(item.matches("--scale"));
        assert!(!item.matches(""));
        assert_eq!(item.names().collect::<Vec<_>>(), vec!["--scale"]);
    }

    #[test]
    fn test_into_item_variants_agree() {
        let expected = Item::pair("--len", "-l").unwrap();
        assert_eq!(("-l", "--len").into_item().unwrap(), expected);
        assert_eq!(["--len", "-l"].into_item().unwrap(), expected);
        assert_eq!((&expected).into_item().unwrap(), expected);
        assert_eq!("--len".into_item().unwrap().short(), None);
    }
}
