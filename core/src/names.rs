//! Syntactic rules for flag and option names.
//!
//! A long name is `--` followed by one to ten ASCII letters, digits or
//! underscores. A short name is `-` followed by exactly one ASCII letter or
//! digit. The empty string is accepted as a short name and stands for
//! "no short form", so callers that need to tell an absent short form apart
//! from a literal empty token have to check for emptiness themselves.
//!
//! # Examples
//!
//! ```
//! use cmd_parser_core::{is_long, is_short};
//!
//! assert!(is_long("--verbose"));
//! assert!(!is_long("--this_is_too_long"));
//! assert!(is_short("-v"));
//! assert!(is_short(""));
//! assert!(!is_short("-vv"));
//! ```

use std::sync::LazyLock;

use regex::Regex;

static LONG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--[A-Za-z0-9_]{1,10}$").expect("static regex must compile"));
static SHORT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-[A-Za-z0-9]?$").expect("static regex must compile"));

/// Returns `true` if `name` is a syntactically valid long name.
pub fn is_long(name: &str) -> bool {
    LONG_NAME_RE.is_match(name)
}

/// Returns `true` if `name` is empty or a syntactically valid short name.
///
/// A lone `-` also passes; it can never be registered because [`Item`]
/// construction rejects it, but lookups treat it as a short-name candidate.
///
/// [`Item`]: crate::Item
pub fn is_short(name: &str) -> bool {
    name.is_empty() || SHORT_NAME_RE.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_name_bounds() {
        assert!(is_long("--a"));
        assert!(is_long("--abcdefghij"));
        assert!(is_long("--snake_case"));
        assert!(!is_long("--abcdefghijk"));
        assert!(!is_long("--"));
        assert!(!is_long("-a"));
        assert!(!is_long("--with-dash"));
        assert!(!is_long("--len=5"));
    }

    #[test]
    fn test_short_name_bounds() {
        assert!(is_short(""));
        assert!(is_short("-"));
        assert!(is_short("-x"));
        assert!(is_short("-7"));
        assert!(!is_short("-_"));
        assert!(!is_short("-ab"));
        assert!(!is_short("--"));
        assert!(!is_short("x"));
    }
}
