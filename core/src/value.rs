//! Conversion between command-line text and typed option values.
//!
//! The set of supported types is closed: [`String`], [`bool`], [`char`],
//! [`i32`], [`f64`] and [`usize`]. Registering an option of any other type
//! fails to compile because [`Value`] is sealed.
//!
//! Numeric and character decoding requires the whole token to be consumed;
//! `"12abc"` is rejected for `i32`. Boolean decoding is total: the
//! case-insensitive words `true`, `yes`, `ok`, `on` and `1` decode to `true`
//! and every other input, including garbage, decodes to `false`.
//!
//! # Examples
//!
//! ```
//! use cmd_parser_core::Value;
//!
//! assert_eq!(i32::decode("42"), Some(42));
//! assert_eq!(i32::decode("42x"), None);
//! assert_eq!(bool::decode("YES"), Some(true));
//! assert_eq!(bool::decode("nonsense"), Some(false));
//! assert_eq!(f64::TYPE_ID, "f64");
//! ```

mod sealed {
    pub trait Sealed {}

    impl Sealed for String {}
    impl Sealed for bool {}
    impl Sealed for char {}
    impl Sealed for i32 {}
    impl Sealed for f64 {}
    impl Sealed for usize {}
}

/// A type that can be stored in an option.
pub trait Value: sealed::Sealed + Sized + 'static {
    /// Fixed identifier used to match accessor calls against registrations.
    const TYPE_ID: &'static str;

    /// Decodes a raw token, or returns `None` if it is malformed.
    fn decode(raw: &str) -> Option<Self>;

    /// Canonical textual form, used for defaults and usage text.
    fn render(&self) -> String;
}

impl Value for String {
    const TYPE_ID: &'static str = "string";

    fn decode(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn render(&self) -> String {
        self.clone()
    }
}

// Never `None`; unknown words are `false`.
impl Value for bool {
    const TYPE_ID: &'static str = "bool";

    fn decode(raw: &str) -> Option<Self> {
        let lowered = raw.to_ascii_lowercase();
        Some(matches!(
            lowered.as_str(),
            "true" | "yes" | "ok" | "on" | "1"
        ))
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl Value for char {
    const TYPE_ID: &'static str = "char";

    fn decode(raw: &str) -> Option<Self> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl Value for i32 {
    const TYPE_ID: &'static str = "i32";

    fn decode(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl Value for f64 {
    const TYPE_ID: &'static str = "f64";

    fn decode(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl Value for usize {
    const TYPE_ID: &'static str = "usize";

    fn decode(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn render(&self) -> String {
        self.to_string()
    }
}
