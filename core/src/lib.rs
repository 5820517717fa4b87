//! Typed command-line flag and option parsing.
//!
//! This crate turns a raw argument vector into flag counts and typed option
//! values:
//!
//! - [`CmdParser`]: registration, parsing and typed accessors.
//! - [`Item`]: the long/short name pair identifying a flag or option.
//! - [`FlagDef`] / [`OptionDef`]: declarations consumed by registration.
//! - [`FlagAction`]: what a flag does beyond counting (run a closure,
//!   request exit, request usage).
//! - [`Value`]: the closed set of option value types.
//! - [`UsageEntry`]: display data for help output.
//!
//! Tokens are normalized before they are matched. Besides `--long`, `-s`,
//! `--long=value`, `-s=value` and a value in the following token, two
//! shorthand forms are recognized outside strict mode: short-flag clusters
//! (`-abc` for `-a -b -c`) and option names glued to their value (`-l5`,
//! `--len5`). Anything that matches nothing is collected, in order, into
//! [`CmdParser::rest`].
//!
//! # Example
//!
//! ```
//! use cmd_parser_core::*;
//!
//! let mut parser = CmdParser::new();
//! parser
//!     .add_flag(("--gzip", "-g"), "use gzip")
//!     .add_flag(("-v", "--verbose"), "")
//!     .add_option_def(
//!         OptionDef::<i32>::new(("-l", "--len"))
//!             .with_description("length")
//!             .with_default(10)
//!             .with_checker(|len| *len >= 0),
//!     )
//!     .add_option_def(
//!         OptionDef::<f64>::new("--scale")
//!             .required()
//!             .with_checker(|x| *x >= 0.0),
//!     );
//!
//! assert!(parser.parse(["demo", "-gvv", "-l5", "--scale", "2.5", "file"]));
//! assert_eq!(parser.value_of::<i32>("--len"), Some(5));
//! assert_eq!(parser.value_of::<f64>("--scale"), Some(2.5));
//! assert_eq!(parser.flag_count("-v"), Some(2));
//! assert_eq!(parser.rest(), ["file"]);
//!
//! // The checker rejects a negative scale.
//! assert!(matches!(
//!     parser.try_parse(["demo", "--scale=-1.0"]),
//!     Err(ParseError::InvalidValue { .. })
//! ));
//! ```

mod error;
mod expand;
mod item;
mod names;
mod parser;
mod registry;
mod usage;
mod value;

pub use error::{ConfigError, ParseError};
pub use item::{IntoItem, Item};
pub use names::{is_long, is_short};
pub use parser::{CmdParser, ParseOutcome};
pub use registry::{FlagAction, FlagDef, OptionDef};
pub use usage::{EntryKind, UsageEntry};
pub use value::Value;
