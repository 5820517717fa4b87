//! Parser definitions loaded from YAML or JSON.
//!
//! A definition declares flags and options only; argument values always come
//! from the command line.
//!
//! # Example YAML
//!
//! ```yaml
//! program: demo
//! strict: false
//! flags:
//!   - long: --gzip
//!     short: -g
//!     description: use gzip
//!   - long: --quit
//!     exit_code: 3
//! options:
//!   - long: --len
//!     short: -l
//!     type: i32
//!     default: "10"
//!     min: 0
//!   - long: --scale
//!     type: f64
//!     required: true
//! ```

use std::path::Path;

use cmd_parser_core::{CmdParser, FlagAction, FlagDef, Item, OptionDef, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DefinitionError, Result};

/// A flag declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagDefinition {
    /// Long name, e.g. `--gzip`.
    pub long: String,
    /// Short name, e.g. `-g`.
    #[serde(default)]
    pub short: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Stop parsing and exit with this status when the flag is seen.
    #[serde(default)]
    pub exit_code: Option<i32>,
    /// Stop parsing and print usage when the flag is seen.
    #[serde(default)]
    pub usage: bool,
}

/// An option declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDefinition {
    /// Long name, e.g. `--len`.
    pub long: String,
    /// Short name, e.g. `-l`.
    #[serde(default)]
    pub short: Option<String>,
    #[serde(default)]
    pub description: String,
    /// One of `string`, `bool`, `char`, `i32`, `f64`, `usize`.
    #[serde(rename = "type", default = "default_type")]
    pub type_name: String,
    #[serde(default)]
    pub required: bool,
    /// Default in textual form; must decode as `type`.
    #[serde(default)]
    pub default: Option<String>,
    /// Inclusive lower bound for numeric types.
    #[serde(default)]
    pub min: Option<f64>,
    /// Inclusive upper bound for numeric types.
    #[serde(default)]
    pub max: Option<f64>,
    /// Allowed values in textual form, each decoded as `type`; empty allows
    /// anything.
    #[serde(default)]
    pub choices: Vec<String>,
}

fn default_type() -> String {
    String::from("string")
}

/// Top-level parser definition.
///
/// # Examples
///
/// ```ignore
/// let definition = ParserDefinition::load("parser.yaml")?;
/// let mut parser = definition.build()?;
/// parser.try_parse_tokens(&["--len", "5"])?;
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserDefinition {
    /// Program name shown in usage text.
    #[serde(default)]
    pub program: Option<String>,
    /// Disable cluster and prefix expansion.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub flags: Vec<FlagDefinition>,
    #[serde(default)]
    pub options: Vec<OptionDefinition>,
}

impl ParserDefinition {
    /// Loads a definition, as JSON if the extension is `.json` and as YAML
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](DefinitionError::IoError) if the file cannot be
    /// read, or [`JsonError`](DefinitionError::JsonError) /
    /// [`YamlError`](DefinitionError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        debug!(path = %path.display(), json = is_json, "Loading parser definition");
        if is_json {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(serde_yaml::from_str(&raw)?)
        }
    }

    /// Builds a parser with every declared flag and option registered.
    ///
    /// # Errors
    ///
    /// Returns the first invalid name, duplicate name, unsupported type,
    /// undecodable default or misplaced bound.
    pub fn build(&self) -> Result<CmdParser> {
        let mut parser = CmdParser::new();
        if let Some(program) = &self.program {
            parser.set_program_name(program);
        }
        if self.strict {
            parser.enable_strict_mode();
        }

        for flag in &self.flags {
            let action = match (flag.usage, flag.exit_code) {
                (true, _) => FlagAction::Usage,
                (false, Some(code)) => FlagAction::Exit(code),
                (false, None) => FlagAction::None,
            };
            parser.try_add_flag_def(
                FlagDef::new(item(&flag.long, flag.short.as_deref())?)
                    .with_description(&flag.description)
                    .with_action(action),
            )?;
        }

        for option in &self.options {
            match option.type_name.as_str() {
                "string" => add_option::<String>(&mut parser, option)?,
                "bool" => add_option::<bool>(&mut parser, option)?,
                "char" => add_option::<char>(&mut parser, option)?,
                "i32" => add_option::<i32>(&mut parser, option)?,
                "f64" => add_option::<f64>(&mut parser, option)?,
                "usize" => add_option::<usize>(&mut parser, option)?,
                other => {
                    return Err(DefinitionError::UnsupportedType {
                        option: option.long.clone(),
                        type_name: other.to_string(),
                    });
                }
            }
        }

        Ok(parser)
    }
}

fn item(long: &str, short: Option<&str>) -> Result<Item> {
    let item = match short {
        Some(short) => Item::pair(long, short)?,
        None => Item::new(long)?,
    };
    Ok(item)
}

/// Numeric view of an option value, for `min`/`max` bounds.
trait Numeric {
    const IS_NUMBER: bool;

    fn as_number(&self) -> Option<f64>;
}

impl Numeric for String {
    const IS_NUMBER: bool = false;

    fn as_number(&self) -> Option<f64> {
        None
    }
}

impl Numeric for bool {
    const IS_NUMBER: bool = false;

    fn as_number(&self) -> Option<f64> {
        None
    }
}

impl Numeric for char {
    const IS_NUMBER: bool = false;

    fn as_number(&self) -> Option<f64> {
        None
    }
}

impl Numeric for i32 {
    const IS_NUMBER: bool = true;

    fn as_number(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl Numeric for f64 {
    const IS_NUMBER: bool = true;

    fn as_number(&self) -> Option<f64> {
        Some(*self)
    }
}

impl Numeric for usize {
    const IS_NUMBER: bool = true;

    fn as_number(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

fn add_option<T>(parser: &mut CmdParser, option: &OptionDefinition) -> Result<()>
where
    T: Value + Numeric + PartialEq,
{
    let mut def = OptionDef::<T>::new(item(&option.long, option.short.as_deref())?)
        .with_description(&option.description)
        .set_required(option.required);

    if let Some(raw) = &option.default {
        let value = T::decode(raw).ok_or_else(|| DefinitionError::InvalidDefault {
            option: option.long.clone(),
            value: raw.clone(),
        })?;
        def = def.with_default(value);
    }

    let bounded = option.min.is_some() || option.max.is_some();
    if bounded && !T::IS_NUMBER {
        return Err(DefinitionError::NonNumericBounds(option.long.clone()));
    }
    // Choices are compared as decoded values, so `1.0` matches `1` for f64.
    let choices = option
        .choices
        .iter()
        .map(|raw| {
            T::decode(raw).ok_or_else(|| DefinitionError::InvalidChoice {
                option: option.long.clone(),
                value: raw.clone(),
            })
        })
        .collect::<Result<Vec<T>>>()?;

    if bounded || !choices.is_empty() {
        let (min, max) = (option.min, option.max);
        def = def.with_checker(move |value: &T| {
            let number = value.as_number();
            let above_min = min.is_none_or(|min| number.is_some_and(|n| n >= min));
            let below_max = max.is_none_or(|max| number.is_some_and(|n| n <= max));
            let allowed = choices.is_empty() || choices.contains(value);
            above_min && below_max && allowed
        });
    }

    parser.try_add_option_def(def)?;
    Ok(())
}
