//! Registered flags and options.
//!
//! The registry owns every [`Item`] and its entry. Lookups hand out index
//! keys ([`FlagKey`], [`OptionKey`]) rather than references, so a caller can
//! hold on to a lookup result while mutating the entry it points at.
//!
//! Long and short names are unique across flags and options together; a
//! second registration of any name is rejected before anything is inserted.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::ConfigError;
use crate::item::{IntoItem, Item};
use crate::names::{is_long, is_short};
use crate::value::Value;

/// What happens when a flag occurs on the command line.
///
/// Every occurrence increments the flag's count first; the action runs
/// afterwards, synchronously.
#[derive(Default)]
pub enum FlagAction {
    /// Only count the occurrence.
    #[default]
    None,
    /// Run a closure once per occurrence.
    Invoke(Box<dyn FnMut()>),
    /// Stop parsing and request process exit with the given status.
    Exit(i32),
    /// Stop parsing and request the usage text be printed, then exit 0.
    Usage,
}

impl FlagAction {
    /// Wraps a closure as [`FlagAction::Invoke`].
    pub fn invoke(f: impl FnMut() + 'static) -> Self {
        Self::Invoke(Box::new(f))
    }
}

impl fmt::Debug for FlagAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Invoke(_) => f.write_str("Invoke(..)"),
            Self::Exit(code) => f.debug_tuple("Exit").field(code).finish(),
            Self::Usage => f.write_str("Usage"),
        }
    }
}

/// Declaration of a flag, consumed by registration.
///
/// # Examples
///
/// ```
/// use cmd_parser_core::{CmdParser, FlagAction, FlagDef};
///
/// let mut parser = CmdParser::new();
/// parser.add_flag_def(
///     FlagDef::new(("--quit", "-q"))
///         .with_description("stop immediately")
///         .with_action(FlagAction::Exit(3)),
/// );
/// assert_eq!(parser.flag_count("-q"), Some(0));
/// ```
#[derive(Debug)]
pub struct FlagDef {
    item: Result<Item, ConfigError>,
    description: String,
    action: FlagAction,
}

impl FlagDef {
    /// Starts a flag declaration. Name errors surface at registration.
    pub fn new(item: impl IntoItem) -> Self {
        Self {
            item: item.into_item(),
            description: String::new(),
            action: FlagAction::None,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Sets the action run on each occurrence.
    pub fn with_action(mut self, action: FlagAction) -> Self {
        self.action = action;
        self
    }
}

type TypedChecker<T> = Box<dyn Fn(&T) -> bool>;

/// Declaration of an option holding values of type `T`.
///
/// # Examples
///
/// ```
/// use cmd_parser_core::{CmdParser, OptionDef};
///
/// let mut parser = CmdParser::new();
/// parser.add_option_def(
///     OptionDef::<i32>::new(("-l", "--len"))
///         .with_description("length")
///         .with_default(10)
///         .with_checker(|len| *len >= 0),
/// );
/// assert_eq!(parser.value_of::<i32>("--len"), Some(10));
/// ```
pub struct OptionDef<T: Value> {
    item: Result<Item, ConfigError>,
    description: String,
    required: bool,
    default: Option<T>,
    checker: Option<TypedChecker<T>>,
}

impl<T: Value> OptionDef<T> {
    /// Starts an option declaration. Name errors surface at registration.
    pub fn new(item: impl IntoItem) -> Self {
        Self {
            item: item.into_item(),
            description: String::new(),
            required: false,
            default: None,
            checker: None,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Marks the option as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets whether the option is required.
    pub fn set_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Seeds the option with a default value.
    ///
    /// The default is recorded as the first value, so a required option with
    /// a default is always satisfied.
    pub fn with_default(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// Adds a predicate every decoded value must satisfy.
    pub fn with_checker(mut self, checker: impl Fn(&T) -> bool + 'static) -> Self {
        self.checker = Some(Box::new(checker));
        self
    }
}

impl<T: Value> fmt::Debug for OptionDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDef")
            .field("item", &self.item)
            .field("type_id", &T::TYPE_ID)
            .field("required", &self.required)
            .field("default", &self.default.as_ref().map(Value::render))
            .finish_non_exhaustive()
    }
}

/// Handle to a registered flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct FlagKey(usize);

/// Handle to a registered option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct OptionKey(usize);

pub(crate) struct FlagEntry {
    pub(crate) action: FlagAction,
    pub(crate) description: String,
    pub(crate) usage: String,
    pub(crate) count: usize,
}

pub(crate) struct OptionEntry {
    checker: Box<dyn Fn(&str) -> bool>,
    pub(crate) description: String,
    pub(crate) usage: String,
    pub(crate) type_id: &'static str,
    pub(crate) default: Option<String>,
    pub(crate) required: bool,
    pub(crate) values: Vec<String>,
}

impl OptionEntry {
    /// Decodes `raw` and runs the user predicate on it.
    pub(crate) fn accepts(&self, raw: &str) -> bool {
        (self.checker)(raw)
    }
}

#[derive(Default)]
pub(crate) struct Registry {
    flags: IndexMap<Item, FlagEntry>,
    options: IndexMap<Item, OptionEntry>,
    names: HashSet<String>,
}

impl Registry {
    pub(crate) fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn claim_names(&mut self, item: &Item) -> Result<(), ConfigError> {
        if let Some(taken) = item.names().find(|name| self.names.contains(*name)) {
            return Err(ConfigError::DuplicateName(taken.to_string()));
        }
        self.names.extend(item.names().map(String::from));
        Ok(())
    }

    pub(crate) fn register_flag(&mut self, def: FlagDef) -> Result<FlagKey, ConfigError> {
        let item = def.item?;
        self.claim_names(&item)?;

        debug!(flag = %item, "Registered flag");
        let usage = item.long().to_string();
        let (index, _) = self.flags.insert_full(
            item,
            FlagEntry {
                action: def.action,
                description: def.description,
                usage,
                count: 0,
            },
        );
        Ok(FlagKey(index))
    }

    pub(crate) fn register_option<T: Value>(
        &mut self,
        def: OptionDef<T>,
    ) -> Result<OptionKey, ConfigError> {
        let item = def.item?;
        self.claim_names(&item)?;

        let predicate = def.checker;
        let checker = move |raw: &str| {
            T::decode(raw).is_some_and(|value| predicate.as_ref().is_none_or(|check| check(&value)))
        };
        let default = def.default.as_ref().map(Value::render);

        debug!(option = %item, type_id = T::TYPE_ID, required = def.required, "Registered option");
        let usage = format!("{}={}", item.long(), T::TYPE_ID);
        let (index, _) = self.options.insert_full(
            item,
            OptionEntry {
                checker: Box::new(checker),
                description: def.description,
                usage,
                type_id: T::TYPE_ID,
                values: default.iter().cloned().collect(),
                default,
                required: def.required,
            },
        );
        Ok(OptionKey(index))
    }

    /// Resolves a token to a flag by exact long or short name.
    pub(crate) fn find_flag(&self, token: &str) -> Option<FlagKey> {
        find_by_name(&self.flags, token).map(FlagKey)
    }

    /// Resolves a token to an option by exact long or short name.
    pub(crate) fn find_option(&self, token: &str) -> Option<OptionKey> {
        find_by_name(&self.options, token).map(OptionKey)
    }

    /// Finds the single option name that `token` starts with.
    ///
    /// Long and short names are counted separately; zero or several matches
    /// both yield `None`.
    pub(crate) fn unique_option_prefix(&self, token: &str) -> Option<&str> {
        let mut matched = self
            .options
            .keys()
            .flat_map(Item::names)
            .filter(|name| token.starts_with(name));

        match (matched.next(), matched.next()) {
            (Some(name), None) => Some(name),
            _ => None,
        }
    }

    pub(crate) fn flag(&self, key: FlagKey) -> (&Item, &FlagEntry) {
        self.flags.get_index(key.0).expect("flag keys come from this registry")
    }

    pub(crate) fn flag_mut(&mut self, key: FlagKey) -> (&Item, &mut FlagEntry) {
        self.flags
            .get_index_mut(key.0)
            .expect("flag keys come from this registry")
    }

    pub(crate) fn option(&self, key: OptionKey) -> (&Item, &OptionEntry) {
        self.options
            .get_index(key.0)
            .expect("option keys come from this registry")
    }

    pub(crate) fn option_mut(&mut self, key: OptionKey) -> (&Item, &mut OptionEntry) {
        self.options
            .get_index_mut(key.0)
            .expect("option keys come from this registry")
    }

    pub(crate) fn flags(&self) -> impl Iterator<Item = (&Item, &FlagEntry)> {
        self.flags.iter()
    }

    pub(crate) fn options(&self) -> impl Iterator<Item = (&Item, &OptionEntry)> {
        self.options.iter()
    }
}

fn find_by_name<V>(entries: &IndexMap<Item, V>, token: &str) -> Option<usize> {
    if is_long(token) {
        entries.keys().position(|item| item.long() == token)
    } else if !token.is_empty() && is_short(token) {
        entries.keys().position(|item| item.short() == Some(token))
    } else {
        None
    }
}
