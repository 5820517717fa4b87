//! The parser: registration, parsing and typed access to results.
//!
//! A [`CmdParser`] is used in three sequential phases. Flags and options are
//! registered first, then one or more argument vectors are parsed, then
//! results are queried. Option values and flag counts accumulate across
//! `parse` calls on the same parser; the rest list is rebuilt by each call.
//!
//! Flag actions run synchronously during parsing. Closures are owned by the
//! parser and cannot borrow it, so a callback cannot re-enter `parse`.

use tracing::{debug, error, warn};

use crate::error::{ConfigError, ParseError};
use crate::expand::expand;
use crate::item::{IntoItem, Item};
use crate::registry::{FlagAction, FlagDef, OptionDef, OptionEntry, Registry};
use crate::value::Value;

/// How a successful parse ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every token was consumed and all required options are set.
    Complete,
    /// A flag with [`FlagAction::Usage`] was seen; parsing stopped there.
    Help,
    /// A flag with [`FlagAction::Exit`] was seen; parsing stopped there.
    Exit(i32),
}

/// Command-line parser holding registered flags and options.
///
/// # Examples
///
/// ```
/// use cmd_parser_core::{CmdParser, OptionDef, ParseOutcome};
///
/// let mut parser = CmdParser::new();
/// parser
///     .add_flag(("--gzip", "-g"), "use gzip")
///     .add_flag(("-v", "--verbose"), "")
///     .add_option_def(OptionDef::<i32>::new(("-w", "--weight")))
///     .add_option_def(
///         OptionDef::<f64>::new("--scale")
///             .required()
///             .with_checker(|x| *x >= 0.0),
///     );
///
/// let outcome = parser
///     .try_parse(["demo", "-gv", "--scale=2.5", "-w", "1", "-w2", "input.txt"])
///     .unwrap();
/// assert_eq!(outcome, ParseOutcome::Complete);
/// assert_eq!(parser.value_of::<f64>("--scale"), Some(2.5));
/// assert_eq!(parser.all_values_of::<i32>("-w"), Some(vec![1, 2]));
/// assert_eq!(parser.flag_count("--gzip"), Some(1));
/// assert_eq!(parser.rest(), ["input.txt"]);
/// ```
#[derive(Default)]
pub struct CmdParser {
    pub(crate) registry: Registry,
    rest: Vec<String>,
    pub(crate) program_name: String,
    strict: bool,
}

impl CmdParser {
    /// Creates an empty parser in non-strict mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the program name shown in usage text.
    ///
    /// If never set, the first element of the argument vector is used.
    pub fn set_program_name(&mut self, name: &str) -> &mut Self {
        self.program_name = name.to_string();
        self
    }

    /// Returns the program name, empty until set or parsed.
    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// Disables cluster and prefix expansion.
    pub fn enable_strict_mode(&mut self) -> &mut Self {
        self.strict = true;
        self
    }

    /// Re-enables cluster and prefix expansion.
    pub fn disable_strict_mode(&mut self) -> &mut Self {
        self.strict = false;
        self
    }

    /// Whether strict mode is on.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Registers a flag.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the name is invalid or already taken.
    pub fn try_add_flag_def(&mut self, def: FlagDef) -> Result<&mut Self, ConfigError> {
        self.registry.register_flag(def)?;
        Ok(self)
    }

    /// Registers a flag, exiting the process on a configuration error.
    pub fn add_flag_def(&mut self, def: FlagDef) -> &mut Self {
        match self.registry.register_flag(def) {
            Ok(_) => self,
            Err(err) => fatal(err),
        }
    }

    /// Registers a counting flag with a description.
    pub fn add_flag(&mut self, item: impl IntoItem, desc: &str) -> &mut Self {
        self.add_flag_def(FlagDef::new(item).with_description(desc))
    }

    /// Registers a flag that runs `action` on each occurrence.
    pub fn add_flag_with(&mut self, item: impl IntoItem, desc: &str, action: FlagAction) -> &mut Self {
        self.add_flag_def(FlagDef::new(item).with_description(desc).with_action(action))
    }

    /// Registers an option.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the name is invalid or already taken.
    pub fn try_add_option_def<T: Value>(
        &mut self,
        def: OptionDef<T>,
    ) -> Result<&mut Self, ConfigError> {
        self.registry.register_option(def)?;
        Ok(self)
    }

    /// Registers an option, exiting the process on a configuration error.
    pub fn add_option_def<T: Value>(&mut self, def: OptionDef<T>) -> &mut Self {
        match self.registry.register_option(def) {
            Ok(_) => self,
            Err(err) => fatal(err),
        }
    }

    /// Registers an option without default or checker.
    pub fn add_option<T: Value>(&mut self, item: impl IntoItem, desc: &str, required: bool) -> &mut Self {
        self.add_option_def(
            OptionDef::<T>::new(item)
                .with_description(desc)
                .set_required(required),
        )
    }

    /// Parses a full argument vector whose first element is the program name.
    ///
    /// Registers `--help, -h` with [`FlagAction::Usage`] first unless either
    /// name is already taken.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] met. Values and counts applied before
    /// the failing token stay applied.
    pub fn try_parse<I, S>(&mut self, argv: I) -> Result<ParseOutcome, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        if let Some(program) = argv.next() {
            if self.program_name.is_empty() {
                self.program_name = program;
            }
        }
        let args: Vec<String> = argv.collect();

        self.ensure_help_flag();
        self.try_parse_tokens(&args)
    }

    /// Parses argument tokens without a leading program name.
    ///
    /// Unlike [`try_parse`](Self::try_parse), no help flag is registered.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingValue`] when an option is the last token,
    /// [`ParseError::InvalidValue`] when a value fails its checker, and
    /// [`ParseError::MissingRequired`] when a required option has no value
    /// after all tokens are consumed.
    pub fn try_parse_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<ParseOutcome, ParseError> {
        self.rest.clear();
        let mut tokens = expand(&self.registry, tokens, self.strict).into_iter();

        while let Some(token) = tokens.next() {
            if let Some(key) = self.registry.find_option(&token) {
                let (item, entry) = self.registry.option_mut(key);
                let Some(value) = tokens.next() else {
                    return Err(ParseError::MissingValue {
                        option: item.to_string(),
                    });
                };
                if !entry.accepts(&value) {
                    return Err(ParseError::InvalidValue {
                        option: item.to_string(),
                        value,
                    });
                }
                entry.values.push(value);
            } else if let Some(key) = self.registry.find_flag(&token) {
                let (item, entry) = self.registry.flag_mut(key);
                entry.count += 1;
                match &mut entry.action {
                    FlagAction::None => {}
                    FlagAction::Invoke(callback) => callback(),
                    FlagAction::Exit(code) => {
                        debug!(flag = %item, code = *code, "Flag requested exit");
                        return Ok(ParseOutcome::Exit(*code));
                    }
                    FlagAction::Usage => {
                        debug!(flag = %item, "Flag requested usage");
                        return Ok(ParseOutcome::Help);
                    }
                }
            } else {
                self.rest.push(token);
            }
        }

        if let Some((item, _)) = self
            .registry
            .options()
            .find(|(_, entry)| entry.required && entry.values.is_empty())
        {
            return Err(ParseError::MissingRequired {
                option: item.to_string(),
            });
        }

        Ok(ParseOutcome::Complete)
    }

    /// Parses `argv`, returning `false` on failure.
    ///
    /// The failure is logged at `warn` level. A help request prints usage
    /// and exits with status 0; an exit request exits with its status.
    pub fn parse<I, S>(&mut self, argv: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.parse_or_exit(argv) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "Failed to parse arguments");
                false
            }
        }
    }

    /// Parses `argv`, printing usage and exiting on failure.
    ///
    /// Exits with status 0 if no arguments beyond the program name were given
    /// and 1 otherwise.
    pub fn parse_check<I, S>(&mut self, argv: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        let no_user_args = argv.len() <= 1;

        if let Err(err) = self.parse_or_exit(argv) {
            warn!(error = %err, "Failed to parse arguments");
            eprintln!("error: {err}");
            self.print_usage();
            std::process::exit(if no_user_args { 0 } else { 1 });
        }
    }

    /// [`parse`](Self::parse) over [`std::env::args`].
    pub fn parse_env(&mut self) -> bool {
        self.parse(std::env::args())
    }

    /// [`parse_check`](Self::parse_check) over [`std::env::args`].
    pub fn parse_check_env(&mut self) {
        self.parse_check(std::env::args());
    }

    fn parse_or_exit<I, S>(&mut self, argv: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.try_parse(argv)? {
            ParseOutcome::Complete => Ok(()),
            ParseOutcome::Help => {
                self.print_usage();
                std::process::exit(0)
            }
            ParseOutcome::Exit(code) => std::process::exit(code),
        }
    }

    fn ensure_help_flag(&mut self) {
        if self.registry.contains_name("--help") || self.registry.contains_name("-h") {
            return;
        }
        self.add_flag_with(("--help", "-h"), "print help message", FlagAction::Usage);
    }

    /// Returns the last value of an option.
    ///
    /// `None` if no option has that name, `T` is not the registered type, or
    /// the option has no value and no default.
    pub fn value_of<T: Value>(&self, name: &str) -> Option<T> {
        let entry = self.typed_option::<T>(name)?;
        T::decode(entry.values.last()?)
    }

    /// Returns every value of an option in the order given, default first.
    ///
    /// An option that exists but was never set yields an empty vector;
    /// `None` means an unknown name or a type mismatch.
    pub fn all_values_of<T: Value>(&self, name: &str) -> Option<Vec<T>> {
        let entry = self.typed_option::<T>(name)?;
        entry.values.iter().map(|raw| T::decode(raw)).collect()
    }

    /// Returns how many times a flag occurred, or `None` for an unknown flag.
    pub fn flag_count(&self, name: &str) -> Option<usize> {
        let key = self.registry.find_flag(name)?;
        Some(self.registry.flag(key).1.count)
    }

    /// Tokens from the last parse that matched no flag or option, in order.
    pub fn rest(&self) -> &[String] {
        &self.rest
    }

    /// Every registered flag with its count, in registration order.
    pub fn flag_counts(&self) -> impl Iterator<Item = (&Item, usize)> {
        self.registry.flags().map(|(item, entry)| (item, entry.count))
    }

    /// Every registered option with its raw values, in registration order.
    pub fn option_values(&self) -> impl Iterator<Item = (&Item, &[String])> {
        self.registry
            .options()
            .map(|(item, entry)| (item, entry.values.as_slice()))
    }

    fn typed_option<T: Value>(&self, name: &str) -> Option<&OptionEntry> {
        let key = self.registry.find_option(name)?;
        let (_, entry) = self.registry.option(key);
        (entry.type_id == T::TYPE_ID).then_some(entry)
    }
}

fn fatal(err: ConfigError) -> ! {
    error!(error = %err, "Invalid parser configuration");
    eprintln!("cmd-parser error: {err}");
    std::process::exit(1)
}
