//! Usage text.
//!
//! [`UsageEntry`] exposes what a help formatter needs about each registered
//! flag and option; [`CmdParser::render_usage`] is the built-in formatter.
//!
//! The rendered layout is a usage line listing required options, followed
//! by up to three sections:
//!
//! ```text
//! usage: demo --scale=f64 ...
//!  @required options:
//!    --scale       option with checker (f64)
//!  @options:
//!    -l, --len     length (i32 [=10])
//!  @flags:
//!    -g, --gzip    use gzip
//! ```

use std::fmt::Write as _;

use serde::Serialize;

use crate::parser::CmdParser;

/// Whether a usage entry describes a flag or an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A counting switch.
    Flag,
    /// A switch taking a value.
    Option,
}

/// Display data for one registered flag or option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageEntry {
    /// `short, long` or `long`.
    pub display: String,
    /// Flag or option.
    pub kind: EntryKind,
    /// `--long` for flags, `--long=<type>` for options.
    pub usage: String,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Type identifier of an option's values.
    pub type_id: Option<&'static str>,
    /// Textual default of an option.
    pub default: Option<String>,
    /// Whether the option must be given.
    pub required: bool,
}

impl UsageEntry {
    /// Description with type and default annotations, as shown in usage.
    pub fn annotated_description(&self) -> String {
        let Some(type_id) = self.type_id else {
            return self.description.clone();
        };
        if self.description.is_empty() {
            return format!("({type_id})");
        }
        match &self.default {
            Some(default) if !self.required => {
                format!("{} ({type_id} [={default}])", self.description)
            }
            _ => format!("{} ({type_id})", self.description),
        }
    }
}

impl CmdParser {
    /// Lists options then flags, each in registration order.
    pub fn usage_entries(&self) -> Vec<UsageEntry> {
        let options = self.registry.options().map(|(item, entry)| UsageEntry {
            display: item.to_string(),
            kind: EntryKind::Option,
            usage: entry.usage.clone(),
            description: entry.description.clone(),
            type_id: Some(entry.type_id),
            default: entry.default.clone(),
            required: entry.required,
        });
        let flags = self.registry.flags().map(|(item, entry)| UsageEntry {
            display: item.to_string(),
            kind: EntryKind::Flag,
            usage: entry.usage.clone(),
            description: entry.description.clone(),
            type_id: None,
            default: None,
            required: false,
        });
        options.chain(flags).collect()
    }

    /// Renders the usage text.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmd_parser_core::CmdParser;
    ///
    /// let mut parser = CmdParser::new();
    /// parser
    ///     .set_program_name("demo")
    ///     .add_flag(("--gzip", "-g"), "use gzip")
    ///     .add_option::<f64>("--scale", "scale factor", true);
    ///
    /// let text = parser.render_usage();
    /// assert!(text.starts_with("usage: demo --scale=f64 ...\n"));
    /// assert!(text.contains(" @required options:\n   --scale       scale factor (f64)\n"));
    /// assert!(text.contains(" @flags:\n   -g, --gzip    use gzip\n"));
    /// ```
    pub fn render_usage(&self) -> String {
        let entries = self.usage_entries();
        let width = entries
            .iter()
            .map(|entry| entry.display.chars().count())
            .max()
            .unwrap_or(0)
            + 4;

        let mut out = format!("usage: {} ", self.program_name);
        for entry in entries.iter().filter(|e| e.required) {
            out.push_str(&entry.usage);
            out.push(' ');
        }
        out.push_str("...\n");

        let sections = [
            (" @required options:", EntryKind::Option, true),
            (" @options:", EntryKind::Option, false),
            (" @flags:", EntryKind::Flag, false),
        ];
        for (header, kind, required) in sections {
            let mut section = entries
                .iter()
                .filter(|e| e.kind == kind && e.required == required)
                .peekable();
            if section.peek().is_none() {
                continue;
            }
            out.push_str(header);
            out.push('\n');
            for entry in section {
                let _ = writeln!(
                    out,
                    "   {:<width$}{}",
                    entry.display,
                    entry.annotated_description()
                );
            }
        }

        out
    }

    /// Writes [`render_usage`](Self::render_usage) to stdout.
    pub fn print_usage(&self) {
        print!("{}", self.render_usage());
    }
}
