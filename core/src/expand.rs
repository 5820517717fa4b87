//! Token expansion.
//!
//! Rewrites the raw argument vector into a normalized stream in which every
//! option name is followed by its value (either inline or as the next raw
//! token) and every flag stands alone. Each raw token is first split at its
//! first `=` into a name and an inline value, then resolved by the first
//! rule that applies:
//!
//! 1. the name is a registered option: emit it, plus the inline value if any;
//! 2. the name is a registered flag and there is no inline value: emit it;
//! 3. outside strict mode, with no inline value:
//!    a. `-xyz` where every character is a registered short flag: emit
//!       `-x -y -z`, or nothing from this rule if any character is unknown;
//!    b. exactly one option name is a prefix of the token: emit that name
//!       and the rest of the token as its value, even if empty;
//! 4. otherwise emit the raw token unchanged.
//!
//! An empty inline value (`--len=`) counts as no inline value.

use tracing::debug;

use crate::registry::Registry;

pub(crate) fn expand<S: AsRef<str>>(registry: &Registry, raw: &[S], strict: bool) -> Vec<String> {
    let mut normalized = Vec::with_capacity(raw.len());

    for arg in raw {
        let arg = arg.as_ref();
        let (name, inline) = match arg.split_once('=') {
            Some((name, value)) if !value.is_empty() => (name, Some(value)),
            Some((name, _)) => (name, None),
            None => (arg, None),
        };

        if registry.find_option(name).is_some() {
            normalized.push(name.to_string());
            if let Some(value) = inline {
                normalized.push(value.to_string());
            }
            continue;
        }

        if inline.is_none() && registry.find_flag(name).is_some() {
            normalized.push(name.to_string());
            continue;
        }

        if !strict && inline.is_none() {
            if let Some(flags) = expand_cluster(registry, name) {
                debug!(token = arg, expanded = ?flags, "Expanded short flag cluster");
                normalized.extend(flags);
                continue;
            }

            if let Some(prefix) = registry.unique_option_prefix(name) {
                let value = &name[prefix.len()..];
                debug!(token = arg, option = prefix, value, "Expanded option prefix");
                normalized.push(prefix.to_string());
                normalized.push(value.to_string());
                continue;
            }
        }

        normalized.push(arg.to_string());
    }

    normalized
}

/// Splits `-xyz` into `-x`, `-y`, `-z` if all three are registered flags.
fn expand_cluster(registry: &Registry, token: &str) -> Option<Vec<String>> {
    let letters = token.strip_prefix('-')?;
    if letters.starts_with('-') || letters.chars().count() < 2 {
        return None;
    }

    letters
        .chars()
        .map(|c| {
            let flag = format!("-{c}");
            registry.find_flag(&flag).map(|_| flag)
        })
        .collect()
}
