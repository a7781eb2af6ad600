//! # Command Parsing
//!
//! Classifies a raw chat message into a [`Directive`].
//!
//! Grammar, after trimming:
//! - `help` / `!help` (any case) asks for help.
//! - `ACRONYM` without prefix looks the acronym up.
//! - `!ACRONYM = text` saves a new explanation.
//! - `!ACRONYM = old => new` updates one, `!ACRONYM = old =>` removes it.
//! - `!my_explanations [list | delete [confirm]]` works on the sender's own explanations.
//!
//! Parsing never touches storage.

use crate::application::utils::{normalize_acronym, normalize_keyword};
use crate::domain::types::{AuthorAction, Directive, ParseError};
use regex::Regex;
use std::sync::LazyLock;

pub const COMMAND_PREFIX: char = '!';
pub const ACRONYM_EXPLANATION_SEPARATOR: char = '=';
pub const UPDATE_SEPARATOR: &str = "=>";

const HELP_KEYWORD: &str = "help";
const DELETE_KEYWORD: &str = "delete";
const CONFIRM_KEYWORD: &str = "confirm";

// `my_explanations` followed by up to two words; anything after them is ignored.
static MY_EXPLANATIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^my_explanations\b\s*(\w+)?\s*(\w+)?").expect("my_explanations regex")
});

pub fn parse_command(message: &str) -> Result<Directive, ParseError> {
    let message = message.trim();
    let (prefixed, body) = match message.strip_prefix(COMMAND_PREFIX) {
        Some(rest) => (true, rest.trim()),
        None => (false, message),
    };

    if normalize_keyword(body) == HELP_KEYWORD {
        return Ok(Directive::Help);
    }

    if !prefixed {
        return Ok(Directive::Lookup {
            acronym: normalize_acronym(body),
        });
    }

    if let Some(caps) = MY_EXPLANATIONS.captures(body) {
        let first = caps.get(1).map(|m| normalize_keyword(m.as_str()));
        let second = caps.get(2).map(|m| normalize_keyword(m.as_str()));
        return Ok(Directive::MyExplanations(author_action(
            first.as_deref(),
            second.as_deref(),
        )));
    }

    parse_save(body)
}

fn author_action(first: Option<&str>, second: Option<&str>) -> AuthorAction {
    match (first, second) {
        (Some(DELETE_KEYWORD), Some(CONFIRM_KEYWORD)) => AuthorAction::ConfirmDelete,
        (Some(DELETE_KEYWORD), _) => AuthorAction::RequestDelete,
        _ => AuthorAction::List,
    }
}

/// `ACRONYM = value` where value holds zero or one update separator.
fn parse_save(body: &str) -> Result<Directive, ParseError> {
    let split = find_value_separator(body).ok_or(ParseError::MalformedSave)?;
    let acronym = body[..split].trim();
    if acronym.is_empty() || acronym.contains(UPDATE_SEPARATOR) {
        return Err(ParseError::MalformedSave);
    }
    let acronym = normalize_acronym(acronym);

    let value = &body[split + ACRONYM_EXPLANATION_SEPARATOR.len_utf8()..];
    let parts: Vec<&str> = value.split(UPDATE_SEPARATOR).map(str::trim).collect();

    match parts.as_slice() {
        [text] if text.is_empty() => Err(ParseError::MalformedSave),
        [text] => Ok(Directive::Create {
            acronym,
            text: text.to_string(),
        }),
        [old, _] if old.is_empty() => Err(ParseError::MalformedSave),
        [old, new] if new.is_empty() => Ok(Directive::Delete {
            acronym,
            old: old.to_string(),
        }),
        [old, new] => Ok(Directive::Update {
            acronym,
            old: old.to_string(),
            new: new.to_string(),
        }),
        _ => Err(ParseError::MultipleSeparators),
    }
}

/// Byte offset of the first `=` that does not start an `=>`.
fn find_value_separator(body: &str) -> Option<usize> {
    body.match_indices(ACRONYM_EXPLANATION_SEPARATOR)
        .map(|(idx, _)| idx)
        .find(|&idx| !body[idx..].starts_with(UPDATE_SEPARATOR))
}
