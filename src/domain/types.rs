//! # Domain Types
//!
//! Common data structures and enums used across the application logic:
//! the parsed `Directive`, the persisted `Acronym` / `Explanation` records and the `Reply`
//! that every command resolves to.

use sqlx::FromRow;
use std::fmt;

/// Longest explanation text (in characters) that may be stored.
pub const MAX_EXPLANATION_LENGTH: usize = 1000;

/// Opaque identity of a chat user (e.g. `@alice:example.org`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sub-commands of `!my_explanations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorAction {
    List,
    RequestDelete,
    ConfirmDelete,
}

/// The classified intent of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Help,
    Lookup { acronym: String },
    Create { acronym: String, text: String },
    Update { acronym: String, old: String, new: String },
    Delete { acronym: String, old: String },
    MyExplanations(AuthorAction),
}

/// Syntax errors detected before any storage access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    MalformedSave,
    MultipleSeparators,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Acronym {
    pub id: i64,
    pub acronym: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Explanation {
    pub id: i64,
    pub acronym_id: i64,
    pub explanation: String,
    pub author_id: Option<String>,
}

impl Explanation {
    /// Null-authored explanations are open to everyone until someone edits them.
    pub fn editable_by(&self, user: &UserId) -> bool {
        match &self.author_id {
            Some(author) => author == user.as_str(),
            None => true,
        }
    }
}

/// An explanation joined with the acronym it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AuthoredExplanation {
    pub acronym: String,
    pub explanation: String,
}

/// Outcome of a command. Every variant maps to exactly one user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Help,
    Explanations(Vec<String>),
    AcronymNotFound,
    ExplanationNotFound,
    InsufficientPrivileges,
    DuplicateExplanation { acronym: String, explanation: String },
    ExplanationTooLong,
    ExplanationSaved,
    ExplanationUpdated,
    ExplanationRemoved,
    MultipleUpdateSeparators,
    IncorrectSaveFormat,
    AuthorExplanations(Vec<AuthoredExplanation>),
    AuthorNoExplanations,
    AuthorConfirmDelete,
    AuthorExplanationsDeleted,
}

impl From<ParseError> for Reply {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::MalformedSave => Reply::IncorrectSaveFormat,
            ParseError::MultipleSeparators => Reply::MultipleUpdateSeparators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explanation(author: Option<&str>) -> Explanation {
        Explanation {
            id: 1,
            acronym_id: 1,
            explanation: "text".to_string(),
            author_id: author.map(str::to_string),
        }
    }

    #[test]
    fn test_null_author_is_editable_by_anyone() {
        let e = explanation(None);
        assert!(e.editable_by(&UserId::new("USER_A")));
        assert!(e.editable_by(&UserId::new("USER_B")));
    }

    #[test]
    fn test_owned_explanation_is_editable_by_author_only() {
        let e = explanation(Some("USER_A"));
        assert!(e.editable_by(&UserId::new("USER_A")));
        assert!(!e.editable_by(&UserId::new("USER_B")));
    }

    #[test]
    fn test_parse_errors_map_to_replies() {
        assert_eq!(Reply::from(ParseError::MalformedSave), Reply::IncorrectSaveFormat);
        assert_eq!(
            Reply::from(ParseError::MultipleSeparators),
            Reply::MultipleUpdateSeparators
        );
    }
}
