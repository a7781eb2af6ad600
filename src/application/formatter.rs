//! Turns a [`Reply`] into the plain text sent back to the room.

use crate::domain::types::Reply;
use crate::strings::{help, messages};

pub fn render(reply: &Reply) -> String {
    match reply {
        Reply::Help => help::MAIN.to_string(),
        Reply::Explanations(texts) => texts.join("\n"),
        Reply::AcronymNotFound => messages::ACRONYM_NOT_FOUND.to_string(),
        Reply::ExplanationNotFound => messages::EXPLANATION_NOT_FOUND.to_string(),
        Reply::InsufficientPrivileges => messages::INSUFFICIENT_PRIVILEGES.to_string(),
        Reply::DuplicateExplanation {
            acronym,
            explanation,
        } => messages::duplicate_explanation(acronym, explanation),
        Reply::ExplanationTooLong => messages::EXPLANATION_TOO_LONG.to_string(),
        Reply::ExplanationSaved => messages::EXPLANATION_SAVED.to_string(),
        Reply::ExplanationUpdated => messages::EXPLANATION_UPDATED.to_string(),
        Reply::ExplanationRemoved => messages::EXPLANATION_REMOVED.to_string(),
        Reply::MultipleUpdateSeparators => messages::MULTIPLE_UPDATE_SEPARATORS.to_string(),
        Reply::IncorrectSaveFormat => messages::INCORRECT_FORMAT_FOR_SAVING_ACRONYM.to_string(),
        Reply::AuthorExplanations(entries) => messages::author_explanations(
            entries
                .iter()
                .map(|e| (e.acronym.as_str(), e.explanation.as_str())),
        ),
        Reply::AuthorNoExplanations => messages::AUTHOR_NO_EXPLANATIONS.to_string(),
        Reply::AuthorConfirmDelete => messages::AUTHOR_CONFIRM_DELETE_EXPLANATIONS.to_string(),
        Reply::AuthorExplanationsDeleted => messages::AUTHOR_EXPLANATIONS_DELETED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explanations_one_per_line() {
        let reply = Reply::Explanations(vec!["a0".to_string(), "A1".to_string()]);
        assert_eq!(render(&reply), "a0\nA1");
    }

    #[test]
    fn test_help() {
        assert_eq!(render(&Reply::Help), help::MAIN);
    }
}
