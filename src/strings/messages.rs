//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Includes error messages, status updates, and confirmation prompts.

pub const ACRONYM_NOT_FOUND: &str =
    "That acronym is not in the glossary yet. You can add it with !ACRONYM = explanation";
pub const EXPLANATION_NOT_FOUND: &str = "That explanation does not exist for the given acronym.";
pub const INSUFFICIENT_PRIVILEGES: &str =
    "You can only change or remove explanations that you created.";
pub const EXPLANATION_TOO_LONG: &str = "That explanation is too long.";
pub const EXPLANATION_SAVED: &str = "Explanation saved.";
pub const EXPLANATION_UPDATED: &str = "Explanation updated.";
pub const EXPLANATION_REMOVED: &str = "Explanation removed.";
pub const MULTIPLE_UPDATE_SEPARATORS: &str =
    "Only one => is allowed. Use !ACRONYM = old explanation => new explanation";
pub const INCORRECT_FORMAT_FOR_SAVING_ACRONYM: &str =
    "Incorrect format. Use !ACRONYM = explanation to save an explanation.";

pub const AUTHOR_NO_EXPLANATIONS: &str = "You have not created any explanations.";
pub const AUTHOR_EXPLANATIONS_HEADER: &str = "You have created the following explanations:";
pub const AUTHOR_CONFIRM_DELETE_EXPLANATIONS: &str =
    "This will delete all explanations you created. To continue, send !my_explanations delete confirm";
pub const AUTHOR_EXPLANATIONS_DELETED: &str = "All of your explanations have been deleted.";

pub const INTERNAL_ERROR: &str = "Something went wrong while handling that command.";

pub fn duplicate_explanation(acronym: &str, explanation: &str) -> String {
    format!(
        "That explanation already exists for the given acronym. If you created it, you can update it with !{acronym} = {explanation} => [new version]"
    )
}

/// One `* ACRONYM = text` line per entry, under the listing header.
pub fn author_explanations<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let lines: Vec<String> = entries
        .into_iter()
        .map(|(acronym, explanation)| format!("* {acronym} = {explanation}"))
        .collect();
    format!("{AUTHOR_EXPLANATIONS_HEADER}\n\n{}", lines.join("\n"))
}
