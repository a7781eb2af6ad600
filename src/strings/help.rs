//! # Help Text
//!
//! Help message for the glossary commands.
//! Displayed to the user via `help` or `!help`.

pub const MAIN: &str = concat!(
    "Acrobot explains acronyms.\n",
    "\n",
    "ACRONYM: show all explanations of ACRONYM\n",
    "!ACRONYM = explanation: add an explanation\n",
    "!ACRONYM = old explanation => new explanation: change one of your explanations\n",
    "!ACRONYM = old explanation =>: remove one of your explanations\n",
    "!my_explanations: list the explanations you created\n",
    "!my_explanations delete: remove every explanation you created\n",
    "help: show this message"
);
