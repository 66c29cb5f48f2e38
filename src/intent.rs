use once_cell::sync::Lazy;
use regex::Regex;

static EDIT_VERBS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)change|add|remove|make|turn").expect("edit verb pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Modify the displayed image.
    Edit,
    /// Ask the designer a question.
    Chat,
}

/// Routes a chat submission by a plain substring heuristic.
///
/// Any occurrence of change/add/remove/make/turn, in any case and inside
/// longer words too, counts as an edit request. "can you add up the total
/// cost" routes to `Edit` as well; that is accepted behaviour.
pub fn classify(text: &str) -> Intent {
    if EDIT_VERBS.is_match(text) {
        Intent::Edit
    } else {
        Intent::Chat
    }
}
