/// A keystroke delivered by the embedding frontend, already decoded from
/// whatever raw key codes that frontend speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A printable character.
    Text(char),
    Backspace,
    Space,
    Enter,
    Escape,
    ArrowDown,
    ArrowUp,
    /// Direct pick from the candidate panel (mouse click, number key).
    SelectCandidate(usize),
}

/// Marked (composing) text shown inline at the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedText {
    pub text: String,
}

/// Candidate panel action — exactly one of three states, so the invalid
/// show-and-hide combination is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateAction {
    /// Leave the panel as-is.
    Keep,
    /// Show or update the panel with these surfaces.
    Show { surfaces: Vec<String>, selected: usize },
    /// Hide the panel.
    Hide,
}

/// Response from `handle_key`, describing what the caller should do.
#[derive(Debug)]
pub struct KeyResponse {
    pub consumed: bool,
    pub commit: Option<String>,
    pub marked: Option<MarkedText>,
    pub candidates: CandidateAction,
}

impl KeyResponse {
    pub(crate) fn not_consumed() -> Self {
        Self {
            consumed: false,
            commit: None,
            marked: None,
            candidates: CandidateAction::Keep,
        }
    }

    pub(crate) fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::not_consumed()
        }
    }
}

pub(crate) fn cyclic_index(current: usize, delta: i32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let c = current as i32;
    let n = count as i32;
    ((c + delta + n) % n) as usize
}

#[cfg(test)]
mod tests {
    use super::cyclic_index;

    #[test]
    fn cyclic_index_wraps_both_ways() {
        assert_eq!(cyclic_index(0, 1, 2), 1);
        assert_eq!(cyclic_index(1, 1, 2), 0);
        assert_eq!(cyclic_index(0, -1, 2), 1);
        assert_eq!(cyclic_index(0, 1, 0), 0);
    }
}
