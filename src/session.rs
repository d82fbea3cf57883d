use std::collections::HashSet;

/// Per-word typing state: the caret, matched letters awaiting their
/// confirmation animation, and whether the caret position was most recently
/// mistyped.
#[derive(Debug, Clone, Default)]
pub struct TypingSession {
    pub caret: usize,
    pub pending: HashSet<usize>,
    pub wrong: bool,
}

impl TypingSession {
    /// Clear all per-word state. Called whenever a new word or sentence loads.
    pub fn reset(&mut self) {
        self.caret = 0;
        self.pending.clear();
        self.wrong = false;
    }
}
