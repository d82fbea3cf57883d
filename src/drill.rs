use crate::animator::{AnimationEvent, LetterAnimator};
use crate::sentences::{CursorStep, NoSentences, SentenceCursor};
use crate::session::TypingSession;
use crate::timer::TimerGate;

/// Aggregate state for one typing drill: the sentence cursor, the per-word
/// typing session, the stamina gate, and the letter animations.
///
/// All mutation flows through `on_tick`, `toggle`, and `write`, in that
/// order within a frame, so a render between calls always sees a consistent
/// snapshot.
#[derive(Debug)]
pub struct Drill {
    cursor: SentenceCursor,
    pub session: TypingSession,
    pub gate: TimerGate,
    pub animator: LetterAnimator,
    word: String,
    finished: bool,
}

impl Drill {
    pub fn new(sentences: Vec<String>, max_stamina: f64) -> Result<Self, NoSentences> {
        let cursor = SentenceCursor::new(sentences)?;
        let word = cursor.current_word().unwrap_or_default().to_string();
        let finished = cursor.is_complete();
        Ok(Self {
            cursor,
            session: TypingSession::default(),
            gate: TimerGate::new(max_stamina),
            animator: LetterAnimator::new(),
            word,
            finished,
        })
    }

    /// The word the user is currently typing. Empty once the drill is over.
    pub fn current_word(&self) -> &str {
        &self.word
    }

    pub fn sentence_index(&self) -> usize {
        self.cursor.sentence_index()
    }

    pub fn has_finished(&self) -> bool {
        self.finished
    }

    /// Handle the toggle key. Forwarded to the gate, which ignores it during
    /// a forced recharge.
    pub fn toggle(&mut self) {
        if self.finished {
            return;
        }
        self.gate.toggle();
    }

    /// Advance the gate and every running animation by `dt` seconds.
    /// A finishing word-final fade cascades into the next word or sentence.
    pub fn on_tick(&mut self, dt: f64) {
        if self.finished {
            return;
        }
        self.gate.tick(dt);
        for event in self.animator.tick(dt, &mut self.session) {
            match event {
                AnimationEvent::WordFinished => self.advance_word(),
            }
        }
    }

    /// Validate one submitted letter against the caret position.
    ///
    /// Ignored while the gate is closed, after the drill has finished, for
    /// non-letter characters, and when the caret already sits past the last
    /// letter (word-final animation still in flight). Comparison is
    /// case-insensitive.
    pub fn write(&mut self, c: char) {
        if self.finished || !self.gate.accepts_input() || !c.is_alphabetic() {
            return;
        }

        let caret = self.session.caret;
        let expected = match self.word.chars().nth(caret) {
            Some(expected) => expected,
            None => return,
        };

        if c.to_lowercase().eq(expected.to_lowercase()) {
            self.session.wrong = false;
            self.session.pending.insert(caret);
            self.session.caret += 1;
            let word_final = self.session.caret == self.word.chars().count();
            self.animator.start_confirmation(caret, word_final);
        } else {
            self.session.wrong = true;
            self.animator.start_error_flash(caret);
        }
    }

    fn advance_word(&mut self) {
        match self.cursor.advance_word() {
            CursorStep::Word => {
                if let Some(word) = self.cursor.current_word() {
                    self.word = word.to_string();
                }
            }
            CursorStep::Complete => {
                self.word.clear();
                self.finished = true;
            }
        }
        self.session.reset();
        self.animator.clear();
    }
}
