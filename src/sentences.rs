use itertools::Itertools;
use std::error::Error;
use std::fmt;

/// Fatal configuration error: the sentence source yielded nothing to type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoSentences;

impl fmt::Display for NoSentences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sentence list is empty; provide at least one sentence")
    }
}

impl Error for NoSentences {}

/// Result of advancing past the last word of the current sentence's word list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorStep {
    /// A new word is ready to be typed.
    Word,
    /// Every sentence has been typed; the drill is over.
    Complete,
}

/// Tracks the position within the sentence list and exposes the word the
/// user must type next.
///
/// Sentences are split on whitespace at load time; a sentence that yields no
/// words is skipped locally rather than surfaced as an error.
#[derive(Debug, Clone)]
pub struct SentenceCursor {
    sentences: Vec<String>,
    sentence_idx: usize,
    words: Vec<String>,
    word_idx: usize,
    complete: bool,
}

impl SentenceCursor {
    pub fn new(sentences: Vec<String>) -> Result<Self, NoSentences> {
        if sentences.is_empty() {
            return Err(NoSentences);
        }
        let mut cursor = Self {
            sentences,
            sentence_idx: 0,
            words: Vec::new(),
            word_idx: 0,
            complete: false,
        };
        cursor.load_sentence(0);
        Ok(cursor)
    }

    /// Load the sentence at `index`, skipping forward past empty sentences.
    /// Marks the cursor complete when `index` runs off the end of the list.
    fn load_sentence(&mut self, index: usize) {
        let mut index = index;
        while index < self.sentences.len() {
            let words = self.sentences[index]
                .split_whitespace()
                .map(String::from)
                .collect_vec();
            if !words.is_empty() {
                self.sentence_idx = index;
                self.words = words;
                self.word_idx = 0;
                return;
            }
            // Empty sentence: recover locally by skipping to the next one.
            index += 1;
        }
        self.sentence_idx = index;
        self.words.clear();
        self.word_idx = 0;
        self.complete = true;
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn sentence_index(&self) -> usize {
        self.sentence_idx
    }

    /// The word the user must type next, or `None` once every sentence is done.
    pub fn current_word(&self) -> Option<&str> {
        if self.complete {
            None
        } else {
            self.words.get(self.word_idx).map(String::as_str)
        }
    }

    /// Move to the next word, rolling over to the next sentence when the
    /// current one is exhausted.
    pub fn advance_word(&mut self) -> CursorStep {
        if self.complete {
            return CursorStep::Complete;
        }
        self.word_idx += 1;
        if self.word_idx >= self.words.len() {
            self.load_sentence(self.sentence_idx + 1);
        }
        if self.complete {
            CursorStep::Complete
        } else {
            CursorStep::Word
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn cursor(sentences: &[&str]) -> SentenceCursor {
        SentenceCursor::new(sentences.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn empty_list_is_fatal() {
        assert_matches!(SentenceCursor::new(vec![]), Err(NoSentences));
    }

    #[test]
    fn walks_words_within_a_sentence() {
        let mut c = cursor(&["cat dog"]);
        assert_eq!(c.current_word(), Some("cat"));
        assert_eq!(c.advance_word(), CursorStep::Word);
        assert_eq!(c.current_word(), Some("dog"));
        assert_eq!(c.advance_word(), CursorStep::Complete);
        assert_eq!(c.current_word(), None);
        assert!(c.is_complete());
    }

    #[test]
    fn rolls_over_to_next_sentence() {
        let mut c = cursor(&["hi", "there you"]);
        assert_eq!(c.current_word(), Some("hi"));
        assert_eq!(c.advance_word(), CursorStep::Word);
        assert_eq!(c.sentence_index(), 1);
        assert_eq!(c.current_word(), Some("there"));
    }

    #[test]
    fn skips_empty_sentences() {
        let mut c = cursor(&["", "   ", "cat dog"]);
        assert_eq!(c.current_word(), Some("cat"));
        assert_eq!(c.sentence_index(), 2);

        c.advance_word();
        assert_eq!(c.current_word(), Some("dog"));
    }

    #[test]
    fn trailing_empty_sentence_completes() {
        let mut c = cursor(&["hi", ""]);
        assert_eq!(c.advance_word(), CursorStep::Complete);
        assert!(c.is_complete());
    }

    #[test]
    fn all_empty_sentences_complete_immediately() {
        let c = cursor(&["", "  "]);
        assert!(c.is_complete());
        assert_eq!(c.current_word(), None);
    }

    #[test]
    fn advance_after_complete_stays_complete() {
        let mut c = cursor(&["hi"]);
        assert_eq!(c.advance_word(), CursorStep::Complete);
        assert_eq!(c.advance_word(), CursorStep::Complete);
    }

    #[test]
    fn multiple_spaces_split_cleanly() {
        let mut c = cursor(&["a   b"]);
        assert_eq!(c.current_word(), Some("a"));
        c.advance_word();
        assert_eq!(c.current_word(), Some("b"));
    }
}
