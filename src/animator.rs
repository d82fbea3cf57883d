use crate::session::TypingSession;
use crate::util::{clamp01, lerp_color, Palette, Rgb};
use itertools::Itertools;
use std::collections::HashMap;

/// Error flash duration: error color for the first half, base for the rest.
pub const ERROR_FLASH_SECS: f64 = 0.25;
/// Delay between a correct match and the start of its success fade.
pub const CONFIRM_DELAY_SECS: f64 = 0.1;
/// Linear base-to-success fade duration.
pub const SUCCESS_FADE_SECS: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    /// Waiting out the confirmation delay; the letter still renders base.
    ConfirmDelay,
    SuccessFade,
    ErrorFlash,
}

#[derive(Clone, Debug)]
struct Animation {
    stage: Stage,
    elapsed: f64,
    word_final: bool,
    seq: u64,
}

/// Raised by [`LetterAnimator::tick`] when a timed transition finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationEvent {
    /// The word-final success fade settled; the cursor may advance.
    WordFinished,
}

/// Drives timed color transitions for individual letter indices.
///
/// Animations live in an explicit `{index -> state}` table advanced by the
/// host tick. Starting an animation for an index replaces any entry already
/// running for that index, so the most recent input event always wins.
#[derive(Debug, Default)]
pub struct LetterAnimator {
    table: HashMap<usize, Animation>,
    next_seq: u64,
}

impl LetterAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, index: usize, stage: Stage, word_final: bool) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.table.insert(
            index,
            Animation {
                stage,
                elapsed: 0.0,
                word_final,
                seq,
            },
        );
    }

    /// Schedule the confirmation delay (and eventual success fade) for a
    /// letter that was just matched.
    pub fn start_confirmation(&mut self, index: usize, word_final: bool) {
        self.insert(index, Stage::ConfirmDelay, word_final);
    }

    /// Schedule an error flash at the caret for a mismatched letter.
    pub fn start_error_flash(&mut self, index: usize) {
        self.insert(index, Stage::ErrorFlash, false);
    }

    /// Drop every animation at once. Called when a word or sentence reset
    /// invalidates all pending indices.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.table.is_empty()
    }

    pub fn is_animating(&self, index: usize) -> bool {
        self.table.contains_key(&index)
    }

    /// Advance every animation by `dt` seconds.
    ///
    /// Delay expiry re-checks the pending set: an index invalidated by an
    /// intervening reset is dropped silently instead of fading. Overshoot is
    /// carried from the delay into the fade so a coarse tick cannot stall a
    /// letter between stages.
    pub fn tick(&mut self, dt: f64, session: &mut TypingSession) -> Vec<AnimationEvent> {
        let mut events = Vec::new();

        for index in self.table.keys().copied().sorted() {
            let Some(mut anim) = self.table.remove(&index) else {
                continue;
            };
            anim.elapsed += dt;

            loop {
                match anim.stage {
                    Stage::ConfirmDelay => {
                        if anim.elapsed < CONFIRM_DELAY_SECS {
                            self.table.insert(index, anim);
                            break;
                        }
                        if !session.pending.remove(&index) {
                            // Invalidated by a reset; abort silently.
                            break;
                        }
                        anim.elapsed -= CONFIRM_DELAY_SECS;
                        anim.stage = Stage::SuccessFade;
                    }
                    Stage::SuccessFade => {
                        if anim.elapsed < SUCCESS_FADE_SECS {
                            self.table.insert(index, anim);
                        } else if anim.word_final {
                            events.push(AnimationEvent::WordFinished);
                        }
                        break;
                    }
                    Stage::ErrorFlash => {
                        if anim.elapsed < ERROR_FLASH_SECS {
                            self.table.insert(index, anim);
                        }
                        break;
                    }
                }
            }
        }

        events
    }

    /// The single animated-letter override handed to the renderer.
    ///
    /// Letters inside their confirmation delay render base via the pending
    /// rule and need no override; among the visible transitions the most
    /// recently started one wins.
    pub fn override_color(&self, palette: &Palette) -> Option<(usize, Rgb)> {
        self.table
            .iter()
            .filter(|(_, anim)| anim.stage != Stage::ConfirmDelay)
            .max_by_key(|(_, anim)| anim.seq)
            .map(|(&index, anim)| (index, Self::sample(anim, palette)))
    }

    fn sample(anim: &Animation, palette: &Palette) -> Rgb {
        match anim.stage {
            Stage::SuccessFade => lerp_color(
                palette.base,
                palette.success,
                clamp01(anim.elapsed / SUCCESS_FADE_SECS),
            ),
            Stage::ErrorFlash => {
                let t = clamp01(anim.elapsed / ERROR_FLASH_SECS);
                if t < 0.5 {
                    palette.error
                } else {
                    palette.base
                }
            }
            Stage::ConfirmDelay => palette.base,
        }
    }
}
