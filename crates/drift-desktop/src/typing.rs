//! Typed-word headline effect
//!
//! Types an intro word, then cycles through a shuffled list of names forever,
//! erasing and retyping one character at a time. Stepped from the frame loop
//! with host timestamps; each step performs every action that has come due.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Word typed once on page load
pub const INTRO_WORD: &str = "sding";

/// Names cycled after the intro
pub const NAMES: [&str; 3] = ["steph", "orion", "onion"];

const TYPE_DELAY_MS: Range<f64> = 50.0..190.0;
const ERASE_DELAY_MS: Range<f64> = 34.0..120.0;
const INTRO_HOLD_MS: Range<f64> = 760.0..1520.0;
const PAUSE_MS: Range<f64> = 120.0..340.0;
const HOLD_MS: Range<f64> = 620.0..1720.0;

/// Most actions performed by a single step before the schedule is rebased
const MAX_CATCH_UP: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingState {
    Typing,
    Holding,
    Erasing,
    Pausing,
}

/// Frame-stepped typing effect
#[derive(Debug)]
pub struct TypingText {
    rng: SmallRng,
    word: &'static str,
    /// Characters of `word` currently shown
    shown: usize,
    state: TypingState,
    next_at: f64,
    intro: bool,
    queue: Vec<&'static str>,
}

impl TypingText {
    /// Start typing the intro word at `now_ms`
    pub fn new(now_ms: f64) -> Self {
        Self::with_rng(now_ms, SmallRng::from_entropy())
    }

    pub fn with_seed(now_ms: f64, seed: u64) -> Self {
        Self::with_rng(now_ms, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(now_ms: f64, rng: SmallRng) -> Self {
        Self {
            rng,
            word: INTRO_WORD,
            shown: 0,
            state: TypingState::Typing,
            next_at: now_ms,
            intro: true,
            queue: Vec::with_capacity(NAMES.len()),
        }
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    /// Word being typed, erased or shown
    pub fn word(&self) -> &'static str {
        self.word
    }

    /// Currently visible text
    pub fn text(&self) -> &'static str {
        let end = self
            .word
            .char_indices()
            .nth(self.shown)
            .map_or(self.word.len(), |(i, _)| i);
        &self.word[..end]
    }

    /// Perform every action due by `now_ms`. Returns true if the text changed.
    pub fn step(&mut self, now_ms: f64) -> bool {
        if !now_ms.is_finite() {
            return false;
        }
        let before = self.shown;
        let before_word = self.word;

        let mut actions = 0;
        while now_ms >= self.next_at {
            if actions == MAX_CATCH_UP {
                self.next_at = now_ms;
                break;
            }
            self.act();
            actions += 1;
        }

        self.shown != before || self.word != before_word
    }

    fn act(&mut self) {
        match self.state {
            TypingState::Typing => {
                if self.shown < self.word.chars().count() {
                    self.shown += 1;
                    self.schedule(TYPE_DELAY_MS);
                } else {
                    self.state = TypingState::Holding;
                    let hold = if self.intro { INTRO_HOLD_MS } else { HOLD_MS };
                    self.intro = false;
                    self.schedule(hold);
                }
            }
            TypingState::Holding => {
                self.state = TypingState::Erasing;
            }
            TypingState::Erasing => {
                if self.shown > 0 {
                    self.shown -= 1;
                    self.schedule(ERASE_DELAY_MS);
                } else {
                    self.state = TypingState::Pausing;
                    self.schedule(PAUSE_MS);
                }
            }
            TypingState::Pausing => {
                self.word = self.next_name();
                self.state = TypingState::Typing;
            }
        }
    }

    fn schedule(&mut self, delay: Range<f64>) {
        self.next_at += self.rng.gen_range(delay);
    }

    /// Next name from the shuffled queue, skipping the word just shown
    fn next_name(&mut self) -> &'static str {
        if self.queue.is_empty() {
            self.queue.extend_from_slice(&NAMES);
            self.queue.shuffle(&mut self.rng);
        }
        match self.queue.pop() {
            Some(next) if next == self.word => self.queue.pop().unwrap_or(next),
            Some(next) => next,
            None => NAMES[0],
        }
    }
}
