//! Typewriter effect for the hero heading.
//!
//! Types a phrase one character at a time, holds it, deletes it, then moves
//! on to the next phrase. The caller owns the timer: every [`Typewriter::tick`]
//! returns the text to show and how long to wait before the next tick.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::timing;

/// Typewriter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterSettings {
    /// Phrases to cycle through
    pub phrases: Vec<String>,
    pub type_delay_ms: u64,
    pub delete_delay_ms: u64,
    /// How long a complete phrase stays before deletion starts
    pub hold_delay_ms: u64,
    /// Pause on the empty line between phrases
    pub pause_delay_ms: u64,
    /// Start over after the last phrase; otherwise stop once it is typed
    pub loop_phrases: bool,
}

impl Default for TypewriterSettings {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Mechanical Engineer".to_string(),
                "Embedded Developer".to_string(),
                "Maker".to_string(),
            ],
            type_delay_ms: timing::TYPE_DELAY_MS,
            delete_delay_ms: timing::DELETE_DELAY_MS,
            hold_delay_ms: timing::HOLD_DELAY_MS,
            pause_delay_ms: timing::PAUSE_DELAY_MS,
            loop_phrases: true,
        }
    }
}

/// What to display after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterFrame {
    pub text: String,
    /// `None` once the effect has finished
    pub next_delay: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    Deleting,
    Done,
}

/// Typewriter state machine.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    settings: TypewriterSettings,
    phrase: usize,
    visible: usize,
    phase: Phase,
}

impl Typewriter {
    pub fn new(settings: TypewriterSettings) -> Self {
        let phrases = settings
            .phrases
            .iter()
            .map(|p| p.chars().collect())
            .collect();
        Self {
            phrases,
            settings,
            phrase: 0,
            visible: 0,
            phase: Phase::Typing,
        }
    }

    /// Currently displayed text.
    pub fn text(&self) -> String {
        match self.phrases.get(self.phrase) {
            Some(chars) => chars[..self.visible].iter().collect(),
            None => String::new(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Advance one step.
    pub fn tick(&mut self) -> TypewriterFrame {
        if self.phrases.is_empty() {
            self.phase = Phase::Done;
            return self.frame(None);
        }

        let len = self.phrases[self.phrase].len();
        let delay = match self.phase {
            Phase::Typing => {
                if self.visible < len {
                    self.visible += 1;
                }
                if self.visible < len {
                    Some(self.settings.type_delay_ms)
                } else if self.stops_here() {
                    self.phase = Phase::Done;
                    None
                } else {
                    self.phase = Phase::Deleting;
                    Some(self.settings.hold_delay_ms)
                }
            }
            Phase::Deleting => {
                self.visible = self.visible.saturating_sub(1);
                if self.visible > 0 {
                    Some(self.settings.delete_delay_ms)
                } else {
                    self.phrase = (self.phrase + 1) % self.phrases.len();
                    self.phase = Phase::Typing;
                    Some(self.settings.pause_delay_ms)
                }
            }
            Phase::Done => None,
        };

        self.frame(delay.map(Duration::from_millis))
    }

    fn stops_here(&self) -> bool {
        !self.settings.loop_phrases && self.phrase + 1 == self.phrases.len()
    }

    fn frame(&self, next_delay: Option<Duration>) -> TypewriterFrame {
        TypewriterFrame {
            text: self.text(),
            next_delay,
        }
    }
}
