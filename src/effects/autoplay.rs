//! Visibility-driven video autoplay.
//!
//! One policy for every `video[data-autoplay]` on the page, fed by a single
//! intersection observer. Separate play and pause thresholds keep a video
//! that sits at the edge of the viewport from flickering between states.
//! The videos' own `play`/`pause` events are fed back in as well, so a video
//! the visitor paused stays paused when it scrolls back into view.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::thresholds;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplaySettings {
    /// Visible ratio at which a video starts playing
    pub play_threshold: f64,
    /// Visible ratio below which a playing video pauses
    pub pause_threshold: f64,
}

impl Default for AutoplaySettings {
    fn default() -> Self {
        Self {
            play_threshold: thresholds::AUTOPLAY_PLAY_RATIO,
            pause_threshold: thresholds::AUTOPLAY_PAUSE_RATIO,
        }
    }
}

/// Command for the page glue to apply to a video element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCommand {
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy, Default)]
struct VideoState {
    playing: bool,
    user_paused: bool,
    /// Last command issued whose media event hasn't come back yet
    pending: Option<VideoCommand>,
}

/// Tracks autoplay videos and decides when to play or pause them.
#[derive(Debug, Clone, Default)]
pub struct AutoplayPolicy {
    play_threshold: f64,
    pause_threshold: f64,
    videos: HashMap<String, VideoState>,
}

impl AutoplayPolicy {
    pub fn new(settings: AutoplaySettings) -> Self {
        let play_threshold = settings.play_threshold.clamp(0.0, 1.0);
        let pause_threshold = settings.pause_threshold.clamp(0.0, play_threshold);
        if pause_threshold != settings.pause_threshold {
            log::warn!(
                "Autoplay pause threshold {} clamped to {}",
                settings.pause_threshold,
                pause_threshold
            );
        }
        Self {
            play_threshold,
            pause_threshold,
            videos: HashMap::new(),
        }
    }

    /// Report the visible ratio of video `key`.
    pub fn on_visibility(&mut self, key: &str, ratio: f64) -> Option<VideoCommand> {
        let state = self.videos.entry(key.to_string()).or_default();

        let command = if ratio >= self.play_threshold && !state.playing && !state.user_paused {
            state.playing = true;
            VideoCommand::Play
        } else if ratio < self.pause_threshold && state.playing {
            state.playing = false;
            VideoCommand::Pause
        } else {
            return None;
        };
        state.pending = Some(command);
        Some(command)
    }

    /// Report a `play` or `pause` event fired by video `key`.
    ///
    /// Events echoing the last issued command are absorbed. Anything else came
    /// from the visitor: a pause suppresses autoplay, a play lifts it. Returns
    /// true for visitor actions.
    pub fn on_playback_event(&mut self, key: &str, playing: bool) -> bool {
        let observed = if playing {
            VideoCommand::Play
        } else {
            VideoCommand::Pause
        };
        let state = self.videos.entry(key.to_string()).or_default();
        if state.pending == Some(observed) {
            state.pending = None;
            return false;
        }

        self.set_user_paused(key, !playing);
        true
    }

    /// The visitor paused (or resumed) this video by hand.
    pub fn set_user_paused(&mut self, key: &str, paused: bool) {
        let state = self.videos.entry(key.to_string()).or_default();
        state.user_paused = paused;
        state.playing = !paused;
        state.pending = None;
    }

    pub fn is_playing(&self, key: &str) -> bool {
        self.videos.get(key).is_some_and(|state| state.playing)
    }

    /// Stop tracking a video that left the page.
    pub fn forget(&mut self, key: &str) {
        self.videos.remove(key);
    }
}
