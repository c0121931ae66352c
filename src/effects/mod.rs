//! Page effects outside the lightbox.
//!
//! Each effect is a small policy with no DOM knowledge; the browser glue feeds
//! it scroll offsets, visibility ratios and timer ticks and applies what it
//! returns.

pub mod autoplay;
pub mod navbar;
pub mod reveal;
pub mod typewriter;

use serde::{Deserialize, Serialize};

pub use autoplay::{AutoplayPolicy, AutoplaySettings, VideoCommand};
pub use navbar::{NavbarChange, NavbarSettings, NavbarTracker};
pub use reveal::{RevealSettings, RevealTracker};
pub use typewriter::{Typewriter, TypewriterFrame, TypewriterSettings};

/// Settings for all page effects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsSettings {
    pub typewriter: TypewriterSettings,
    pub reveal: RevealSettings,
    pub navbar: NavbarSettings,
    pub autoplay: AutoplaySettings,
}
