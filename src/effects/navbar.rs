//! Navbar that hides while scrolling down and returns when scrolling up.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use web_time::Instant;

use crate::constants::{thresholds, timing};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarSettings {
    /// Always shown above this scroll offset (px)
    pub top_offset: f64,
    /// Smaller scroll movements are ignored (px)
    pub tolerance: f64,
    /// Minimum time between processed scroll events
    pub throttle_ms: u64,
}

impl Default for NavbarSettings {
    fn default() -> Self {
        Self {
            top_offset: thresholds::NAVBAR_TOP_OFFSET,
            tolerance: thresholds::NAVBAR_TOLERANCE,
            throttle_ms: timing::SCROLL_THROTTLE_MS,
        }
    }
}

/// Visibility change to apply to the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarChange {
    Show,
    Hide,
}

/// Scroll-direction tracker for the navbar.
#[derive(Debug, Clone)]
pub struct NavbarTracker {
    settings: NavbarSettings,
    last_y: f64,
    last_processed: Option<Instant>,
    hidden: bool,
}

impl NavbarTracker {
    pub fn new(settings: NavbarSettings) -> Self {
        Self {
            settings,
            last_y: 0.0,
            last_processed: None,
            hidden: false,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Feed the current vertical scroll offset.
    ///
    /// Returns a change only when the navbar should switch visibility.
    pub fn on_scroll(&mut self, y: f64, now: Instant) -> Option<NavbarChange> {
        let throttle = Duration::from_millis(self.settings.throttle_ms);
        if let Some(last) = self.last_processed {
            if now.saturating_duration_since(last) < throttle {
                return None;
            }
        }
        self.last_processed = Some(now);

        let delta = y - self.last_y;
        let hide = if y <= self.settings.top_offset {
            false
        } else if delta > self.settings.tolerance {
            true
        } else if delta < -self.settings.tolerance {
            false
        } else {
            // Jitter; keep the reference point so slow scrolls add up
            return None;
        };
        self.last_y = y;

        if hide == self.hidden {
            return None;
        }
        self.hidden = hide;
        Some(if hide {
            NavbarChange::Hide
        } else {
            NavbarChange::Show
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> NavbarTracker {
        NavbarTracker::new(NavbarSettings {
            top_offset: 50.0,
            tolerance: 5.0,
            throttle_ms: 100,
        })
    }

    #[test]
    fn test_hide_on_scroll_down_show_on_scroll_up() {
        let mut nav = tracker();
        let t0 = Instant::now();
        let step = Duration::from_millis(150);

        assert_eq!(nav.on_scroll(200.0, t0), Some(NavbarChange::Hide));
        assert!(nav.is_hidden());
        assert_eq!(nav.on_scroll(400.0, t0 + step), None);
        assert_eq!(nav.on_scroll(300.0, t0 + step * 2), Some(NavbarChange::Show));
        assert!(!nav.is_hidden());
    }

    #[test]
    fn test_always_visible_near_top() {
        let mut nav = tracker();
        let t0 = Instant::now();
        let step = Duration::from_millis(150);

        assert_eq!(nav.on_scroll(40.0, t0), None);
        assert_eq!(nav.on_scroll(300.0, t0 + step), Some(NavbarChange::Hide));
        assert_eq!(nav.on_scroll(20.0, t0 + step * 2), Some(NavbarChange::Show));
    }

    #[test]
    fn test_throttle_skips_rapid_events() {
        let mut nav = tracker();
        let t0 = Instant::now();

        assert_eq!(nav.on_scroll(40.0, t0), None);
        assert_eq!(nav.on_scroll(500.0, t0 + Duration::from_millis(10)), None);
        assert!(!nav.is_hidden());
        assert_eq!(
            nav.on_scroll(500.0, t0 + Duration::from_millis(120)),
            Some(NavbarChange::Hide)
        );
    }

    #[test]
    fn test_small_movements_accumulate() {
        let mut nav = tracker();
        let t0 = Instant::now();
        let step = Duration::from_millis(150);

        nav.on_scroll(100.0, t0);
        assert!(nav.is_hidden());
        // Each step is within tolerance of the last accepted offset
        assert_eq!(nav.on_scroll(97.0, t0 + step), None);
        assert_eq!(nav.on_scroll(94.0, t0 + step * 2), Some(NavbarChange::Show));
    }
}
