//! One-shot reveal of page sections as they scroll into view.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::thresholds;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    /// Visible ratio at which an element is revealed
    pub threshold: f64,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            threshold: thresholds::REVEAL_RATIO,
        }
    }
}

/// Remembers which elements have already been revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    threshold: f64,
    revealed: HashSet<String>,
}

impl RevealTracker {
    pub fn new(settings: RevealSettings) -> Self {
        Self {
            threshold: settings.threshold.clamp(0.0, 1.0),
            revealed: HashSet::new(),
        }
    }

    /// Report the visible ratio of element `key`.
    ///
    /// Returns true exactly once per element, the first time the ratio
    /// reaches the threshold.
    pub fn observe(&mut self, key: &str, ratio: f64) -> bool {
        if ratio < self.threshold || self.revealed.contains(key) {
            return false;
        }
        self.revealed.insert(key.to_string());
        true
    }

    pub fn is_revealed(&self, key: &str) -> bool {
        self.revealed.contains(key)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_once() {
        let mut tracker = RevealTracker::new(RevealSettings { threshold: 0.2 });
        assert!(!tracker.observe("about", 0.1));
        assert!(tracker.observe("about", 0.2));
        assert!(!tracker.observe("about", 0.9));
        assert!(!tracker.observe("about", 0.0));
        assert!(tracker.is_revealed("about"));
        assert!(!tracker.is_revealed("contact"));
        assert_eq!(tracker.revealed_count(), 1);
    }

    #[test]
    fn test_threshold_is_clamped() {
        let mut tracker = RevealTracker::new(RevealSettings { threshold: 3.0 });
        assert!(tracker.observe("a", 1.0));
    }
}
