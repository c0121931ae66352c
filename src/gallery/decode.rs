//! Bookkeeping for asynchronous image decodes.
//!
//! The controller never waits for a decode. It hands the surface a
//! [`DecodeRequest`] stamped with a [`DecodeTicket`] and later receives the
//! ticket back through `complete_decode`. The [`DecodeTracker`] decides which
//! completions still get to swap the visible image.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which decode completions are allowed to swap the visible image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Only the most recent request swaps; older completions are dropped
    #[default]
    LatestOnly,
    /// Every completion swaps, in whatever order the browser resolves them
    ApplyAll,
}

impl DecodePolicy {
    /// Get the display name for this policy.
    pub fn name(&self) -> &'static str {
        match self {
            DecodePolicy::LatestOnly => "Latest only",
            DecodePolicy::ApplyAll => "Apply all",
        }
    }
}

/// Generation-stamped token identifying one decode request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DecodeTicket(u64);

impl DecodeTicket {
    /// Generation number of this request.
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// A request for the surface to fetch and decode an image off-screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeRequest {
    /// Image location to decode
    pub src: String,
    /// Ticket to hand back on completion
    pub ticket: DecodeTicket,
}

/// Whether the surface will report back when the decode is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeSupport {
    /// A completion will be delivered later
    Deferred,
    /// Decode readiness can't be observed; swap right away
    Unavailable,
}

/// Result of an off-screen decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Image is ready to be shown
    Decoded,
    /// Decode failed; the image is shown anyway
    Failed(String),
}

/// Tracks outstanding decode requests and filters stale completions.
#[derive(Debug, Default)]
pub struct DecodeTracker {
    policy: DecodePolicy,
    next_generation: u64,
    /// Outstanding requests by ticket
    outstanding: HashMap<DecodeTicket, String>,
    /// Ticket whose completion may swap under `LatestOnly`
    latest: Option<DecodeTicket>,
}

impl DecodeTracker {
    pub fn new(policy: DecodePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Stamp a new request for `src`.
    pub fn issue(&mut self, src: String) -> DecodeRequest {
        let ticket = DecodeTicket(self.next_generation);
        self.next_generation += 1;
        self.outstanding.insert(ticket, src.clone());
        self.latest = Some(ticket);
        DecodeRequest { src, ticket }
    }

    /// Source of the request that would currently win, if any.
    pub fn latest_src(&self) -> Option<&str> {
        self.latest
            .and_then(|ticket| self.outstanding.get(&ticket))
            .map(String::as_str)
    }

    /// Forget a request the surface will never complete.
    pub fn forget(&mut self, ticket: DecodeTicket) {
        self.outstanding.remove(&ticket);
        if self.latest == Some(ticket) {
            self.latest = None;
        }
    }

    /// No outstanding request should replace the visible image anymore.
    ///
    /// Under `ApplyAll` older completions still swap when they arrive.
    pub fn invalidate(&mut self) {
        self.latest = None;
        if self.policy == DecodePolicy::LatestOnly {
            self.outstanding.clear();
        }
    }

    /// Resolve a completion. Returns the source to swap in, if any.
    pub fn complete(&mut self, ticket: DecodeTicket) -> Option<String> {
        let src = self.outstanding.remove(&ticket)?;
        let is_latest = self.latest == Some(ticket);
        if is_latest {
            self.latest = None;
        }

        match self.policy {
            DecodePolicy::ApplyAll => Some(src),
            DecodePolicy::LatestOnly if is_latest => Some(src),
            DecodePolicy::LatestOnly => {
                log::debug!(
                    "Dropping stale decode #{} for {}",
                    ticket.generation(),
                    src
                );
                None
            }
        }
    }

    /// Number of requests still waiting for completion.
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_are_monotonic() {
        let mut tracker = DecodeTracker::default();
        let a = tracker.issue("a.webp".to_string());
        let b = tracker.issue("b.webp".to_string());
        assert!(b.ticket > a.ticket);
        assert_eq!(tracker.latest_src(), Some("b.webp"));
        assert_eq!(tracker.outstanding(), 2);
    }

    #[test]
    fn test_latest_only_drops_stale_completion() {
        let mut tracker = DecodeTracker::new(DecodePolicy::LatestOnly);
        let first = tracker.issue("a.webp".to_string());
        let second = tracker.issue("b.webp".to_string());

        // Newer decode resolves first, then the old one
        assert_eq!(tracker.complete(second.ticket), Some("b.webp".to_string()));
        assert_eq!(tracker.complete(first.ticket), None);
        assert_eq!(tracker.outstanding(), 0);
    }

    #[test]
    fn test_apply_all_swaps_every_completion() {
        let mut tracker = DecodeTracker::new(DecodePolicy::ApplyAll);
        let first = tracker.issue("a.webp".to_string());
        let second = tracker.issue("b.webp".to_string());

        assert_eq!(tracker.complete(second.ticket), Some("b.webp".to_string()));
        assert_eq!(tracker.complete(first.ticket), Some("a.webp".to_string()));
    }

    #[test]
    fn test_invalidate() {
        let mut tracker = DecodeTracker::new(DecodePolicy::LatestOnly);
        let request = tracker.issue("a.webp".to_string());
        tracker.invalidate();
        assert_eq!(tracker.latest_src(), None);
        assert_eq!(tracker.complete(request.ticket), None);
    }

    #[test]
    fn test_unknown_ticket_is_ignored() {
        let mut tracker = DecodeTracker::new(DecodePolicy::ApplyAll);
        let request = tracker.issue("a.webp".to_string());
        tracker.forget(request.ticket);
        assert_eq!(tracker.complete(request.ticket), None);
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&DecodePolicy::ApplyAll).unwrap();
        assert_eq!(json, "\"apply_all\"");
        let policy: DecodePolicy = serde_json::from_str("\"latest_only\"").unwrap();
        assert_eq!(policy, DecodePolicy::LatestOnly);
    }
}
