//! Click / double-click disambiguation.
//!
//! A single click is held back for a short window. If a double click arrives
//! inside the window the pending click is dropped; otherwise it becomes due
//! and is handed out by [`ClickDebouncer::poll`]. Time is injected so that
//! nothing here ever sleeps.

use std::time::{Duration, Instant};

use crate::viewport::HitResult;

/// A single click whose window has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueClick {
    /// What the click hit, `None` for empty space
    pub hit: Option<HitResult>,
}

#[derive(Debug, Clone, Copy)]
struct PendingClick {
    hit: Option<HitResult>,
    at: Instant,
}

/// Holds back single clicks until the double-click window has passed.
#[derive(Debug, Clone)]
pub struct ClickDebouncer {
    window: Duration,
    pending: Option<PendingClick>,
}

impl ClickDebouncer {
    /// Creates a debouncer with the given window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Schedules a single click, replacing any click still pending.
    pub fn click(&mut self, hit: Option<HitResult>, now: Instant) {
        self.pending = Some(PendingClick { hit, at: now });
    }

    /// Drops the pending click. Returns true if one was suppressed.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// True while a single click is waiting.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the pending click once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<DueClick> {
        let pending = self.pending?;
        if now.saturating_duration_since(pending.at) < self.window {
            return None;
        }
        self.pending = None;
        Some(DueClick { hit: pending.hit })
    }
}
