//! Show/hide/pin state machine for the HUD popups.
//!
//! Pointer hover is tracked per region. Leaving the last hovered region does
//! not close the popups right away; a close is scheduled after
//! [`CLOSE_DELAY`] and any later enter cancels it, so moving the pointer
//! between adjacent regions never makes the popups flicker.

use crate::debounce::Debounce;
use std::collections::HashSet;
use std::hash::Hash;
use std::time::{Duration, Instant};

pub const CLOSE_DELAY: Duration = Duration::from_millis(200);

/// Visibility change the shell must apply to every popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupSignal {
    Open,
    Close,
}

#[derive(Debug, Clone)]
pub struct PopupVisibilityController<R> {
    pinned: bool,
    open: bool,
    hovered: HashSet<R>,
    close_timer: Debounce,
}

impl<R: Eq + Hash> PopupVisibilityController<R> {
    /// A controller for a new session. Popups start open iff pinned.
    pub fn new(pinned: bool) -> Self {
        Self {
            pinned,
            open: pinned,
            hovered: HashSet::new(),
            close_timer: Debounce::new(CLOSE_DELAY),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn is_hovered(&self, region: &R) -> bool {
        self.hovered.contains(region)
    }

    pub fn is_close_pending(&self) -> bool {
        self.close_timer.is_pending()
    }

    fn set_open(&mut self, open: bool) -> Option<PopupSignal> {
        if self.open == open {
            return None;
        }
        self.open = open;
        tracing::debug!(open, "popup visibility changed");
        Some(if open {
            PopupSignal::Open
        } else {
            PopupSignal::Close
        })
    }

    fn schedule_close(&mut self, now: Instant) {
        if self.pinned {
            return;
        }
        self.close_timer.schedule(now);
    }

    /// Pinning opens immediately. Unpinning only schedules a close so the
    /// usual hover grace period still applies.
    pub fn set_pinned(&mut self, pinned: bool, now: Instant) -> Option<PopupSignal> {
        self.pinned = pinned;
        if pinned {
            self.close_timer.cancel();
            self.set_open(true)
        } else {
            self.schedule_close(now);
            None
        }
    }

    /// Flip the pin. Returns the new pinned value along with any signal; the
    /// caller is responsible for persisting it.
    pub fn on_toggle_pin(&mut self, now: Instant) -> (bool, Option<PopupSignal>) {
        let pinned = !self.pinned;
        let signal = self.set_pinned(pinned, now);
        (pinned, signal)
    }

    pub fn on_region_enter(&mut self, region: R) -> Option<PopupSignal> {
        self.hovered.insert(region);
        self.close_timer.cancel();
        self.set_open(true)
    }

    /// Leaving a region that was never entered is ignored.
    pub fn on_region_leave(&mut self, region: &R, now: Instant) {
        if !self.hovered.remove(region) {
            return;
        }
        self.schedule_close(now);
    }

    /// Runs when the close delay elapsed without cancellation.
    pub fn on_close_timer_fired(&mut self) -> Option<PopupSignal> {
        if self.pinned || !self.hovered.is_empty() {
            return None;
        }
        self.set_open(false)
    }

    /// Drive the close timer; call on every frame or event loop turn.
    pub fn tick(&mut self, now: Instant) -> Option<PopupSignal> {
        if self.close_timer.poll(now) {
            self.on_close_timer_fired()
        } else {
            None
        }
    }

    /// When the shell should call [`tick`](Self::tick) next, if at all.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.close_timer.remaining(now)
    }

    /// Keyboard dismissal. Ignored while pinned.
    pub fn on_escape(&mut self) -> Option<PopupSignal> {
        if self.pinned || !self.open {
            return None;
        }
        self.close_timer.cancel();
        self.set_open(false)
    }

    /// Minimizing always closes, pinned or not.
    pub fn on_window_minimized(&mut self) -> Option<PopupSignal> {
        self.close_timer.cancel();
        self.set_open(false)
    }
}

impl<R: Eq + Hash> Default for PopupVisibilityController<R> {
    fn default() -> Self {
        Self::new(false)
    }
}
