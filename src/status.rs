use crate::debounce::Debounce;
use std::time::{Duration, Instant};

pub const STATUS_DURATION: Duration = Duration::from_millis(1600);

/// Transient status text that clears itself after a short delay.
#[derive(Debug, Clone)]
pub struct StatusLine {
    text: Option<String>,
    clear_timer: Debounce,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(STATUS_DURATION)
    }
}

impl StatusLine {
    pub fn new(duration: Duration) -> Self {
        Self {
            text: None,
            clear_timer: Debounce::new(duration),
        }
    }

    /// Replace the current message and restart the clear timer.
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::debug!(%message, "status");
        self.text = Some(message);
        self.clear_timer.schedule(now);
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn tick(&mut self, now: Instant) {
        if self.clear_timer.poll(now) {
            self.text = None;
        }
    }

    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.clear_timer.remaining(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_clears_after_duration() {
        let t0 = Instant::now();
        let mut status = StatusLine::default();
        status.show("Copied: Ctrl+C", t0);
        status.tick(t0 + Duration::from_millis(1599));
        assert_eq!(status.text(), Some("Copied: Ctrl+C"));
        status.tick(t0 + STATUS_DURATION);
        assert_eq!(status.text(), None);
    }

    #[test]
    fn newer_message_restarts_timer() {
        let t0 = Instant::now();
        let mut status = StatusLine::default();
        status.show("first", t0);
        status.show("second", t0 + Duration::from_millis(1000));
        status.tick(t0 + STATUS_DURATION);
        assert_eq!(status.text(), Some("second"));
        status.tick(t0 + Duration::from_millis(2600));
        assert_eq!(status.text(), None);
    }
}
