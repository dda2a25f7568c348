//! Transient status banners.

use std::time::{Duration, Instant};

use tracing::{info, warn};

/// Default banner lifetime.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(4);

/// Banner flavour, which picks its icon and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// One visible banner.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub shown_at: Instant,
}

/// Shows at most one banner at a time; a new one replaces the old immediately.
#[derive(Debug)]
pub struct Notifier {
    current: Option<Notice>,
    delay: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl Notifier {
    pub fn new(delay: Duration) -> Self {
        Self { current: None, delay }
    }

    /// Show a banner now.
    pub fn notify(&mut self, message: impl Into<String>, kind: NoticeKind) {
        self.notify_at(message, kind, Instant::now());
    }

    /// Show a banner as of `now`.
    pub fn notify_at(&mut self, message: impl Into<String>, kind: NoticeKind, now: Instant) {
        let message = message.into();
        match kind {
            NoticeKind::Error => warn!("{message}"),
            NoticeKind::Success | NoticeKind::Info => info!("{message}"),
        }
        self.current = Some(Notice {
            message,
            kind,
            shown_at: now,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(message, NoticeKind::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(message, NoticeKind::Error);
    }

    /// The banner still visible at `now`.
    pub fn current(&self, now: Instant) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.shown_at) < self.delay)
    }

    /// Drop the banner once its delay has passed.
    pub fn expire(&mut self, now: Instant) {
        if self.current(now).is_none() {
            self.current = None;
        }
    }

    /// Time left before the visible banner disappears.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.current(now)
            .map(|n| self.delay.saturating_sub(now.saturating_duration_since(n.shown_at)))
    }

    /// Remove the banner immediately.
    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_replaces_oldest() {
        let mut notifier = Notifier::default();
        let now = Instant::now();
        notifier.notify_at("first", NoticeKind::Info, now);
        notifier.notify_at("second", NoticeKind::Error, now + Duration::from_millis(10));

        let visible = notifier.current(now + Duration::from_millis(20)).unwrap();
        assert_eq!(visible.message, "second");
        assert_eq!(visible.kind, NoticeKind::Error);
    }

    #[test]
    fn test_auto_dismiss_after_delay() {
        let mut notifier = Notifier::default();
        let now = Instant::now();
        notifier.notify_at("saved", NoticeKind::Success, now);

        assert!(notifier.current(now + Duration::from_millis(3999)).is_some());
        assert!(notifier.current(now + DEFAULT_DELAY).is_none());

        notifier.expire(now + DEFAULT_DELAY);
        assert!(notifier.current(now).is_none());
    }

    #[test]
    fn test_replacement_restarts_timer() {
        let mut notifier = Notifier::new(Duration::from_secs(4));
        let now = Instant::now();
        notifier.notify_at("a", NoticeKind::Info, now);
        notifier.notify_at("b", NoticeKind::Info, now + Duration::from_secs(3));
        assert!(notifier.current(now + Duration::from_secs(5)).is_some());
    }

    #[test]
    fn test_remaining() {
        let mut notifier = Notifier::new(Duration::from_secs(4));
        let now = Instant::now();
        assert_eq!(notifier.remaining(now), None);
        notifier.notify_at("a", NoticeKind::Info, now);
        assert_eq!(notifier.remaining(now + Duration::from_secs(1)), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_dismiss() {
        let mut notifier = Notifier::default();
        notifier.error("boom");
        notifier.dismiss();
        assert!(notifier.current(Instant::now()).is_none());
    }
}
