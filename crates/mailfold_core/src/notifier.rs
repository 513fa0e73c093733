use std::time::Duration;

use crate::Effect;

/// Identifies one armed hide timer. A fresh token is issued on every `show`.
pub type TimerToken = u64;

pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

/// Banner that auto-hides after a fixed duration.
///
/// At most one message is visible and at most one timer is armed. Timers are
/// run outside the core; this type only hands out the arm/cancel effects and
/// ignores expiries for tokens it no longer waits on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientNotifier {
    current: Option<Notice>,
    pending: Option<TimerToken>,
    next_token: TimerToken,
    duration: Duration,
}

impl Default for TransientNotifier {
    fn default() -> Self {
        Self::new(NOTICE_DURATION)
    }
}

impl TransientNotifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            pending: None,
            next_token: 1,
            duration,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, kind: NoticeKind) -> Vec<Effect> {
        let mut effects = self.cancel_pending();
        let token = self.next_token;
        self.next_token += 1;
        self.current = Some(Notice {
            message: message.into(),
            kind,
        });
        self.pending = Some(token);
        effects.push(Effect::ArmNoticeTimer {
            token,
            after: self.duration,
        });
        effects
    }

    pub fn hide(&mut self) -> Vec<Effect> {
        self.current = None;
        self.cancel_pending()
    }

    /// Applies a fired timer. Returns true if the notice was hidden.
    pub fn expire(&mut self, token: TimerToken) -> bool {
        if self.pending != Some(token) {
            return false;
        }
        self.pending = None;
        self.current.take().is_some()
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.pending
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    fn cancel_pending(&mut self) -> Vec<Effect> {
        match self.pending.take() {
            Some(token) => vec![Effect::CancelNoticeTimer { token }],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn second_show_replaces_message_and_timer() {
        let mut notifier = TransientNotifier::default();
        let first = notifier.show("one", NoticeKind::Success);
        assert_eq!(
            first,
            vec![Effect::ArmNoticeTimer {
                token: 1,
                after: NOTICE_DURATION
            }]
        );

        let second = notifier.show("two", NoticeKind::Error);
        assert_eq!(
            second,
            vec![
                Effect::CancelNoticeTimer { token: 1 },
                Effect::ArmNoticeTimer {
                    token: 2,
                    after: NOTICE_DURATION
                },
            ]
        );
        assert_eq!(notifier.current().unwrap().message, "two");
        assert_eq!(notifier.pending_timer(), Some(2));
    }

    #[test]
    fn stale_timer_does_not_hide_newer_message() {
        let mut notifier = TransientNotifier::default();
        notifier.show("one", NoticeKind::Success);
        notifier.show("two", NoticeKind::Success);

        assert!(!notifier.expire(1));
        assert_eq!(notifier.current().unwrap().message, "two");

        assert!(notifier.expire(2));
        assert!(notifier.current().is_none());
        assert_eq!(notifier.pending_timer(), None);
    }

    #[test]
    fn hide_cancels_pending_timer() {
        let mut notifier = TransientNotifier::new(Duration::from_millis(10));
        notifier.show("one", NoticeKind::Error);
        assert_eq!(notifier.hide(), vec![Effect::CancelNoticeTimer { token: 1 }]);
        assert!(notifier.current().is_none());
        assert!(notifier.hide().is_empty());
    }
}
