//! Transient success/error notices.
//!
//! Notices expire `NOTICE_TTL` after they are posted or when dismissed. The
//! board never reads the clock itself: callers pass `Instant`s in, so expiry
//! is deterministic under test.

use std::time::{Duration, Instant};

pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
    pub posted_at: Instant,
}

impl Notice {
    pub fn expires_at(&self) -> Instant {
        self.posted_at + NOTICE_TTL
    }
}

/// Live notices, newest first.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeBoard {
    pub fn post(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) -> u64 {
        self.next_id += 1;
        let notice = Notice {
            id: self.next_id,
            kind,
            message: message.into(),
            posted_at: now,
        };
        self.notices.insert(0, notice);
        self.next_id
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) -> u64 {
        self.post(NoticeKind::Success, message, now)
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) -> u64 {
        self.post(NoticeKind::Error, format!("Error: {}", message.into()), now)
    }

    /// Returns whether a notice with that id was live.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != before
    }

    /// Drop every notice whose delay has elapsed at `now`.
    pub fn expire(&mut self, now: Instant) {
        self.notices.retain(|n| n.expires_at() > now);
    }

    pub fn live(&self) -> &[Notice] {
        &self.notices
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.notices.first()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
