//! User-facing status messages.
//!
//! A single slot, last-write-wins, no history. Every network failure in the
//! workflows lands here as a generic error message keyed by the operation;
//! nothing below this layer is surfaced to the user.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Error,
    Success,
}

/// The message currently shown to the user, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Single-slot notice holder. Posting replaces whatever was there.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(%message, "notice");
        self.current = Some(Notice {
            kind: NoticeKind::Error,
            message,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.current = Some(Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        });
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
