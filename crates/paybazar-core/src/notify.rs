//! User-facing notices.
//!
//! The toast surface itself is presentation; this is the seam the core
//! raises notices through. The session gate and form submission paths
//! emit here, and the embedding decides how to render.

use std::sync::Mutex;

use tracing::{info, warn};

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Routine confirmation.
    Info,
    /// Failure the user must act on.
    Destructive,
}

/// A user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Presentation severity.
    pub severity: Severity,
    /// Short headline.
    pub title: String,
    /// Supporting detail.
    pub detail: String,
}

impl Notice {
    /// Creates a routine confirmation notice.
    #[must_use]
    pub fn info(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            title: title.into(),
            detail: detail.into(),
        }
    }

    /// Creates a destructive notice.
    #[must_use]
    pub fn destructive(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Destructive,
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Sink for user-facing notices.
pub trait Notifier {
    /// Delivers a notice.
    fn notify(&self, notice: Notice);
}

/// Notifier that forwards notices to the tracing pipeline.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Creates a tracing-backed notifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Info => info!(title = %notice.title, detail = %notice.detail, "notice"),
            Severity::Destructive => {
                warn!(title = %notice.title, detail = %notice.detail, "notice");
            },
        }
    }
}

/// Notifier that records notices for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every notice delivered so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notifier lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}
