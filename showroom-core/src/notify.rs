//! User-facing outcome messages and the sink that displays them.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A toast-style message: short title plus one sentence of detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn failure(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: NotificationKind::Failure,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Failure notice for an operation the core refused.
    pub fn rejected(error: &impl fmt::Display) -> Self {
        Self::failure("Action not allowed", error.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}

impl fmt::Display for Notification {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Where notifications are shown. Supplied by the presentation layer.
pub trait NotificationSink {
    fn notify(
        &self,
        notification: &Notification,
    );
}

/// Sink that records notifications as log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(
        &self,
        notification: &Notification,
    ) {
        match notification.kind {
            NotificationKind::Success => {
                info!(title = %notification.title, "{}", notification.description)
            }
            NotificationKind::Failure => {
                warn!(title = %notification.title, "{}", notification.description)
            }
        }
    }
}
