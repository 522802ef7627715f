//! Terminal rendering of notifications.

use showroom_core::notify::{Notification, NotificationKind, NotificationSink, TracingSink};

/// Prints notifications to stdout and mirrors them to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

/// One notification as the terminal shows it.
pub fn render(notification: &Notification) -> String {
    let marker = match notification.kind {
        NotificationKind::Success => "[ok]",
        NotificationKind::Failure => "[!!]",
    };
    format!("{marker} {}\n     {}", notification.title, notification.description)
}

impl NotificationSink for ConsoleSink {
    fn notify(
        &self,
        notification: &Notification,
    ) {
        println!("{}", render(notification));
        TracingSink.notify(notification);
    }
}
