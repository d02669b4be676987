//! Toast notifications.
//!
//! At most one `.custom-notification` lives in the body. Showing a new one
//! removes the old one first. A toast fades in shortly after insertion,
//! closes itself after a while or on its close button, and is removed once
//! its exit transition has had time to run.

use crate::config::NotificationConfig;
use crate::dom::{Document, ElementId};
use crate::engine::scheduler::Scheduler;

pub const NOTIFICATION_CLASS: &str = "custom-notification";
pub const CLOSE_CLASS: &str = "notification-close";
pub const SHOW_CLASS: &str = "show";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_class(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

/// Deferred notification work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTask {
    /// Add the `show` class (enter transition)
    Enter(ElementId),
    /// Auto-close if still attached
    Expire(ElementId),
    /// Remove after the exit transition
    Remove(ElementId),
}

#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    config: NotificationConfig,
}

impl NotificationCenter {
    pub fn new(config: NotificationConfig) -> Self {
        Self { config }
    }

    /// The notification currently in the document, if any.
    pub fn current(doc: &Document) -> Option<ElementId> {
        doc.find_first(|el| el.has_class(NOTIFICATION_CLASS))
    }

    /// Insert a new notification, replacing any displayed one.
    pub fn show<T: From<NotificationTask>>(
        &self,
        doc: &mut Document,
        scheduler: &mut Scheduler<T>,
        kind: NotificationKind,
        message: &str,
    ) -> Option<ElementId> {
        log::info!("Notification ({}): {}", kind.as_class(), message);

        if let Some(old) = Self::current(doc) {
            doc.remove(old);
        }
        let body = doc.body()?;

        let toast = doc.create_element("div");
        doc.element_mut(toast)
            .set_attr("class", format!("{} {}", NOTIFICATION_CLASS, kind.as_class()));
        let content = doc.create_element("div");
        doc.element_mut(content).set_attr("class", "notification-content");
        let text = doc.create_element("div");
        doc.element_mut(text).set_attr("class", "notification-text");
        doc.element_mut(text).text = message.to_string();
        let close = doc.create_element("button");
        doc.element_mut(close).set_attr("class", CLOSE_CLASS);
        doc.element_mut(close).text = "\u{00d7}".to_string();

        doc.append_child(content, text);
        doc.append_child(content, close);
        doc.append_child(toast, content);
        doc.append_child(body, toast);

        scheduler.schedule(self.config.enter_delay_ms, NotificationTask::Enter(toast));
        scheduler.schedule(self.config.auto_dismiss_ms, NotificationTask::Expire(toast));
        Some(toast)
    }

    /// Start the exit transition and schedule removal.
    pub fn close<T: From<NotificationTask>>(
        &self,
        doc: &mut Document,
        scheduler: &mut Scheduler<T>,
        toast: ElementId,
    ) {
        doc.element_mut(toast).remove_class(SHOW_CLASS);
        scheduler.schedule(self.config.exit_delay_ms, NotificationTask::Remove(toast));
    }

    /// The notification a click on `element` should close, if it hit a close button.
    pub fn close_target(doc: &Document, element: ElementId) -> Option<ElementId> {
        let button = doc.closest(element, |el| el.has_class(CLOSE_CLASS))?;
        doc.closest(button, |el| el.has_class(NOTIFICATION_CLASS))
    }

    pub fn run<T: From<NotificationTask>>(
        &self,
        doc: &mut Document,
        scheduler: &mut Scheduler<T>,
        task: NotificationTask,
    ) {
        match task {
            NotificationTask::Enter(toast) => {
                doc.element_mut(toast).add_class(SHOW_CLASS);
            }
            NotificationTask::Expire(toast) => {
                if doc.is_connected(toast) {
                    self.close(doc, scheduler, toast);
                }
            }
            NotificationTask::Remove(toast) => {
                if doc.is_connected(toast) {
                    doc.remove(toast);
                }
            }
        }
    }
}
