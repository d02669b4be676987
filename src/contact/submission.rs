//! Contact form submission lifecycle.
//!
//! Submit → disable the button and show a sending label → stamp the form with
//! the local time → hand the form to the delivery collaborator on a worker
//! thread → notify success or failure → restore the button. The restore step
//! runs on every path, including a worker that dies without answering.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ContactConfig;
use crate::dom::{Document, ElementId};
use crate::engine::scheduler::Scheduler;

use super::delivery::{DeliveryError, DeliveryReceipt, EmailDelivery, FormData};
use super::notification::{NotificationCenter, NotificationKind, NotificationTask};

pub const CONTACT_FORM_ID: &str = "contact-form";
pub const TIMESTAMP_FIELD: &str = "time";

const SUCCESS_MESSAGE: &str = "Message sent! I will get back to you soon.";
const FAILURE_PREFIX: &str = "Failed to send message. ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Sending,
    Succeeded,
    Failed,
}

/// How a delivery attempt ended.
#[derive(Debug)]
enum Outcome {
    Delivered(DeliveryReceipt),
    Rejected(DeliveryError),
    /// The worker went away without a result
    Faulted(String),
}

type DeliveryResult = Result<DeliveryReceipt, DeliveryError>;

/// User-facing failure text: collaborator detail plus the direct address.
pub fn failure_message(detail: Option<&str>, fallback_email: &str) -> String {
    let mut message = String::from(FAILURE_PREFIX);
    if let Some(detail) = detail.filter(|d| !d.is_empty()) {
        message.push_str(detail);
    }
    message.push_str("\nWrite to me directly: ");
    message.push_str(fallback_email);
    message
}

/// Local time in the page's display format.
pub fn local_timestamp() -> String {
    chrono::Local::now().format("%d.%m.%Y, %H:%M:%S").to_string()
}

pub struct SubmissionFlow {
    form: ElementId,
    submit_button: Option<ElementId>,
    original_label: Option<String>,
    state: SubmissionState,
    pending: Option<Receiver<DeliveryResult>>,
    config: ContactConfig,
}

impl SubmissionFlow {
    /// Bind to `#contact-form`. Logs and returns `None` when it is missing.
    pub fn attach(doc: &Document, config: &ContactConfig) -> Option<Self> {
        let Some(form) = doc.get_element_by_id(CONTACT_FORM_ID) else {
            log::warn!("Contact form not found");
            return None;
        };
        log::info!("Contact form found");
        let submit_button = doc.find_in(form, |el| {
            matches!(el.tag.as_str(), "button" | "input") && el.attr("type") == Some("submit")
        });
        if submit_button.is_none() {
            log::warn!("Contact form has no submit button");
        }
        Some(Self {
            form,
            submit_button,
            original_label: None,
            state: SubmissionState::Idle,
            pending: None,
            config: config.clone(),
        })
    }

    pub fn form(&self) -> ElementId {
        self.form
    }

    pub fn submit_button(&self) -> Option<ElementId> {
        self.submit_button
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        self.state == SubmissionState::Sending
    }

    /// Start a submission. Returns `false` if one is already in flight.
    pub fn begin<T: From<NotificationTask>>(
        &mut self,
        doc: &mut Document,
        scheduler: &mut Scheduler<T>,
        notifications: &NotificationCenter,
        delivery: Arc<dyn EmailDelivery>,
    ) -> bool {
        if self.is_sending() {
            log::debug!("Submission already in flight");
            return false;
        }
        log::info!("Submitting contact form");
        self.enter_sending(doc);
        self.stamp_time(doc);

        let data = FormData::from_form(doc, self.form);
        log::debug!(
            "Sending message from {} <{}>",
            data.get("user_name").unwrap_or_default(),
            data.get("user_email").unwrap_or_default()
        );

        let (tx, rx) = mpsc::channel();
        let service_id = self.config.service_id.clone();
        let template_id = self.config.template_id.clone();
        let spawned = std::thread::Builder::new()
            .name("contact-delivery".into())
            .spawn(move || {
                let result = delivery.send(&service_id, &template_id, &data);
                let _ = tx.send(result);
            });

        match spawned {
            Ok(_) => self.pending = Some(rx),
            Err(e) => {
                self.complete(doc, scheduler, notifications, Outcome::Faulted(e.to_string()));
            }
        }
        true
    }

    /// Check for a delivery result without blocking.
    pub fn poll<T: From<NotificationTask>>(
        &mut self,
        doc: &mut Document,
        scheduler: &mut Scheduler<T>,
        notifications: &NotificationCenter,
    ) -> Option<SubmissionState> {
        let outcome = match self.pending.as_ref()?.try_recv() {
            Ok(result) => Self::outcome(result),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Outcome::Faulted("delivery worker stopped".into()),
        };
        Some(self.complete(doc, scheduler, notifications, outcome))
    }

    /// Block up to `timeout` for the delivery result.
    pub fn wait<T: From<NotificationTask>>(
        &mut self,
        doc: &mut Document,
        scheduler: &mut Scheduler<T>,
        notifications: &NotificationCenter,
        timeout: Duration,
    ) -> Option<SubmissionState> {
        let outcome = match self.pending.as_ref()?.recv_timeout(timeout) {
            Ok(result) => Self::outcome(result),
            Err(RecvTimeoutError::Timeout) => return None,
            Err(RecvTimeoutError::Disconnected) => {
                Outcome::Faulted("delivery worker stopped".into())
            }
        };
        Some(self.complete(doc, scheduler, notifications, outcome))
    }

    fn outcome(result: DeliveryResult) -> Outcome {
        match result {
            Ok(receipt) => Outcome::Delivered(receipt),
            Err(e) => Outcome::Rejected(e),
        }
    }

    fn enter_sending(&mut self, doc: &mut Document) {
        self.state = SubmissionState::Sending;
        let Some(button) = self.submit_button else {
            return;
        };
        let el = doc.element_mut(button);
        self.original_label = Some(std::mem::replace(
            &mut el.text,
            self.config.sending_label.clone(),
        ));
        el.set_attr("disabled", "");
    }

    fn stamp_time(&self, doc: &mut Document) {
        let stamp = local_timestamp();
        if let Some(existing) = doc.form_field(self.form, TIMESTAMP_FIELD) {
            doc.element_mut(existing).set_field_value(stamp);
            return;
        }
        let field = doc.create_element("input");
        let el = doc.element_mut(field);
        el.set_attr("type", "hidden");
        el.set_attr("name", TIMESTAMP_FIELD);
        el.set_attr("value", stamp);
        doc.append_child(self.form, field);
    }

    fn complete<T: From<NotificationTask>>(
        &mut self,
        doc: &mut Document,
        scheduler: &mut Scheduler<T>,
        notifications: &NotificationCenter,
        outcome: Outcome,
    ) -> SubmissionState {
        self.pending = None;
        let state = match outcome {
            Outcome::Delivered(receipt) => {
                log::info!("Delivery succeeded: {} {}", receipt.status, receipt.text);
                notifications.show(doc, scheduler, NotificationKind::Success, SUCCESS_MESSAGE);
                self.reset_fields(doc);
                SubmissionState::Succeeded
            }
            Outcome::Rejected(err) => {
                log::error!("Delivery failed: {}", err);
                let message = failure_message(err.text.as_deref(), &self.config.fallback_email);
                notifications.show(doc, scheduler, NotificationKind::Error, &message);
                SubmissionState::Failed
            }
            Outcome::Faulted(reason) => {
                log::error!("Delivery fault: {}", reason);
                let message = failure_message(None, &self.config.fallback_email);
                notifications.show(doc, scheduler, NotificationKind::Error, &message);
                SubmissionState::Failed
            }
        };
        self.restore(doc);
        self.state = state;
        state
    }

    fn restore(&mut self, doc: &mut Document) {
        let Some(button) = self.submit_button else {
            return;
        };
        let el = doc.element_mut(button);
        if let Some(label) = self.original_label.take() {
            el.text = label;
        }
        el.remove_attr("disabled");
    }

    /// Clear user-editable fields; hidden fields keep their values.
    fn reset_fields(&self, doc: &mut Document) {
        for id in doc.form_fields(self.form) {
            let el = doc.element_mut(id);
            if el.attr("type") != Some("hidden") {
                el.set_field_value("");
            }
        }
    }
}
