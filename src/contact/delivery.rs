//! Email-delivery collaborator interface.

use crate::dom::{Document, ElementId};

/// Field values of a form at submission time, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    /// Snapshot every named field of `form`.
    pub fn from_form(doc: &Document, form: ElementId) -> Self {
        let fields = doc
            .form_fields(form)
            .into_iter()
            .filter_map(|id| {
                let el = doc.element(id);
                let name = el.attr("name")?;
                Some((name.to_string(), el.field_value().to_string()))
            })
            .collect();
        Self { fields }
    }

    /// Value of `name` (last one wins for duplicate names).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Successful delivery response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub status: u16,
    pub text: String,
}

/// Rejected delivery, optionally carrying detail text for the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("delivery rejected: {}", .text.as_deref().unwrap_or("no details"))]
pub struct DeliveryError {
    pub text: Option<String>,
}

impl DeliveryError {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Opaque service that sends the contact form somewhere.
///
/// Called from a worker thread; implementations may block.
pub trait EmailDelivery: Send + Sync {
    fn send(
        &self,
        service_id: &str,
        template_id: &str,
        form: &FormData,
    ) -> Result<DeliveryReceipt, DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parser::parse_html;

    #[test]
    fn snapshot_reads_inputs_and_textareas() {
        let doc = parse_html(
            r#"<form id="f">
                <input name="user_name" value="Ann">
                <input name="user_email" type="email" value="ann@example.com">
                <textarea name="message">Hello there</textarea>
                <input type="hidden" name="time" value="01.01.2026, 10:00:00">
                <button type="submit">Send</button>
            </form>"#,
        );
        let form = doc.get_element_by_id("f").unwrap();
        let data = FormData::from_form(&doc, form);
        assert_eq!(data.len(), 4);
        assert_eq!(data.get("user_name"), Some("Ann"));
        assert_eq!(data.get("message"), Some("Hello there"));
        assert_eq!(data.get("time"), Some("01.01.2026, 10:00:00"));
    }

    #[test]
    fn error_display_includes_detail() {
        let e = DeliveryError::new("invalid template");
        assert_eq!(e.to_string(), "delivery rejected: invalid template");
        let bare = DeliveryError { text: None };
        assert_eq!(bare.to_string(), "delivery rejected: no details");
    }
}
