use crate::dom::css::InlineStyle;
use crate::dom::{Document, ElementId};
use scraper::{ElementRef, Html, Node};

/// Tags whose text content is not page text
const RAW_TEXT: &[&str] = &["script", "noscript", "svg"];

/// Parse raw HTML into a mutable [`Document`].
pub fn parse_html(html: &str) -> Document {
    let parsed = Html::parse_document(html);

    let title = scraper::Selector::parse("title")
        .ok()
        .and_then(|sel| parsed.select(&sel).next())
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();

    let root_el = parsed.root_element();
    let mut doc = Document::with_root(root_el.value().name.local.as_ref());
    let root = doc.root();
    fill_element(&mut doc, root, root_el);
    convert_children(&mut doc, root, root_el);
    doc.title = title.trim().to_string();
    doc
}

fn convert_children(doc: &mut Document, parent: ElementId, el: ElementRef<'_>) {
    for child_ref in el.children() {
        match child_ref.value() {
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child_ref) {
                    let tag = child_el.value().name.local.as_ref().to_string();
                    let id = doc.create_element(tag.as_str());
                    fill_element(doc, id, child_el);
                    doc.append_child(parent, id);
                    // Skip text of non-content elements
                    if !RAW_TEXT.contains(&tag.as_str()) {
                        convert_children(doc, id, child_el);
                    }
                }
            }
            Node::Text(t) => {
                let s = t.text.trim();
                if s.is_empty() {
                    continue;
                }
                let target = doc.element_mut(parent);
                if !target.text.is_empty() {
                    target.text.push(' ');
                }
                target.text.push_str(s);
            }
            _ => {}
        }
    }
}

fn fill_element(doc: &mut Document, id: ElementId, src: ElementRef<'_>) {
    let el = doc.element_mut(id);
    for (k, v) in src.value().attrs() {
        if k == "style" {
            el.style = InlineStyle::parse(v);
        } else {
            el.set_attr(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_html() {
        let html = r#"
        <html>
            <head><title>Portfolio</title></head>
            <body>
                <h1>Hello</h1>
                <span id="typing-text"></span>
                <div class="random-orbit planet" style="opacity: 0.5"></div>
            </body>
        </html>
        "#;

        let doc = parse_html(html);
        assert_eq!(doc.title, "Portfolio");
        assert!(doc.node_count() > 4);
        assert!(doc.get_element_by_id("typing-text").is_some());

        let orbit = doc.elements_by_class("random-orbit");
        assert_eq!(orbit.len(), 1);
        let el = doc.element(orbit[0]);
        assert!(el.has_class("planet"));
        assert_eq!(el.style.opacity(), Some(0.5));
        assert!(el.attr("style").is_none());
    }

    #[test]
    fn keeps_form_structure() {
        let html = r#"
        <form id="contact-form">
            <input type="text" name="user_name">
            <textarea name="message">draft</textarea>
            <button type="submit">Send Message</button>
        </form>
        "#;
        let doc = parse_html(html);
        let form = doc.get_element_by_id("contact-form").unwrap();
        let fields = doc.form_fields(form);
        assert_eq!(fields.len(), 2);
        let area = doc.form_field(form, "message").unwrap();
        assert_eq!(doc.element(area).field_value(), "draft");
        let button = doc.find_in(form, |e| e.tag == "button").unwrap();
        assert_eq!(doc.element(button).text, "Send Message");
    }

    #[test]
    fn strips_script_text() {
        let html = r#"<html><body><p>Visible</p><script>alert("hidden");</script></body></html>"#;
        let doc = parse_html(html);
        let text = doc.text_content(doc.root());
        assert!(text.contains("Visible"));
        assert!(!text.contains("alert"));
    }
}
