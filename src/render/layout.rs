//! Block layout for intersection geometry.
//!
//! A simple top-to-bottom model: every rendered element stacks below the
//! previous one, text wraps by an average glyph width, and explicit
//! `height` / `min-height` / `data-height` hints stretch a box. This is
//! enough to decide which sections and reveal targets the viewport covers.

use std::collections::HashMap;

use crate::dom::css::parse_css_length;
use crate::dom::{Document, Element, ElementId};

use super::Rect;

/// Document-space rectangles for every laid-out element.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    rects: HashMap<ElementId, Rect>,
    pub content_height: f32,
}

impl Geometry {
    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

const BLOCK_TAGS: &[&str] = &[
    "html", "body", "div", "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "form",
    "section", "article", "aside", "main", "header", "footer", "nav", "blockquote", "pre",
    "figure", "figcaption", "textarea",
];

/// Elements that never produce a box.
const HIDDEN_TAGS: &[&str] = &["head", "script", "style", "title", "meta", "link", "noscript"];

/// Per-tag vertical margins (top, bottom) in pixels.
fn tag_margins(tag: &str) -> (f32, f32) {
    match tag {
        "h1" => (24.0, 16.0),
        "h2" => (20.0, 12.0),
        "h3" | "h4" => (16.0, 10.0),
        "h5" | "h6" => (12.0, 8.0),
        "p" => (4.0, 10.0),
        "ul" | "ol" => (8.0, 8.0),
        "li" => (2.0, 2.0),
        "nav" | "header" | "footer" => (0.0, 0.0),
        "blockquote" => (12.0, 12.0),
        "pre" => (8.0, 8.0),
        _ => (0.0, 0.0),
    }
}

/// Per-tag padding in pixels.
fn tag_padding(tag: &str, is_block: bool) -> f32 {
    match tag {
        "section" | "article" | "main" | "aside" => 16.0,
        "nav" | "header" | "footer" => 12.0,
        "button" | "input" | "textarea" | "select" => 10.0,
        _ if is_block => 4.0,
        _ => 0.0,
    }
}

/// Font size an element's text is laid out with.
pub fn font_size_for(tag: &str, parent_font_size: f32) -> f32 {
    match tag {
        "h1" => 32.0,
        "h2" => 24.0,
        "h3" => 20.0,
        "h4" => 18.0,
        "h5" | "h6" => 16.0,
        "small" => 12.0,
        _ => parent_font_size,
    }
}

pub fn is_hidden(el: &Element) -> bool {
    HIDDEN_TAGS.contains(&el.tag.as_str())
        || (el.tag == "input" && el.attr("type") == Some("hidden"))
        || el.style.get("display") == Some("none")
}

/// Explicit minimum height from inline style or a `data-height` hint.
fn explicit_height(el: &Element, viewport_height: f32) -> Option<f32> {
    ["height", "min-height"]
        .iter()
        .filter_map(|p| el.style.get(p))
        .chain(el.attr("data-height"))
        .filter_map(|v| parse_css_length(v, viewport_height))
        .reduce(f32::max)
}

/// Lay out the connected document for a viewport of the given size.
pub fn compute_layout(doc: &Document, viewport_width: f32, viewport_height: f32) -> Geometry {
    let mut geometry = Geometry::default();
    let mut cursor_y = 0.0;
    let ctx = LayoutCtx {
        doc,
        viewport_height,
    };
    ctx.layout_element(doc.root(), 0.0, &mut cursor_y, viewport_width, 16.0, &mut geometry);
    geometry.content_height = cursor_y;
    geometry
}

struct LayoutCtx<'a> {
    doc: &'a Document,
    viewport_height: f32,
}

impl LayoutCtx<'_> {
    fn layout_element(
        &self,
        id: ElementId,
        x: f32,
        cursor_y: &mut f32,
        available_width: f32,
        parent_font_size: f32,
        out: &mut Geometry,
    ) {
        let el = self.doc.element(id);
        if is_hidden(el) {
            return;
        }

        let is_block = BLOCK_TAGS.contains(&el.tag.as_str());
        let font_size = font_size_for(&el.tag, parent_font_size);

        let (margin_top, margin_bottom) = tag_margins(&el.tag);
        let padding = tag_padding(&el.tag, is_block);

        *cursor_y += margin_top;
        let start_y = *cursor_y;
        *cursor_y += padding;

        let child_x = x + padding;
        let child_width = (available_width - padding * 2.0).max(0.0);
        for &child in el.children() {
            self.layout_element(child, child_x, cursor_y, child_width, font_size, out);
        }

        // Text (or an empty control) takes at least one line
        let chars = el.text.chars().count();
        if chars > 0 || matches!(el.tag.as_str(), "input" | "button" | "select") {
            let line_height = font_size * 1.4;
            let chars_per_line = (available_width / (font_size * 0.6)).max(1.0);
            let lines = (chars as f32 / chars_per_line).ceil().max(1.0);
            *cursor_y += lines * line_height;
        }

        *cursor_y += padding;

        if let Some(min) = explicit_height(el, self.viewport_height) {
            *cursor_y = cursor_y.max(start_y + min);
        }

        let height = *cursor_y - start_y;
        *cursor_y += margin_bottom;

        out.rects
            .insert(id, Rect::new(x, start_y, available_width, height));
    }
}
