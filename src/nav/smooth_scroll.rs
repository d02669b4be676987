//! In-page anchor scrolling.

use crate::dom::{Document, ElementId};
use crate::render::layout::Geometry;
use crate::render::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// A scroll the host should perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f32,
    pub behavior: ScrollBehavior,
}

/// Scrolls to `#fragment` targets, leaving room for the fixed header.
#[derive(Debug, Clone, Default)]
pub struct SmoothScroll {
    anchors: Vec<ElementId>,
    header_offset: f32,
}

impl SmoothScroll {
    pub fn attach(doc: &Document, header_offset: f32) -> Self {
        Self {
            anchors: doc.find_all(|el| {
                el.tag == "a" && el.attr("href").is_some_and(|h| h.starts_with('#'))
            }),
            header_offset,
        }
    }

    pub fn handles(&self, element: ElementId) -> bool {
        self.anchors.contains(&element)
    }

    /// Resolve a click on `anchor`. `None` means the default action proceeds.
    pub fn on_click(
        &self,
        doc: &Document,
        geometry: &Geometry,
        viewport: &Viewport,
        anchor: ElementId,
    ) -> Option<ScrollRequest> {
        if !self.handles(anchor) {
            return None;
        }
        let href = doc.element(anchor).attr("href")?;
        let fragment = href.strip_prefix('#')?;
        if fragment.is_empty() {
            return None;
        }
        let target = doc.get_element_by_id(fragment)?;
        let rect = geometry.rect(target)?;

        // Position relative to the viewport, then back to document space
        let element_position = rect.top() - viewport.scroll_y;
        let top = element_position + viewport.scroll_y - self.header_offset;
        Some(ScrollRequest {
            top: top.clamp(0.0, viewport.max_scroll(geometry.content_height)),
            behavior: ScrollBehavior::Smooth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parser::parse_html;
    use crate::render::layout::compute_layout;

    const PAGE: &str = r##"<body>
        <a id="top-link" href="#">top</a>
        <a id="about-link" href="#about">about</a>
        <a id="missing-link" href="#nowhere">missing</a>
        <a id="external" href="https://example.com">out</a>
        <section id="home" data-height="900"></section>
        <section id="about" data-height="900"></section>
        <section id="tail" data-height="900"></section>
    </body>"##;

    fn setup() -> (Document, Geometry, Viewport, SmoothScroll) {
        let doc = parse_html(PAGE);
        let geo = compute_layout(&doc, 1280.0, 800.0);
        let scroll = SmoothScroll::attach(&doc, 80.0);
        (doc, geo, Viewport::new(1280.0, 800.0), scroll)
    }

    #[test]
    fn scrolls_below_header() {
        let (doc, geo, mut vp, scroll) = setup();
        let link = doc.get_element_by_id("about-link").unwrap();
        let about = geo.rect(doc.get_element_by_id("about").unwrap()).unwrap();

        let req = scroll.on_click(&doc, &geo, &vp, link).unwrap();
        assert_eq!(req.behavior, ScrollBehavior::Smooth);
        assert!((req.top - (about.top() - 80.0)).abs() < 1e-3);

        // Independent of the current scroll position
        vp.scroll_y = 1500.0;
        let again = scroll.on_click(&doc, &geo, &vp, link).unwrap();
        assert!((again.top - req.top).abs() < 1e-3);
    }

    #[test]
    fn bare_hash_unknown_target_and_external_links_fall_through() {
        let (doc, geo, vp, scroll) = setup();
        for id in ["top-link", "missing-link", "external"] {
            let link = doc.get_element_by_id(id).unwrap();
            assert!(scroll.on_click(&doc, &geo, &vp, link).is_none(), "{}", id);
        }
    }
}
