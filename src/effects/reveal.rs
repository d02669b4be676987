//! One-shot entrance transitions.
//!
//! Elements tagged `slide-in-left`, `slide-in-right` or `slide-in-up` start
//! offset and transparent (stylesheet concern). The first time enough of one
//! enters the viewport it is moved to its resting state and never reset.

use std::collections::HashSet;

use crate::config::RevealConfig;
use crate::dom::{Document, ElementId};
use crate::engine::observer::{
    IntersectionEntry, IntersectionHandler, IntersectionObserver, ObserverOptions,
};

pub const REVEAL_CLASSES: [&str; 3] = ["slide-in-left", "slide-in-right", "slide-in-up"];

#[derive(Debug, Clone)]
pub struct RevealOnScroll {
    observer: IntersectionObserver,
    revealed: HashSet<ElementId>,
}

impl RevealOnScroll {
    /// Observe every tagged element. Returns `None` when there are none.
    pub fn attach(doc: &Document, config: &RevealConfig) -> Option<Self> {
        let targets = doc.find_all(|el| REVEAL_CLASSES.iter().any(|c| el.has_class(c)));
        if targets.is_empty() {
            return None;
        }
        let mut observer = IntersectionObserver::new(ObserverOptions::from_config(&config.observer));
        for t in targets {
            observer.observe(t);
        }
        Some(Self {
            observer,
            revealed: HashSet::new(),
        })
    }

    pub fn is_revealed(&self, element: ElementId) -> bool {
        self.revealed.contains(&element)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Elements still waiting for their first reveal.
    pub fn pending(&self) -> &[ElementId] {
        self.observer.targets()
    }
}

impl IntersectionHandler for RevealOnScroll {
    fn observer_mut(&mut self) -> &mut IntersectionObserver {
        &mut self.observer
    }

    fn handle_intersections(&mut self, doc: &mut Document, entries: &[IntersectionEntry]) {
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            if !self.revealed.insert(entry.target) {
                continue;
            }
            let style = &mut doc.element_mut(entry.target).style;
            style.set("opacity", "1");
            style.set("transform", "translate(0, 0)");
            self.observer.unobserve(entry.target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parser::parse_html;

    fn setup() -> (Document, RevealOnScroll, ElementId) {
        let doc = parse_html(
            r#"<body>
                <div id="card" class="card slide-in-left" style="opacity: 0; transform: translateX(-50px)"></div>
                <p>plain</p>
            </body>"#,
        );
        let reveal = RevealOnScroll::attach(&doc, &RevealConfig::default()).unwrap();
        let card = doc.get_element_by_id("card").unwrap();
        (doc, reveal, card)
    }

    fn entry(target: ElementId, is_intersecting: bool) -> IntersectionEntry {
        IntersectionEntry {
            target,
            is_intersecting,
            intersection_ratio: if is_intersecting { 0.5 } else { 0.0 },
        }
    }

    #[test]
    fn observes_only_tagged_elements() {
        let (_, reveal, card) = setup();
        assert_eq!(reveal.pending(), &[card]);
    }

    #[test]
    fn first_intersection_reveals() {
        let (mut doc, mut reveal, card) = setup();
        reveal.handle_intersections(&mut doc, &[entry(card, false)]);
        assert!(!reveal.is_revealed(card));
        assert_eq!(doc.element(card).style.get("opacity"), Some("0"));

        reveal.handle_intersections(&mut doc, &[entry(card, true)]);
        assert!(reveal.is_revealed(card));
        let style = &doc.element(card).style;
        assert_eq!(style.get("opacity"), Some("1"));
        assert_eq!(style.get("transform"), Some("translate(0, 0)"));
    }

    #[test]
    fn leaving_the_viewport_does_not_reset() {
        let (mut doc, mut reveal, card) = setup();
        reveal.handle_intersections(&mut doc, &[entry(card, true)]);
        reveal.handle_intersections(&mut doc, &[entry(card, false)]);
        reveal.handle_intersections(&mut doc, &[entry(card, false)]);
        assert!(reveal.is_revealed(card));
        assert_eq!(doc.element(card).style.get("opacity"), Some("1"));
        assert!(reveal.pending().is_empty());
    }

    #[test]
    fn untagged_page_has_nothing_to_reveal() {
        let doc = parse_html("<body><p>hi</p></body>");
        assert!(RevealOnScroll::attach(&doc, &RevealConfig::default()).is_none());
    }
}
