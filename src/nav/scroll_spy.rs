//! Scroll-spy navigation highlighting.
//!
//! Every `section` is observed; whenever one reports intersecting, all nav
//! links lose `active` and the link addressing that section gains it. When
//! several sections qualify in one batch the last one processed wins.

use crate::config::NavConfig;
use crate::dom::{Document, ElementId};
use crate::engine::observer::{
    IntersectionEntry, IntersectionHandler, IntersectionObserver, ObserverOptions,
};

use super::{ACTIVE_CLASS, NAV_LINK_CLASS};

#[derive(Debug, Clone)]
pub struct ScrollSpyNav {
    observer: IntersectionObserver,
    links: Vec<ElementId>,
}

impl ScrollSpyNav {
    /// Observe all sections. Returns `None` for a page without sections.
    pub fn attach(doc: &Document, config: &NavConfig) -> Option<Self> {
        let sections = doc.elements_by_tag("section");
        if sections.is_empty() {
            return None;
        }
        let mut observer = IntersectionObserver::new(ObserverOptions::from_config(&config.scroll_spy));
        for s in sections {
            observer.observe(s);
        }
        Some(Self {
            observer,
            links: doc.elements_by_class(NAV_LINK_CLASS),
        })
    }

    pub fn sections(&self) -> &[ElementId] {
        self.observer.targets()
    }

    /// The nav link currently marked active, if any.
    pub fn active_link(&self, doc: &Document) -> Option<ElementId> {
        self.links
            .iter()
            .copied()
            .find(|l| doc.element(*l).has_class(ACTIVE_CLASS))
    }

    fn activate(&self, doc: &mut Document, section: ElementId) {
        for &link in &self.links {
            doc.element_mut(link).remove_class(ACTIVE_CLASS);
        }
        let Some(id) = doc.element(section).id().map(str::to_owned) else {
            return;
        };
        let href = format!("#{}", id);
        if let Some(link) = doc.find_first(|el| el.tag == "a" && el.attr("href") == Some(href.as_str())) {
            doc.element_mut(link).add_class(ACTIVE_CLASS);
            log::trace!("Active section: {}", id);
        }
    }
}

impl IntersectionHandler for ScrollSpyNav {
    fn observer_mut(&mut self) -> &mut IntersectionObserver {
        &mut self.observer
    }

    fn handle_intersections(&mut self, doc: &mut Document, entries: &[IntersectionEntry]) {
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            self.activate(doc, entry.target);
        }
    }
}
