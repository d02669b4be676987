//! Navigation behavior
//!
//! - Mobile menu: hamburger toggle with page scroll lock
//! - Responsive reset on resize / orientation change
//! - `scroll_spy` — highlights the link of the dominant section
//! - `smooth_scroll` — in-page anchor scrolling below the fixed header

pub mod scroll_spy;
pub mod smooth_scroll;

use crate::dom::{Document, ElementId};

pub const HAMBURGER_ID: &str = "hamburger";
pub const NAV_MENU_ID: &str = "nav-menu";
pub const NAV_LINK_CLASS: &str = "nav-link";
pub const ACTIVE_CLASS: &str = "active";

/// Lock or unlock page scrolling through `body { overflow }`.
pub fn set_scroll_lock(doc: &mut Document, locked: bool) {
    let Some(body) = doc.body() else {
        return;
    };
    let value = if locked { "hidden" } else { "" };
    doc.element_mut(body).style.set("overflow", value);
}

pub fn is_scroll_locked(doc: &Document) -> bool {
    doc.body()
        .map(|b| doc.element(b).style.get("overflow") == Some("hidden"))
        .unwrap_or(false)
}

/// Hamburger menu for narrow viewports.
#[derive(Debug, Clone, Default)]
pub struct NavMenu {
    hamburger: Option<ElementId>,
    menu: Option<ElementId>,
    links: Vec<ElementId>,
    breakpoint_px: f32,
}

impl NavMenu {
    pub fn attach(doc: &Document, breakpoint_px: f32) -> Self {
        Self {
            hamburger: doc.get_element_by_id(HAMBURGER_ID),
            menu: doc.get_element_by_id(NAV_MENU_ID),
            links: doc.elements_by_class(NAV_LINK_CLASS),
            breakpoint_px,
        }
    }

    pub fn links(&self) -> &[ElementId] {
        &self.links
    }

    /// Whether a click on `element` lands on the hamburger or inside it.
    pub fn is_hamburger(&self, doc: &Document, element: ElementId) -> bool {
        let Some(hamburger) = self.hamburger else {
            return false;
        };
        std::iter::successors(Some(element), |&id| doc.element(id).parent())
            .any(|id| id == hamburger)
    }

    pub fn is_link(&self, element: ElementId) -> bool {
        self.links.contains(&element)
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        self.menu
            .map(|m| doc.element(m).has_class(ACTIVE_CLASS))
            .unwrap_or(false)
    }

    /// Hamburger click. Returns whether the menu is open afterwards.
    pub fn toggle(&self, doc: &mut Document) -> bool {
        let (Some(hamburger), Some(menu)) = (self.hamburger, self.menu) else {
            return false;
        };
        doc.element_mut(hamburger).toggle_class(ACTIVE_CLASS);
        let open = doc.element_mut(menu).toggle_class(ACTIVE_CLASS);
        set_scroll_lock(doc, open);
        log::debug!("Mobile menu {}", if open { "opened" } else { "closed" });
        open
    }

    /// Close the menu and restore scrolling (any nav link click).
    pub fn close(&self, doc: &mut Document) {
        for el in [self.hamburger, self.menu].into_iter().flatten() {
            doc.element_mut(el).remove_class(ACTIVE_CLASS);
        }
        set_scroll_lock(doc, false);
    }

    pub fn is_mobile(&self, viewport_width: f32) -> bool {
        viewport_width <= self.breakpoint_px
    }

    /// Re-evaluate the layout after load, resize or orientation change.
    pub fn handle_resize(&self, doc: &mut Document, viewport_width: f32) {
        if self.is_mobile(viewport_width) && self.hamburger.is_some() && self.menu.is_some() {
            if self.is_open(doc) {
                set_scroll_lock(doc, true);
            }
        } else {
            self.close(doc);
        }
    }
}
