//! Event forwarding for `PreviewApp`.
//!
//! Maps wall-clock time onto the page's virtual clock and turns egui
//! geometry changes and clicks into page events.

use portfolio_runtime::dom::ElementId;

use super::PreviewApp;

impl PreviewApp {
    /// Run every page timer that is due by now, and poll the delivery.
    pub fn advance_clock(&mut self) {
        let elapsed = self.clock_start.elapsed().as_millis() as u64;
        let delta = elapsed.saturating_sub(self.page.now_ms());
        self.page.advance(delta);
    }

    /// Relayout when the content area changes size.
    pub fn sync_viewport(&mut self, width: f32, height: f32) {
        let vp = self.page.viewport();
        if (vp.width - width).abs() > 0.5 || (vp.height - height).abs() > 0.5 {
            log::debug!("Viewport resized to {:.0}x{:.0}", width, height);
            self.page.resize(width, height);
        }
    }

    /// Report the scroll area's offset as a user scroll. Returns the offset
    /// the page accepted, which differs while the menu locks scrolling.
    pub fn sync_scroll(&mut self, offset_y: f32) -> f32 {
        let current = self.page.viewport().scroll_y;
        if (current - offset_y).abs() > 0.5 && !self.page.user_scroll(offset_y) {
            self.pending_scroll = Some(current);
        }
        self.page.viewport().scroll_y
    }

    pub fn click(&mut self, target: ElementId) {
        let outcome = self.page.click(target);
        if let Some(request) = outcome.scroll {
            self.pending_scroll = Some(request.top);
        }
    }

    pub fn hover(&mut self, orbit: Option<ElementId>) {
        if orbit == self.hovered_orbit {
            return;
        }
        if let Some(prev) = self.hovered_orbit.take() {
            self.page.pointer_leave(prev);
        }
        if let Some(next) = orbit {
            self.page.pointer_enter(next);
        }
        self.hovered_orbit = orbit;
    }
}
