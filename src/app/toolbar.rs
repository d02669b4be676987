//! Fixed site header for `PreviewApp`.
//!
//! Nav links render as selectable labels driven by the scroll-spy's
//! `active` class. Below the mobile breakpoint the links collapse behind the
//! hamburger button.

use eframe::egui;

use portfolio_runtime::dom::ElementId;
use portfolio_runtime::nav::{ACTIVE_CLASS, HAMBURGER_ID};

use super::PreviewApp;

impl PreviewApp {
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        let width = self.page.viewport().width;
        let mobile = self.page.nav().is_mobile(width);
        let hamburger = self.page.document().get_element_by_id(HAMBURGER_ID);

        let mut clicked: Option<ElementId> = None;
        ui.horizontal(|ui| {
            ui.add_space(4.0);
            ui.heading(self.page.document().title.as_str());
            ui.add_space(16.0);

            if mobile {
                if let Some(hamburger) = hamburger {
                    let open = self.page.nav().is_open(self.page.document());
                    if ui.selectable_label(open, "\u{2630}").clicked() {
                        clicked = Some(hamburger);
                    }
                }
            } else {
                clicked = clicked.or(self.draw_links(ui));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let dark_label = if self.dark_mode { "\u{263E}" } else { "\u{2600}" };
                if ui.button(dark_label).clicked() {
                    self.dark_mode = !self.dark_mode;
                }
                ui.toggle_value(&mut self.show_contact, "Contact");
            });
        });

        // Open mobile menu drops the links below the header row
        if mobile && self.page.nav().is_open(self.page.document()) {
            ui.vertical(|ui| {
                clicked = clicked.or(self.draw_links(ui));
            });
        }

        if let Some(target) = clicked {
            self.click(target);
        }
    }

    fn draw_links(&self, ui: &mut egui::Ui) -> Option<ElementId> {
        let doc = self.page.document();
        let mut clicked = None;
        for &link in self.page.nav().links() {
            let el = doc.element(link);
            let label = doc.text_content(link);
            if ui.selectable_label(el.has_class(ACTIVE_CLASS), label).clicked() {
                clicked = Some(link);
            }
        }
        clicked
    }
}
