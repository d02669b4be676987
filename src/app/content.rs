//! Page painting for `PreviewApp`.
//!
//! - `draw_content`      — scrollable document body with orbits
//! - `draw_contact_form` — form fields bound to the contact form
//! - `draw_notification` — the single toast, anchored top-right

use eframe::egui;

use portfolio_runtime::contact::notification::{CLOSE_CLASS, SHOW_CLASS};
use portfolio_runtime::contact::NotificationKind;
use portfolio_runtime::dom::ElementId;
use portfolio_runtime::effects::reveal::REVEAL_CLASSES;
use portfolio_runtime::nav::is_scroll_locked;
use portfolio_runtime::render::layout::{font_size_for, is_hidden};

use super::PreviewApp;

/// Pointer distance within which an orbit counts as hovered.
const ORBIT_HIT_RADIUS: f32 = 14.0;
const ORBIT_DOT_RADIUS: f32 = 9.0;

const ORBIT_COLORS: [egui::Color32; 4] = [
    egui::Color32::from_rgb(99, 179, 237),
    egui::Color32::from_rgb(246, 173, 85),
    egui::Color32::from_rgb(154, 230, 180),
    egui::Color32::from_rgb(214, 158, 246),
];

impl PreviewApp {
    pub fn draw_content(&mut self, ui: &mut egui::Ui) {
        let avail = ui.available_size();
        self.sync_viewport(avail.x, avail.y);

        let mut area = egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .enable_scrolling(!is_scroll_locked(self.page.document()));
        if let Some(y) = self.pending_scroll.take() {
            area = area.vertical_scroll_offset(y);
        }

        let output = area.show(ui, |ui| {
            let height = self.page.geometry().content_height.max(avail.y);
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(avail.x, height), egui::Sense::click());
            let origin = rect.min;
            self.paint_document(ui, origin);
            let hovered = response
                .hover_pos()
                .and_then(|pos| self.orbit_at(pos, origin));
            (response, origin, hovered)
        });

        self.sync_scroll(output.state.offset.y);
        let (response, origin, hovered) = output.inner;
        self.hover(hovered);

        if response.clicked() {
            let target = response
                .interact_pointer_pos()
                .and_then(|pos| self.element_at(pos - origin.to_vec2()));
            if let Some(target) = target {
                self.click(target);
            }
        }
    }

    /// Deepest laid-out element under a document-space point.
    fn element_at(&self, pos: egui::Pos2) -> Option<ElementId> {
        let doc = self.page.document();
        let geometry = self.page.geometry();
        doc.descendants(doc.root())
            .into_iter()
            .filter(|&id| {
                geometry.rect(id).is_some_and(|r| {
                    pos.x >= r.x && pos.x <= r.right() && pos.y >= r.top() && pos.y <= r.bottom()
                })
            })
            .last()
    }

    /// Screen position of each orbit's dot at the current clock.
    fn orbit_positions(&self, origin: egui::Pos2) -> Vec<(ElementId, usize, egui::Pos2)> {
        let doc = self.page.document();
        let geometry = self.page.geometry();
        let now = self.page.now_ms();
        let Some(orbits) = self.page.orbits() else {
            return Vec::new();
        };
        orbits
            .orbits()
            .iter()
            .filter_map(|orbit| {
                // Orbits circle the center of their container
                let anchor = doc.element(orbit.element).parent().unwrap_or(orbit.element);
                let rect = geometry.rect(anchor)?;
                let [dx, dy] = orbit.offset_at(now);
                let center = origin + egui::vec2(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
                Some((orbit.element, orbit.index, center + egui::vec2(dx, dy)))
            })
            .collect()
    }

    fn orbit_at(&self, pointer: egui::Pos2, origin: egui::Pos2) -> Option<ElementId> {
        self.orbit_positions(origin)
            .into_iter()
            .find(|(_, _, pos)| pos.distance(pointer) <= ORBIT_HIT_RADIUS)
            .map(|(el, _, _)| el)
    }

    /// Opacity of an element: pending reveal targets (and their content)
    /// stay faint until revealed.
    fn element_alpha(&self, id: ElementId) -> f32 {
        let doc = self.page.document();
        let target = doc.closest(id, |el| REVEAL_CLASSES.iter().any(|c| el.has_class(c)));
        match (target, self.page.reveal()) {
            (Some(target), Some(reveal)) if !reveal.is_revealed(target) => 0.15,
            _ => doc.element(id).style.opacity().unwrap_or(1.0),
        }
    }

    fn paint_document(&self, ui: &egui::Ui, origin: egui::Pos2) {
        let painter = ui.painter();
        let doc = self.page.document();
        let geometry = self.page.geometry();
        let text_color = ui.visuals().text_color();
        let stroke_color = ui.visuals().widgets.noninteractive.bg_stroke.color;

        for id in doc.descendants(doc.root()) {
            let el = doc.element(id);
            if is_hidden(el) {
                continue;
            }
            let Some(rect) = geometry.rect(id) else {
                continue;
            };
            let alpha = self.element_alpha(id);
            let screen = egui::Rect::from_min_size(
                origin + egui::vec2(rect.x, rect.y),
                egui::vec2(rect.width, rect.height),
            );

            match el.tag.as_str() {
                "section" => {
                    painter.rect_stroke(screen, 6.0, egui::Stroke::new(1.0, stroke_color.gamma_multiply(alpha)));
                }
                "input" | "textarea" | "select" | "button" => {
                    let disabled = el.has_attr("disabled");
                    let fill = if disabled {
                        stroke_color.gamma_multiply(0.3)
                    } else {
                        stroke_color.gamma_multiply(0.15 * alpha)
                    };
                    painter.rect_filled(screen, 4.0, fill);
                }
                _ => {}
            }

            let text = if el.is_form_field() && el.tag != "button" {
                el.field_value()
            } else {
                el.text.as_str()
            };
            if text.is_empty() {
                continue;
            }
            let font = egui::FontId::proportional(font_size_for(&el.tag, 16.0));
            let galley = painter.layout(
                text.to_string(),
                font,
                text_color.gamma_multiply(alpha),
                rect.width.max(1.0),
            );
            // Own text follows the children inside the box
            let pos = egui::pos2(screen.left(), screen.bottom() - galley.size().y);
            painter.galley(pos, galley, text_color);
        }

        for (el, index, pos) in self.orbit_positions(origin) {
            let color = ORBIT_COLORS[index % ORBIT_COLORS.len()];
            let radius = if self.hovered_orbit == Some(el) {
                ORBIT_DOT_RADIUS * 1.3
            } else {
                ORBIT_DOT_RADIUS
            };
            painter.circle_filled(pos, radius, color);
        }
    }

    pub fn draw_contact_form(&mut self, ctx: &egui::Context) {
        let Some(contact) = self.page.contact() else {
            return;
        };
        let form = contact.form();
        let button = contact.submit_button();
        let sending = contact.is_sending();

        let doc = self.page.document();
        let fields: Vec<(String, String, bool)> = doc
            .form_fields(form)
            .into_iter()
            .filter_map(|id| {
                let el = doc.element(id);
                if el.tag == "button" || el.attr("type") == Some("hidden") {
                    return None;
                }
                let name = el.attr("name")?.to_string();
                Some((name, el.field_value().to_string(), el.tag == "textarea"))
            })
            .collect();
        let label = button
            .map(|b| doc.text_content(b))
            .unwrap_or_else(|| "Send".to_string());
        let enabled = button.map_or(!sending, |b| !doc.element(b).has_attr("disabled"));

        let mut edits: Vec<(String, String)> = Vec::new();
        let mut send = false;
        egui::Window::new("Contact")
            .open(&mut self.show_contact)
            .default_width(320.0)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("contact_fields")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        for (name, value, multiline) in &fields {
                            ui.label(name.as_str());
                            let mut edited = value.clone();
                            let response = if *multiline {
                                ui.add(egui::TextEdit::multiline(&mut edited).desired_rows(4))
                            } else {
                                ui.text_edit_singleline(&mut edited)
                            };
                            if response.changed() {
                                edits.push((name.clone(), edited));
                            }
                            ui.end_row();
                        }
                    });
                ui.add_space(6.0);
                if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
                    send = true;
                }
            });

        for (name, value) in edits {
            self.page.set_field(&name, &value);
        }
        if send {
            match button {
                Some(button) => self.click(button),
                None => {
                    self.page.submit();
                }
            }
        }
    }

    pub fn draw_notification(&mut self, ctx: &egui::Context) {
        let Some(toast) = self.page.notification() else {
            return;
        };
        let doc = self.page.document();
        let el = doc.element(toast);
        let shown = el.has_class(SHOW_CLASS);
        let fill = if el.has_class(NotificationKind::Success.as_class()) {
            egui::Color32::from_rgb(56, 161, 105)
        } else {
            egui::Color32::from_rgb(229, 62, 62)
        };
        let text = doc
            .find_in(toast, |e| e.has_class("notification-text"))
            .map(|t| doc.element(t).text.clone())
            .unwrap_or_default();
        let close = doc.find_in(toast, |e| e.has_class(CLOSE_CLASS));

        // Entering and leaving toasts are drawn faded
        let alpha = if shown { 1.0 } else { 0.4 };
        let mut close_clicked = false;
        egui::Area::new(egui::Id::new("notification"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 56.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(fill.gamma_multiply(alpha))
                    .show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
                            if ui.small_button("\u{00D7}").clicked() {
                                close_clicked = true;
                            }
                        });
                    });
            });

        if close_clicked {
            if let Some(close) = close {
                self.click(close);
            }
        }
    }
}
