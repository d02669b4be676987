//! `PreviewApp` — egui host for a loaded [`Page`].
//!
//! The page owns all behavior; this module only feeds it events and paints
//! the document. Methods are split across the sibling sub-modules:
//!
//! - `navigation` — clock, viewport and click forwarding
//! - `toolbar`    — fixed header with nav links and the hamburger menu
//! - `content`    — page body, orbits, contact form and notification toast

pub mod content;
pub mod navigation;
pub mod toolbar;

use std::time::{Duration, Instant};

use eframe::egui;

use portfolio_runtime::dom::ElementId;
use portfolio_runtime::engine::Page;

pub struct PreviewApp {
    pub page: Page,
    pub clock_start: Instant,
    /// Scroll offset to apply on the next frame (anchor navigation)
    pub pending_scroll: Option<f32>,
    pub hovered_orbit: Option<ElementId>,
    pub dark_mode: bool,
    pub show_contact: bool,
}

impl PreviewApp {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            clock_start: Instant::now(),
            pending_scroll: None,
            hovered_orbit: None,
            dark_mode: true,
            show_contact: true,
        }
    }
}

/// Open the preview window; blocks until it closes.
pub fn run(mut page: Page) -> eframe::Result<()> {
    page.ready();
    let size = [page.viewport().width, page.viewport().height];
    let title = if page.document().title.is_empty() {
        "Portfolio Preview".to_string()
    } else {
        page.document().title.clone()
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(size),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new(page)))),
    )
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.advance_clock();

        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        egui::TopBottomPanel::top("site_header").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_content(ui);
        });

        if self.show_contact {
            self.draw_contact_form(ctx);
        }
        self.draw_notification(ctx);

        // Typing and orbits animate continuously
        ctx.request_repaint_after(Duration::from_millis(16));
    }
}
