use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SiteConfig;
use crate::contact::delivery::EmailDelivery;
use crate::contact::notification::{NotificationCenter, NotificationTask};
use crate::contact::submission::{SubmissionFlow, SubmissionState};
use crate::dom::parser::parse_html;
use crate::dom::{Document, ElementId};
use crate::effects::orbit::{OrbitField, OrbitGenerator};
use crate::effects::reveal::RevealOnScroll;
use crate::effects::typing::{TypingEffect, TypingTick};
use crate::engine::observer::dispatch;
use crate::engine::scheduler::Scheduler;
use crate::nav::scroll_spy::ScrollSpyNav;
use crate::nav::smooth_scroll::{ScrollRequest, SmoothScroll};
use crate::nav::{is_scroll_locked, NavMenu};
use crate::render::layout::{compute_layout, Geometry};
use crate::render::Viewport;

/// Error while loading a page from disk.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("failed to read page {path:?}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Every deferred callback the page can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Typing(TypingTick),
    Notification(NotificationTask),
}

impl From<TypingTick> for Task {
    fn from(t: TypingTick) -> Self {
        Task::Typing(t)
    }
}

impl From<NotificationTask> for Task {
    fn from(t: NotificationTask) -> Self {
        Task::Notification(t)
    }
}

/// What a click did, for hosts that mirror browser defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClickOutcome {
    pub default_prevented: bool,
    pub scroll: Option<ScrollRequest>,
}

/// A loaded page with its behavior components.
///
/// All application logic runs on the caller's thread: hosts feed events
/// (`click`, `user_scroll`, `resize`, ...) and advance the virtual clock.
/// Each component is `None` when its markup is missing.
pub struct Page {
    config: SiteConfig,
    document: Document,
    viewport: Viewport,
    geometry: Geometry,
    scheduler: Scheduler<Task>,
    rng: StdRng,
    delivery: Arc<dyn EmailDelivery>,
    notifications: NotificationCenter,
    started: bool,
    nav: NavMenu,
    smooth_scroll: SmoothScroll,
    scroll_spy: Option<ScrollSpyNav>,
    typing: Option<TypingEffect>,
    orbits: Option<OrbitField>,
    reveal: Option<RevealOnScroll>,
    contact: Option<SubmissionFlow>,
}

impl Page {
    pub fn from_html(html: &str, config: SiteConfig, delivery: Arc<dyn EmailDelivery>) -> Self {
        let document = parse_html(html);
        let viewport = Viewport::new(config.viewport.width, config.viewport.height);
        let geometry = compute_layout(&document, viewport.width, viewport.height);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let notifications = NotificationCenter::new(config.notifications.clone());
        Self {
            config,
            document,
            viewport,
            geometry,
            scheduler: Scheduler::new(),
            rng,
            delivery,
            notifications,
            started: false,
            // Handlers bind on ready()
            nav: NavMenu::default(),
            smooth_scroll: SmoothScroll::default(),
            scroll_spy: None,
            typing: None,
            orbits: None,
            reveal: None,
            contact: None,
        }
    }

    pub fn load(
        path: &std::path::Path,
        config: SiteConfig,
        delivery: Arc<dyn EmailDelivery>,
    ) -> Result<Self, PageError> {
        let html = std::fs::read_to_string(path).map_err(|source| PageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_html(&html, config, delivery))
    }

    /// Page-ready: start every component once.
    pub fn ready(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        log::info!("Portfolio loaded: {:?}", self.document.title);

        let doc = &mut self.document;
        let now = self.scheduler.now_ms();

        self.nav = NavMenu::attach(doc, self.config.nav.mobile_breakpoint_px);
        self.scroll_spy = ScrollSpyNav::attach(doc, &self.config.nav);

        self.typing = TypingEffect::attach(doc, &self.config.typing);
        if let Some(typing) = self.typing.as_mut() {
            typing.run_tick(doc, &mut self.scheduler);
        }

        let mut generator = OrbitGenerator::new(&mut self.rng, self.config.orbit.clone());
        self.orbits = OrbitField::attach(doc, &mut generator, now);

        self.smooth_scroll = SmoothScroll::attach(doc, self.config.nav.header_offset_px);
        self.reveal = RevealOnScroll::attach(doc, &self.config.reveal);
        self.contact = SubmissionFlow::attach(doc, &self.config.contact);

        log::debug!(
            "Components: scroll-spy={} typing={} orbits={} reveal={} contact={}",
            self.scroll_spy.is_some(),
            self.typing.is_some(),
            self.orbits.is_some(),
            self.reveal.is_some(),
            self.contact.is_some(),
        );

        // Orbit styles and keyframes changed the document
        self.relayout();
        self.nav.handle_resize(&mut self.document, self.viewport.width);
        self.observe();
    }

    // ─── Clock ───────────────────────────────────────────────────────────

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Run every task due within the next `ms` milliseconds, then poll the
    /// contact delivery.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now_ms() + ms;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task);
        }
        self.scheduler.advance_to(until);
        self.poll_delivery();
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Typing(TypingTick) => {
                if let Some(typing) = self.typing.as_mut() {
                    typing.run_tick(&mut self.document, &mut self.scheduler);
                }
            }
            Task::Notification(t) => {
                self.notifications
                    .run(&mut self.document, &mut self.scheduler, t);
            }
        }
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    /// Scroll gesture from the user; ignored while the menu locks scrolling.
    pub fn user_scroll(&mut self, scroll_y: f32) -> bool {
        if is_scroll_locked(&self.document) {
            return false;
        }
        self.set_scroll(scroll_y);
        true
    }

    /// Programmatic scroll (anchor navigation).
    pub fn scroll_to(&mut self, request: ScrollRequest) {
        self.set_scroll(request.top);
    }

    fn set_scroll(&mut self, scroll_y: f32) {
        let max = self.viewport.max_scroll(self.geometry.content_height);
        self.viewport.scroll_y = scroll_y.clamp(0.0, max);
        self.observe();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
        self.relayout();
        self.nav.handle_resize(&mut self.document, width);
        self.observe();
    }

    pub fn orientation_change(&mut self, width: f32, height: f32) {
        self.resize(width, height);
    }

    fn relayout(&mut self) {
        self.geometry = compute_layout(&self.document, self.viewport.width, self.viewport.height);
        let max = self.viewport.max_scroll(self.geometry.content_height);
        self.viewport.scroll_y = self.viewport.scroll_y.min(max);
    }

    /// Deliver fresh intersection batches to the observers.
    fn observe(&mut self) {
        if let Some(spy) = self.scroll_spy.as_mut() {
            dispatch(spy, &mut self.document, &self.viewport, &self.geometry);
        }
        if let Some(reveal) = self.reveal.as_mut() {
            dispatch(reveal, &mut self.document, &self.viewport, &self.geometry);
        }
    }

    // ─── Events ──────────────────────────────────────────────────────────

    pub fn click(&mut self, target: ElementId) -> ClickOutcome {
        let mut outcome = ClickOutcome::default();
        let doc = &mut self.document;

        if self.nav.is_hamburger(doc, target) {
            self.nav.toggle(doc);
        }

        if let Some(anchor) = doc.closest(target, |el| el.tag == "a") {
            if self.nav.is_link(anchor) {
                self.nav.close(doc);
            }
            if let Some(request) =
                self.smooth_scroll
                    .on_click(doc, &self.geometry, &self.viewport, anchor)
            {
                outcome.default_prevented = true;
                outcome.scroll = Some(request);
            }
        }

        if let Some(toast) = NotificationCenter::close_target(doc, target) {
            self.notifications.close(doc, &mut self.scheduler, toast);
        }

        let submit_button = self.contact.as_ref().and_then(|c| c.submit_button());
        let on_submit = submit_button.is_some_and(|button| {
            doc.closest(target, |el| el.tag == "button" || el.tag == "input") == Some(button)
        });
        if on_submit {
            outcome.default_prevented = true;
            self.submit();
        }

        if let Some(request) = outcome.scroll {
            self.scroll_to(request);
        }
        outcome
    }

    pub fn pointer_enter(&mut self, target: ElementId) -> bool {
        let now = self.scheduler.now_ms();
        match self.orbits.as_mut() {
            Some(orbits) => orbits.pointer_enter(&mut self.document, target, now),
            None => false,
        }
    }

    pub fn pointer_leave(&mut self, target: ElementId) -> bool {
        let now = self.scheduler.now_ms();
        match self.orbits.as_mut() {
            Some(orbits) => orbits.pointer_leave(&mut self.document, target, now),
            None => false,
        }
    }

    /// Set a contact form field by name.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        let Some(form) = self.contact.as_ref().map(|c| c.form()) else {
            return false;
        };
        let Some(field) = self.document.form_field(form, name) else {
            return false;
        };
        self.document.element_mut(field).set_field_value(value);
        true
    }

    /// Submit the contact form (default navigation is always prevented).
    pub fn submit(&mut self) -> bool {
        let Some(contact) = self.contact.as_mut() else {
            return false;
        };
        contact.begin(
            &mut self.document,
            &mut self.scheduler,
            &self.notifications,
            Arc::clone(&self.delivery),
        )
    }

    fn poll_delivery(&mut self) -> Option<SubmissionState> {
        self.contact
            .as_mut()?
            .poll(&mut self.document, &mut self.scheduler, &self.notifications)
    }

    /// Block up to `timeout` for an in-flight delivery to finish.
    pub fn await_delivery(&mut self, timeout: Duration) -> Option<SubmissionState> {
        self.contact.as_mut()?.wait(
            &mut self.document,
            &mut self.scheduler,
            &self.notifications,
            timeout,
        )
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn nav(&self) -> &NavMenu {
        &self.nav
    }

    pub fn scroll_spy(&self) -> Option<&ScrollSpyNav> {
        self.scroll_spy.as_ref()
    }

    pub fn typing(&self) -> Option<&TypingEffect> {
        self.typing.as_ref()
    }

    pub fn orbits(&self) -> Option<&OrbitField> {
        self.orbits.as_ref()
    }

    pub fn reveal(&self) -> Option<&RevealOnScroll> {
        self.reveal.as_ref()
    }

    pub fn contact(&self) -> Option<&SubmissionFlow> {
        self.contact.as_ref()
    }

    /// Text currently shown by the typing effect.
    pub fn typing_text(&self) -> Option<&str> {
        self.typing
            .as_ref()
            .map(|t| self.document.element(t.target()).text.as_str())
    }

    /// The nav link marked active by the scroll-spy.
    pub fn active_nav_link(&self) -> Option<ElementId> {
        self.scroll_spy.as_ref()?.active_link(&self.document)
    }

    /// `href` of the active nav link.
    pub fn active_section_href(&self) -> Option<&str> {
        self.document.element(self.active_nav_link()?).attr("href")
    }

    pub fn notification(&self) -> Option<ElementId> {
        NotificationCenter::current(&self.document)
    }
}
