use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use portfolio_runtime::config::SiteConfig;
use portfolio_runtime::contact::notification::{NOTIFICATION_CLASS, SHOW_CLASS};
use portfolio_runtime::contact::{
    DeliveryError, DeliveryReceipt, EmailDelivery, FormData, SubmissionState,
};
use portfolio_runtime::dom::ElementId;
use portfolio_runtime::engine::Page;
use portfolio_runtime::nav::{is_scroll_locked, ACTIVE_CLASS, HAMBURGER_ID, NAV_MENU_ID};

const SITE: &str = include_str!("../site/index.html");

/// Records every delivery and answers with a fixed result.
struct Recorder {
    result: Result<DeliveryReceipt, DeliveryError>,
    seen: Mutex<Vec<FormData>>,
}

impl Recorder {
    fn accepting() -> Arc<Self> {
        Arc::new(Self {
            result: Ok(DeliveryReceipt {
                status: 200,
                text: "OK".into(),
            }),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn rejecting(text: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(DeliveryError::new(text)),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn forms(&self) -> Vec<FormData> {
        self.seen.lock().unwrap().clone()
    }
}

impl EmailDelivery for Recorder {
    fn send(&self, _: &str, _: &str, form: &FormData) -> Result<DeliveryReceipt, DeliveryError> {
        self.seen.lock().unwrap().push(form.clone());
        self.result.clone()
    }
}

/// Holds the delivery open until the test releases it.
struct Gate {
    release: Mutex<mpsc::Receiver<()>>,
}

impl EmailDelivery for Gate {
    fn send(&self, _: &str, _: &str, _: &FormData) -> Result<DeliveryReceipt, DeliveryError> {
        let _ = self.release.lock().unwrap().recv();
        Ok(DeliveryReceipt {
            status: 200,
            text: "OK".into(),
        })
    }
}

fn config() -> SiteConfig {
    SiteConfig {
        seed: Some(42),
        ..SiteConfig::default()
    }
}

fn load_with(delivery: Arc<dyn EmailDelivery>) -> Page {
    let mut page = Page::from_html(SITE, config(), delivery);
    page.ready();
    page
}

fn load() -> Page {
    load_with(Recorder::accepting())
}

fn by_id(page: &Page, id: &str) -> ElementId {
    page.document().get_element_by_id(id).unwrap()
}

fn top_of(page: &Page, id: &str) -> f32 {
    page.geometry().rect(by_id(page, id)).unwrap().top()
}

fn nav_link(page: &Page, href: &str) -> ElementId {
    page.nav()
        .links()
        .iter()
        .copied()
        .find(|&l| page.document().element(l).attr("href") == Some(href))
        .unwrap()
}

fn active_count(page: &Page) -> usize {
    page.nav()
        .links()
        .iter()
        .filter(|&&l| page.document().element(l).has_class(ACTIVE_CLASS))
        .count()
}

fn fill_form(page: &mut Page) {
    assert!(page.set_field("user_name", "Ann"));
    assert!(page.set_field("user_email", "ann@example.com"));
    assert!(page.set_field("message", "Hello there"));
}

fn field_value(page: &Page, name: &str) -> String {
    let form = page.contact().unwrap().form();
    let field = page.document().form_field(form, name).unwrap();
    page.document().element(field).field_value().to_string()
}

fn submit_button(page: &Page) -> ElementId {
    page.contact().unwrap().submit_button().unwrap()
}

fn toasts(page: &Page) -> Vec<ElementId> {
    page.document().elements_by_class(NOTIFICATION_CLASS)
}

fn toast_text(page: &Page) -> String {
    let doc = page.document();
    let toast = page.notification().unwrap();
    let text = doc
        .find_in(toast, |el| el.has_class("notification-text"))
        .unwrap();
    doc.element(text).text.clone()
}

// ─── Load ────────────────────────────────────────────────────────────────────

#[test]
fn every_component_attaches_to_the_site() {
    let page = load();
    assert!(page.typing().is_some());
    assert_eq!(page.orbits().unwrap().orbits().len(), 4);
    assert_eq!(page.scroll_spy().unwrap().sections().len(), 4);
    assert!(page.reveal().is_some());
    assert!(page.contact().is_some());
    assert_eq!(page.nav().links().len(), 4);
}

#[test]
fn example_config_parses() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("site/portfolio.toml");
    let config = SiteConfig::load(&path).unwrap();
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.typing.phrases.len(), 6);
    assert_eq!(config.contact.service_id, "service_aegwa4n");
}

// ─── Typing ──────────────────────────────────────────────────────────────────

#[test]
fn typing_types_holds_deletes_and_moves_on() {
    let mut page = load();
    assert_eq!(page.typing_text(), Some("W"));

    page.advance(1200);
    assert_eq!(page.typing_text(), Some("Web Developer"));

    // Full phrase stays up for the hold delay
    page.advance(1999);
    assert_eq!(page.typing_text(), Some("Web Developer"));
    page.advance(1);
    assert_eq!(page.typing_text(), Some("Web Develope"));

    page.advance(600);
    assert_eq!(page.typing_text(), Some(""));
    page.advance(499);
    assert_eq!(page.typing_text(), Some(""));
    page.advance(1);
    assert_eq!(page.typing_text(), Some("F"));
}

// ─── Orbits ──────────────────────────────────────────────────────────────────

#[test]
fn orbits_are_reproducible_per_seed() {
    let a = load();
    let b = load();
    assert_eq!(a.orbits().unwrap().orbits(), b.orbits().unwrap().orbits());
}

#[test]
fn orbit_radii_grow_with_index_and_periods_stay_in_range() {
    let page = load();
    let orbits = page.orbits().unwrap().orbits();
    let radii: Vec<f32> = orbits.iter().map(|o| o.radius_px).collect();
    assert_eq!(radii, vec![120.0, 160.0, 200.0, 240.0]);
    for orbit in orbits {
        assert!((15.0..30.0).contains(&orbit.period_sec));
        assert!((0.0..360.0).contains(&orbit.start_angle_deg));
        let style = &page.document().element(orbit.element).style;
        let animation = style.get("animation").unwrap();
        assert!(animation.starts_with(&format!("orbit{} ", orbit.index)));
    }

    let head = page.document().head().unwrap();
    let sheets = page
        .document()
        .descendants(head)
        .into_iter()
        .filter(|&id| page.document().element(id).tag == "style")
        .count();
    assert_eq!(sheets, 4);
}

#[test]
fn hovering_an_orbit_freezes_it_until_the_pointer_leaves() {
    let mut page = load();
    let planet = page.orbits().unwrap().orbits()[0].element;
    page.advance(1000);

    assert!(page.pointer_enter(planet));
    assert_eq!(
        page.document().element(planet).style.get("animation-play-state"),
        Some("paused")
    );
    let frozen = page.orbits().unwrap().get(planet).unwrap().angle_at(page.now_ms());
    page.advance(3000);
    let still = page.orbits().unwrap().get(planet).unwrap().angle_at(page.now_ms());
    assert_eq!(frozen, still);

    assert!(page.pointer_leave(planet));
    page.advance(3000);
    let moved = page.orbits().unwrap().get(planet).unwrap().angle_at(page.now_ms());
    assert_ne!(frozen, moved);

    // Non-orbit elements ignore hover
    let sun = page.document().elements_by_class("sun")[0];
    assert!(!page.pointer_enter(sun));
}

// ─── Scroll-spy ──────────────────────────────────────────────────────────────

#[test]
fn first_section_is_active_on_load() {
    let page = load();
    assert_eq!(page.active_section_href(), Some("#home"));
    assert_eq!(active_count(&page), 1);
}

#[test]
fn scrolling_moves_the_active_link() {
    let mut page = load();
    for id in ["about", "projects", "contact"] {
        let top = top_of(&page, id);
        assert!(page.user_scroll(top));
        assert_eq!(page.active_section_href(), Some(format!("#{}", id).as_str()));
        assert_eq!(active_count(&page), 1);
    }

    page.user_scroll(0.0);
    assert_eq!(page.active_section_href(), Some("#home"));
    assert_eq!(active_count(&page), 1);
}

// ─── Reveal ──────────────────────────────────────────────────────────────────

#[test]
fn reveal_targets_appear_once_and_stay() {
    let mut page = load();
    let about_title = page.document().find_in(by_id(&page, "about"), |el| el.tag == "h2").unwrap();
    let reveal = page.reveal().unwrap();
    assert!(!reveal.is_revealed(about_title));
    assert_eq!(reveal.revealed_count(), 0);

    page.user_scroll(top_of(&page, "about"));
    assert!(page.reveal().unwrap().is_revealed(about_title));
    let style = &page.document().element(about_title).style;
    assert_eq!(style.get("opacity"), Some("1"));
    assert_eq!(style.get("transform"), Some("translate(0, 0)"));

    // Next section's cards are still below the fold
    let cards = page.document().elements_by_class("project-card");
    assert!(cards.iter().all(|&c| !page.reveal().unwrap().is_revealed(c)));

    let revealed = page.reveal().unwrap().revealed_count();
    page.user_scroll(0.0);
    assert!(page.reveal().unwrap().is_revealed(about_title));
    assert_eq!(page.reveal().unwrap().revealed_count(), revealed);
}

// ─── Navigation ──────────────────────────────────────────────────────────────

#[test]
fn nav_link_click_scrolls_below_the_header() {
    let mut page = load();
    let link = nav_link(&page, "#projects");
    let outcome = page.click(link);

    assert!(outcome.default_prevented);
    let expected = top_of(&page, "projects") - 80.0;
    assert_eq!(outcome.scroll.unwrap().top, expected);
    assert_eq!(page.viewport().scroll_y, expected);
    assert_eq!(page.active_section_href(), Some("#projects"));
}

#[test]
fn bare_hash_link_keeps_the_default_action() {
    let mut page = load();
    let logo = page.document().elements_by_class("logo")[0];
    let outcome = page.click(logo);
    assert!(!outcome.default_prevented);
    assert_eq!(page.viewport().scroll_y, 0.0);
}

#[test]
fn mobile_menu_locks_scroll_until_a_link_is_chosen() {
    let mut page = load();
    page.resize(500.0, 800.0);
    let hamburger = by_id(&page, HAMBURGER_ID);
    let menu = by_id(&page, NAV_MENU_ID);

    page.click(hamburger);
    assert!(page.nav().is_open(page.document()));
    assert!(page.document().element(hamburger).has_class(ACTIVE_CLASS));
    assert!(is_scroll_locked(page.document()));
    assert!(!page.user_scroll(400.0));

    let link = nav_link(&page, "#about");
    page.click(link);
    assert!(!page.document().element(menu).has_class(ACTIVE_CLASS));
    assert!(!is_scroll_locked(page.document()));
}

#[test]
fn tapping_a_hamburger_bar_opens_the_menu() {
    let mut page = load();
    page.resize(500.0, 800.0);
    let hamburger = by_id(&page, HAMBURGER_ID);
    let bar = page
        .document()
        .find_in(hamburger, |el| el.has_class("bar"))
        .unwrap();

    page.click(bar);
    assert!(page.nav().is_open(page.document()));
    assert!(is_scroll_locked(page.document()));
    assert!(!page.user_scroll(400.0));

    page.click(bar);
    assert!(!page.nav().is_open(page.document()));
    assert!(!is_scroll_locked(page.document()));
}

#[test]
fn widening_past_the_breakpoint_closes_the_menu() {
    let mut page = load();
    page.resize(600.0, 900.0);
    page.click(by_id(&page, HAMBURGER_ID));
    assert!(page.nav().is_open(page.document()));

    page.orientation_change(1024.0, 600.0);
    assert!(!page.nav().is_open(page.document()));
    assert!(!is_scroll_locked(page.document()));
}

// ─── Contact form ────────────────────────────────────────────────────────────

#[test]
fn successful_submission_clears_the_form_and_confirms() {
    let delivery = Recorder::accepting();
    let mut page = load_with(delivery.clone());
    fill_form(&mut page);

    let outcome = page.click(submit_button(&page));
    assert!(outcome.default_prevented);
    assert_eq!(
        page.await_delivery(Duration::from_secs(5)),
        Some(SubmissionState::Succeeded)
    );

    let forms = delivery.forms();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].get("user_name"), Some("Ann"));
    assert_eq!(forms[0].get("message"), Some("Hello there"));
    let stamp = forms[0].get("time").unwrap();
    assert_eq!(stamp.len(), "15.10.2026, 09:05:03".len());

    assert_eq!(field_value(&page, "user_name"), "");
    assert_eq!(field_value(&page, "message"), "");
    assert_eq!(field_value(&page, "time"), stamp);

    let button = page.document().element(submit_button(&page));
    assert_eq!(button.text, "Send message");
    assert!(!button.has_attr("disabled"));

    assert_eq!(toast_text(&page), "Message sent! I will get back to you soon.");
    assert!(page
        .document()
        .element(page.notification().unwrap())
        .has_class("success"));
}

#[test]
fn rejected_submission_keeps_input_and_offers_the_address() {
    let mut page = load_with(Recorder::rejecting("The Public Key is invalid"));
    fill_form(&mut page);

    page.submit();
    assert_eq!(
        page.await_delivery(Duration::from_secs(5)),
        Some(SubmissionState::Failed)
    );

    assert_eq!(field_value(&page, "user_name"), "Ann");
    let text = toast_text(&page);
    assert!(text.contains("The Public Key is invalid"));
    assert!(text.contains("ilyaaleksandrovich00@gmail.com"));
    assert!(page
        .document()
        .element(page.notification().unwrap())
        .has_class("error"));

    let button = page.document().element(submit_button(&page));
    assert_eq!(button.text, "Send message");
    assert!(!button.has_attr("disabled"));
}

#[test]
fn button_shows_sending_state_and_blocks_resubmission() {
    let (release, gate) = mpsc::channel();
    let mut page = load_with(Arc::new(Gate {
        release: Mutex::new(gate),
    }));
    fill_form(&mut page);

    assert!(page.submit());
    let button = page.document().element(submit_button(&page));
    assert_eq!(button.text, "Sending...");
    assert!(button.has_attr("disabled"));
    assert!(!page.submit());

    release.send(()).unwrap();
    assert_eq!(
        page.await_delivery(Duration::from_secs(5)),
        Some(SubmissionState::Succeeded)
    );
    assert_eq!(page.document().element(submit_button(&page)).text, "Send message");
}

#[test]
fn notification_enters_expires_and_is_removed() {
    let mut page = load();
    fill_form(&mut page);
    page.submit();
    page.await_delivery(Duration::from_secs(5));

    let toast = page.notification().unwrap();
    assert!(!page.document().element(toast).has_class(SHOW_CLASS));
    page.advance(10);
    assert!(page.document().element(toast).has_class(SHOW_CLASS));

    page.advance(4989);
    assert!(page.document().element(toast).has_class(SHOW_CLASS));
    page.advance(1);
    assert!(!page.document().element(toast).has_class(SHOW_CLASS));
    assert!(page.document().is_connected(toast));

    page.advance(300);
    assert!(!page.document().is_connected(toast));
    assert!(page.notification().is_none());
}

#[test]
fn a_new_notification_replaces_the_old_one() {
    let mut page = load();
    for _ in 0..2 {
        fill_form(&mut page);
        page.submit();
        page.await_delivery(Duration::from_secs(5));
    }
    assert_eq!(toasts(&page).len(), 1);
}

#[test]
fn close_button_dismisses_early() {
    let mut page = load();
    fill_form(&mut page);
    page.submit();
    page.await_delivery(Duration::from_secs(5));
    page.advance(10);

    let toast = page.notification().unwrap();
    let close = page
        .document()
        .find_in(toast, |el| el.has_class("notification-close"))
        .unwrap();
    page.click(close);
    assert!(!page.document().element(toast).has_class(SHOW_CLASS));
    page.advance(300);
    assert!(page.notification().is_none());

    // The original expiry finds nothing left to close
    page.advance(5000);
    assert!(toasts(&page).is_empty());
}
