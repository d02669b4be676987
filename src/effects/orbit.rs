//! Procedural orbit animations for decorative elements.
//!
//! Every `.random-orbit` element gets its own circular orbit: a random start
//! angle and period, a radius that grows with the element's index, and a
//! random direction. Each orbit is written into the document as a distinct
//! `@keyframes orbitN` rule plus the element's inline `animation`. Hovering
//! an element pauses only that element.

use rand::Rng;

use crate::config::OrbitConfig;
use crate::dom::css::Keyframes;
use crate::dom::{Document, ElementId};
use crate::render::animator::{orbit_angle, orbit_offset, AnimationClock};

pub const ORBIT_CLASS: &str = "random-orbit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitDirection {
    Forward,
    Reverse,
}

impl OrbitDirection {
    /// Value for the CSS `animation-direction` slot.
    pub fn as_css(self) -> &'static str {
        match self {
            OrbitDirection::Forward => "normal",
            OrbitDirection::Reverse => "reverse",
        }
    }
}

/// Orbit parameters for one element, fixed at generation time.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitAssignment {
    pub element: ElementId,
    pub index: usize,
    pub start_angle_deg: f32,
    pub radius_px: f32,
    pub period_sec: f32,
    pub direction: OrbitDirection,
    clock: AnimationClock,
}

impl OrbitAssignment {
    pub fn animation_name(&self) -> String {
        format!("orbit{}", self.index)
    }

    /// `rotate(a) translateX(r) rotate(-a)`: on the circle, upright.
    pub fn transform_at(&self, angle_deg: f32) -> String {
        format!(
            "rotate({:.3}deg) translateX({}px) rotate(-{:.3}deg)",
            angle_deg, self.radius_px, angle_deg
        )
    }

    pub fn initial_transform(&self) -> String {
        self.transform_at(self.start_angle_deg)
    }

    pub fn keyframes(&self) -> Keyframes {
        Keyframes {
            name: self.animation_name(),
            from: self.transform_at(self.start_angle_deg),
            to: self.transform_at(self.start_angle_deg + 360.0),
        }
    }

    /// Value for the element's `animation` shorthand.
    pub fn animation(&self) -> String {
        format!(
            "{} {:.3}s linear infinite {}",
            self.animation_name(),
            self.period_sec,
            self.direction.as_css()
        )
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Current angle on the orbit, in [0, 360).
    pub fn angle_at(&self, now_ms: u64) -> f32 {
        orbit_angle(
            self.start_angle_deg,
            self.period_sec,
            self.direction == OrbitDirection::Reverse,
            self.clock.active_ms(now_ms),
        )
    }

    /// Offset from the orbit center at `now_ms`.
    pub fn offset_at(&self, now_ms: u64) -> [f32; 2] {
        orbit_offset(self.radius_px, self.angle_at(now_ms))
    }
}

/// Samples orbit parameters from an injectable random source.
pub struct OrbitGenerator<R: Rng> {
    rng: R,
    config: OrbitConfig,
}

impl<R: Rng> OrbitGenerator<R> {
    pub fn new(rng: R, config: OrbitConfig) -> Self {
        Self { rng, config }
    }

    /// Assign an orbit to the element at `index`, starting its clock at `now_ms`.
    pub fn assign(&mut self, index: usize, element: ElementId, now_ms: u64) -> OrbitAssignment {
        let start_angle_deg = self.rng.random_range(0.0..360.0);
        let radius_px = self.config.base_radius_px + index as f32 * self.config.radius_step_px;
        let spread = if self.config.period_spread_sec > 0.0 {
            self.rng.random_range(0.0..self.config.period_spread_sec)
        } else {
            0.0
        };
        let direction = if self.rng.random_bool(0.5) {
            OrbitDirection::Forward
        } else {
            OrbitDirection::Reverse
        };
        OrbitAssignment {
            element,
            index,
            start_angle_deg,
            radius_px,
            period_sec: self.config.min_period_sec + spread,
            direction,
            clock: AnimationClock::started_at(now_ms),
        }
    }

    pub fn generate(&mut self, elements: &[ElementId], now_ms: u64) -> Vec<OrbitAssignment> {
        elements
            .iter()
            .enumerate()
            .map(|(i, &el)| self.assign(i, el, now_ms))
            .collect()
    }
}

/// The running set of orbits on a page.
#[derive(Debug, Clone)]
pub struct OrbitField {
    orbits: Vec<OrbitAssignment>,
}

impl OrbitField {
    /// Generate and install orbits for every `.random-orbit` element.
    /// Returns `None` when the page has none.
    pub fn attach<R: Rng>(
        doc: &mut Document,
        generator: &mut OrbitGenerator<R>,
        now_ms: u64,
    ) -> Option<Self> {
        let elements = doc.elements_by_class(ORBIT_CLASS);
        if elements.is_empty() {
            return None;
        }
        let field = Self {
            orbits: generator.generate(&elements, now_ms),
        };
        field.install(doc);
        log::debug!("Installed {} orbit animations", field.orbits.len());
        Some(field)
    }

    fn install(&self, doc: &mut Document) {
        let head = doc.head();
        for orbit in &self.orbits {
            let el = doc.element_mut(orbit.element);
            el.style.set("transform", orbit.initial_transform());
            el.style.set("animation", orbit.animation());

            let sheet = doc.create_element("style");
            doc.element_mut(sheet).text = orbit.keyframes().to_css();
            if let Some(head) = head {
                doc.append_child(head, sheet);
            }
        }
    }

    pub fn orbits(&self) -> &[OrbitAssignment] {
        &self.orbits
    }

    pub fn get(&self, element: ElementId) -> Option<&OrbitAssignment> {
        self.orbits.iter().find(|o| o.element == element)
    }

    /// Pause the hovered element's orbit. Returns `false` for non-orbit elements.
    pub fn pointer_enter(&mut self, doc: &mut Document, element: ElementId, now_ms: u64) -> bool {
        self.set_paused(doc, element, now_ms, true)
    }

    /// Resume the element's orbit from where it stopped.
    pub fn pointer_leave(&mut self, doc: &mut Document, element: ElementId, now_ms: u64) -> bool {
        self.set_paused(doc, element, now_ms, false)
    }

    fn set_paused(&mut self, doc: &mut Document, element: ElementId, now_ms: u64, paused: bool) -> bool {
        let Some(orbit) = self.orbits.iter_mut().find(|o| o.element == element) else {
            return false;
        };
        if paused {
            orbit.clock.pause(now_ms);
        } else {
            orbit.clock.resume(now_ms);
        }
        let state = if paused { "paused" } else { "running" };
        doc.element_mut(element)
            .style
            .set("animation-play-state", state);
        true
    }
}
