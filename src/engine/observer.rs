//! Viewport intersection observation.
//!
//! An [`IntersectionObserver`] watches a set of targets against the viewport
//! shrunk (or grown) by a root margin. Each computation reports:
//! - every newly observed target once, with its current state
//! - afterwards, only targets whose intersecting state flipped
//!
//! A target counts as intersecting when it overlaps the margin-adjusted root
//! and its visible ratio reaches the threshold.

use std::collections::HashMap;

use crate::config::ObserverConfig;
use crate::dom::css::parse_css_px;
use crate::dom::{Document, ElementId};
use crate::render::layout::Geometry;
use crate::render::{Rect, Viewport};

/// CSS-style margin around the root; negative values shrink it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl RootMargin {
    /// Parse the 1–4 value shorthand, e.g. `-100px 0px -100px 0px`.
    pub fn parse(s: &str) -> Option<Self> {
        let vals: Vec<f32> = s
            .split_whitespace()
            .map(parse_css_px)
            .collect::<Option<Vec<_>>>()?;
        let (top, right, bottom, left) = match vals.as_slice() {
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => return None,
        };
        Some(Self {
            top,
            right,
            bottom,
            left,
        })
    }

    /// Grow `rect` by this margin.
    pub fn apply(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x - self.left,
            rect.y - self.top,
            rect.width + self.left + self.right,
            rect.height + self.top + self.bottom,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f32,
    pub root_margin: RootMargin,
}

impl ObserverOptions {
    /// Build from config; an unparseable margin falls back to zero.
    pub fn from_config(config: &ObserverConfig) -> Self {
        let root_margin = RootMargin::parse(&config.root_margin).unwrap_or_else(|| {
            log::warn!("Invalid root margin {:?}, using 0px", config.root_margin);
            RootMargin::default()
        });
        Self {
            threshold: config.threshold.clamp(0.0, 1.0),
            root_margin,
        }
    }
}

/// One visibility report for one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    pub intersection_ratio: f32,
}

/// Receives batches of intersection entries.
pub trait IntersectionHandler {
    fn observer_mut(&mut self) -> &mut IntersectionObserver;

    fn handle_intersections(&mut self, doc: &mut Document, entries: &[IntersectionEntry]);
}

#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    targets: Vec<ElementId>,
    /// Last reported state per target (absent = not reported yet)
    last: HashMap<ElementId, bool>,
}

impl IntersectionObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
            last: HashMap::new(),
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    pub fn observe(&mut self, target: ElementId) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }

    pub fn unobserve(&mut self, target: ElementId) {
        self.targets.retain(|t| *t != target);
        self.last.remove(&target);
    }

    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    /// Visible ratio of `target` and whether it counts as intersecting.
    pub fn measure(&self, target: ElementId, viewport: &Viewport, geometry: &Geometry) -> (bool, f32) {
        let Some(rect) = geometry.rect(target) else {
            return (false, 0.0);
        };
        let root = self.options.root_margin.apply(viewport.visible_rect());
        let Some(overlap) = rect.intersection(&root) else {
            return (false, 0.0);
        };
        let ratio = if rect.area() > 0.0 {
            (overlap.area() / rect.area()).clamp(0.0, 1.0)
        } else {
            1.0
        };
        (ratio >= self.options.threshold, ratio)
    }

    /// Compute the next batch of entries, in observation order.
    pub fn take_records(&mut self, viewport: &Viewport, geometry: &Geometry) -> Vec<IntersectionEntry> {
        let mut entries = Vec::new();
        for &target in &self.targets {
            let (is_intersecting, intersection_ratio) = self.measure(target, viewport, geometry);
            if self.last.get(&target) == Some(&is_intersecting) {
                continue;
            }
            self.last.insert(target, is_intersecting);
            entries.push(IntersectionEntry {
                target,
                is_intersecting,
                intersection_ratio,
            });
        }
        entries
    }
}

/// Compute and deliver one batch to `handler`. Returns the batch size.
pub fn dispatch<H: IntersectionHandler + ?Sized>(
    handler: &mut H,
    doc: &mut Document,
    viewport: &Viewport,
    geometry: &Geometry,
) -> usize {
    let entries = handler.observer_mut().take_records(viewport, geometry);
    if !entries.is_empty() {
        handler.handle_intersections(doc, &entries);
    }
    entries.len()
}
