//! Orbit animation sampling.
//!
//! CSS drives the real motion; this module reproduces the same timeline so
//! hosts can draw the decorations and tests can check phase behavior.
//! - Play clock: active time excluding paused spans
//! - Orbit angle: linear sweep of 360° per period, either direction
//! - Orbit offset: where `rotate(a) translateX(r) rotate(-a)` lands

/// Accumulates running time for one animation, honoring pause/resume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    /// Active milliseconds banked before the current running span
    banked_ms: u64,
    /// Clock time the current running span started at (None = paused)
    running_since: Option<u64>,
}

impl AnimationClock {
    /// A clock that starts running at `now_ms`.
    pub fn started_at(now_ms: u64) -> Self {
        Self {
            banked_ms: 0,
            running_since: Some(now_ms),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.running_since.is_none()
    }

    /// Freeze the animation in place. No-op when already paused.
    pub fn pause(&mut self, now_ms: u64) {
        if let Some(since) = self.running_since.take() {
            self.banked_ms += now_ms.saturating_sub(since);
        }
    }

    /// Continue from where the animation was paused. No-op when running.
    pub fn resume(&mut self, now_ms: u64) {
        if self.running_since.is_none() {
            self.running_since = Some(now_ms);
        }
    }

    /// Total running time up to `now_ms`.
    pub fn active_ms(&self, now_ms: u64) -> u64 {
        self.banked_ms
            + self
                .running_since
                .map(|since| now_ms.saturating_sub(since))
                .unwrap_or(0)
    }
}

/// Angle in degrees, normalized to [0, 360), after `active_ms` of a linear
/// orbit that starts at `start_deg` and completes one turn per `period_sec`.
pub fn orbit_angle(start_deg: f32, period_sec: f32, reverse: bool, active_ms: u64) -> f32 {
    if period_sec <= 0.0 {
        return start_deg.rem_euclid(360.0);
    }
    let turns = (active_ms as f64 / 1000.0 / period_sec as f64).fract() as f32;
    let sweep = turns * 360.0;
    let angle = if reverse {
        start_deg - sweep
    } else {
        start_deg + sweep
    };
    angle.rem_euclid(360.0)
}

/// Screen offset (x right, y down) produced by
/// `rotate(angle) translateX(radius) rotate(-angle)`.
pub fn orbit_offset(radius_px: f32, angle_deg: f32) -> [f32; 2] {
    let rad = angle_deg.to_radians();
    [radius_px * rad.cos(), radius_px * rad.sin()]
}
