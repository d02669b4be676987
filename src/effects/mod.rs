//! Decorative page effects
//!
//! - `typing` — phrase-cycling typing text in the hero
//! - `orbit`  — randomized looping orbits for decorative elements
//! - `reveal` — one-shot entrance transitions on first visibility

pub mod orbit;
pub mod reveal;
pub mod typing;
