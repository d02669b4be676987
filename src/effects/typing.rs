//! Phrase-cycling typing effect.
//!
//! Types each phrase one character at a time, holds it, deletes it, then
//! moves on to the next phrase, forever. Each tick returns the delay before
//! the next one; the page runtime owns the timer.

use crate::config::TypingConfig;
use crate::dom::{Document, ElementId};
use crate::engine::scheduler::Scheduler;

/// Element id the effect writes into.
pub const TYPING_TARGET_ID: &str = "typing-text";

/// Timer task for the typing loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingState {
    pub phrase_index: usize,
    /// Characters of the current phrase on screen
    pub char_index: usize,
    pub is_deleting: bool,
    pub tick_delay_ms: u64,
}

/// Text to show after a tick and how long to wait before the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub delay_ms: u64,
}

#[derive(Debug, Clone)]
pub struct TypingEffect {
    target: ElementId,
    /// Phrases and their length in chars
    phrases: Vec<(String, usize)>,
    state: TypingState,
    config: TypingConfig,
}

impl TypingEffect {
    /// Returns `None` when there is no non-empty phrase to type.
    pub fn new(target: ElementId, config: TypingConfig) -> Option<Self> {
        let phrases: Vec<(String, usize)> = config
            .phrases
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| (p.clone(), p.chars().count()))
            .collect();
        if phrases.is_empty() {
            log::warn!("Typing effect has no phrases; not starting");
            return None;
        }
        Some(Self {
            target,
            phrases,
            state: TypingState {
                phrase_index: 0,
                char_index: 0,
                is_deleting: false,
                tick_delay_ms: config.type_delay_ms,
            },
            config,
        })
    }

    /// Bind to `#typing-text`, if the page has one.
    pub fn attach(doc: &Document, config: &TypingConfig) -> Option<Self> {
        let target = doc.get_element_by_id(TYPING_TARGET_ID)?;
        Self::new(target, config.clone())
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    pub fn current_phrase(&self) -> &str {
        &self.phrases[self.state.phrase_index].0
    }

    /// Advance the state machine by one character.
    pub fn tick(&mut self) -> TypingFrame {
        let (phrase, len) = &self.phrases[self.state.phrase_index];
        let len = *len;
        let s = &mut self.state;

        let shown = if s.is_deleting {
            s.char_index = s.char_index.saturating_sub(1);
            s.tick_delay_ms = self.config.delete_delay_ms;
            s.char_index
        } else {
            s.char_index = (s.char_index + 1).min(len);
            s.tick_delay_ms = self.config.type_delay_ms;
            s.char_index
        };
        let text: String = phrase.chars().take(shown).collect();

        if !s.is_deleting && s.char_index == len {
            s.is_deleting = true;
            s.tick_delay_ms = self.config.hold_delay_ms;
        } else if s.is_deleting && s.char_index == 0 {
            s.is_deleting = false;
            s.phrase_index = (s.phrase_index + 1) % self.phrases.len();
            s.tick_delay_ms = self.config.next_phrase_delay_ms;
        }

        TypingFrame {
            text,
            delay_ms: s.tick_delay_ms,
        }
    }

    /// Tick, write the text into the target and schedule the next tick.
    pub fn run_tick<T: From<TypingTick>>(&mut self, doc: &mut Document, scheduler: &mut Scheduler<T>) {
        let frame = self.tick();
        doc.element_mut(self.target).text = frame.text;
        scheduler.schedule(frame.delay_ms, TypingTick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect(phrases: &[&str]) -> TypingEffect {
        let mut doc = Document::new();
        let target = doc.create_element("span");
        let config = TypingConfig {
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            ..TypingConfig::default()
        };
        TypingEffect::new(target, config).unwrap()
    }

    #[test]
    fn types_holds_deletes_and_advances() {
        let mut fx = effect(&["ab", "c"]);
        let frames: Vec<TypingFrame> = (0..7).map(|_| fx.tick()).collect();
        let seen: Vec<(&str, u64)> = frames.iter().map(|f| (f.text.as_str(), f.delay_ms)).collect();
        assert_eq!(
            seen,
            vec![
                ("a", 100),
                ("ab", 2000),
                ("a", 50),
                ("", 500),
                ("c", 2000),
                ("", 500),
                ("a", 100),
            ]
        );
    }

    #[test]
    fn full_phrase_is_followed_by_deletion() {
        let mut fx = effect(&["Web Developer", "Front-End"]);
        for _ in 0..200 {
            let before = fx.state();
            let frame = fx.tick();
            if frame.text == fx.phrases[before.phrase_index].0 {
                let next = fx.tick();
                assert!(next.text.chars().count() < frame.text.chars().count());
            }
        }
    }

    #[test]
    fn text_is_always_a_prefix_of_current_phrase() {
        let phrases = ["Problem Solver", "AI", "Innovator"];
        let mut fx = effect(&phrases);
        for _ in 0..500 {
            let idx = fx.state().phrase_index;
            let frame = fx.tick();
            assert!(phrases[idx].starts_with(&frame.text));
            let s = fx.state();
            assert!(s.char_index <= fx.phrases[s.phrase_index].1);
        }
    }

    #[test]
    fn every_phrase_shown_before_any_repeats() {
        let phrases = ["one", "two", "three", "two"];
        let mut fx = effect(&phrases);
        let mut full = Vec::new();
        while full.len() < phrases.len() {
            let idx = fx.state().phrase_index;
            let frame = fx.tick();
            if frame.text == phrases[idx] {
                full.push(idx);
            }
        }
        assert_eq!(full, vec![0, 1, 2, 3]);
    }

    #[test]
    fn single_char_phrase_has_no_special_case() {
        let mut fx = effect(&["x"]);
        assert_eq!(fx.tick(), TypingFrame { text: "x".into(), delay_ms: 2000 });
        assert_eq!(fx.tick(), TypingFrame { text: "".into(), delay_ms: 500 });
        assert_eq!(fx.tick(), TypingFrame { text: "x".into(), delay_ms: 2000 });
    }

    #[test]
    fn counts_chars_not_bytes() {
        let mut fx = effect(&["Привет"]);
        let mut last = String::new();
        for _ in 0..6 {
            last = fx.tick().text;
        }
        assert_eq!(last, "Привет");
        assert!(fx.state().is_deleting);
    }

    #[test]
    fn no_phrases_means_no_effect() {
        let mut doc = Document::new();
        let target = doc.create_element("span");
        let config = TypingConfig {
            phrases: vec![String::new()],
            ..TypingConfig::default()
        };
        assert!(TypingEffect::new(target, config).is_none());
    }

    #[test]
    fn run_tick_writes_text_and_reschedules() {
        let mut doc = Document::new();
        let target = doc.create_element("span");
        let config = TypingConfig {
            phrases: vec!["hi".into()],
            ..TypingConfig::default()
        };
        let mut fx = TypingEffect::new(target, config).unwrap();
        let mut sched: Scheduler<TypingTick> = Scheduler::new();
        fx.run_tick(&mut doc, &mut sched);
        assert_eq!(doc.element(target).text, "h");
        assert_eq!(sched.next_due(), Some(100));
    }
}
