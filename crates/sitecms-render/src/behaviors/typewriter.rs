use std::time::Duration;

use super::{Behavior, Effect, UiEvent};
use crate::document::Document;
use crate::template::{DATA_TEXT_ATTR, HERO_TITLE_ID};

/// Reveals the hero heading one character at a time.
pub struct Typewriter {
    target: String,
    start_delay: Duration,
    interval: Duration,
    full_text: Vec<char>,
    shown: usize,
    attached: bool,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(HERO_TITLE_ID, Duration::from_millis(500), Duration::from_millis(150))
    }
}

impl Typewriter {
    pub fn new(target: impl Into<String>, start_delay: Duration, interval: Duration) -> Self {
        Self {
            target: target.into(),
            start_delay,
            interval,
            full_text: Vec::new(),
            shown: 0,
            attached: false,
        }
    }

    /// Characters visible `elapsed` after attaching.
    pub fn visible_chars(&self, elapsed: Duration) -> usize {
        if elapsed < self.start_delay || self.full_text.is_empty() {
            return 0;
        }
        let since_start = (elapsed - self.start_delay).as_millis();
        let steps = since_start / self.interval.as_millis().max(1);
        let count = usize::try_from(steps).unwrap_or(usize::MAX).saturating_add(1);
        count.min(self.full_text.len())
    }

    pub fn is_finished(&self) -> bool {
        self.attached && self.shown == self.full_text.len()
    }
}

impl Behavior for Typewriter {
    fn name(&self) -> &'static str {
        "typewriter"
    }

    fn attach(&mut self, document: &mut Document) -> bool {
        if self.attached {
            return true;
        }
        let Some(element) = document.element_mut(&self.target) else {
            return false;
        };

        let text = element
            .attrs
            .get(DATA_TEXT_ATTR)
            .cloned()
            .unwrap_or_else(|| element.text.clone());
        self.full_text = text.chars().collect();
        self.shown = 0;
        element.text.clear();
        self.attached = true;
        true
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn handle(&mut self, event: &UiEvent, document: &mut Document) -> Vec<Effect> {
        let UiEvent::Tick { elapsed } = event else {
            return Vec::new();
        };

        let count = self.visible_chars(*elapsed);
        if count > self.shown {
            if let Some(element) = document.element_mut(&self.target) {
                element.text = self.full_text[..count].iter().collect();
                self.shown = count;
            }
        }
        Vec::new()
    }

    fn detach(&mut self, document: &mut Document) {
        if !self.attached {
            return;
        }
        if let Some(element) = document.element_mut(&self.target) {
            element.text = self.full_text.iter().collect();
        }
        self.attached = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Element, Markup};

    fn heading(text: &str) -> Document {
        let mut markup = Markup::default();
        let node = markup.register(
            HERO_TITLE_ID,
            Element::new("h1").attr(DATA_TEXT_ATTR, text).text(text),
        );
        markup.push(node);
        let mut doc = Document::default();
        doc.set_body(markup);
        doc
    }

    fn text_of(doc: &Document) -> &str {
        &doc.element(HERO_TITLE_ID).unwrap().text
    }

    fn tick(ms: u64) -> UiEvent {
        UiEvent::Tick { elapsed: Duration::from_millis(ms) }
    }

    #[test]
    fn test_reveals_on_schedule() {
        let mut doc = heading("Héllo");
        let mut writer = Typewriter::default();
        assert!(writer.attach(&mut doc));
        assert_eq!(text_of(&doc), "");

        writer.handle(&tick(499), &mut doc);
        assert_eq!(text_of(&doc), "");

        writer.handle(&tick(500), &mut doc);
        assert_eq!(text_of(&doc), "H");

        writer.handle(&tick(800), &mut doc);
        assert_eq!(text_of(&doc), "Hél");
        assert!(!writer.is_finished());

        writer.handle(&tick(10_000), &mut doc);
        assert_eq!(text_of(&doc), "Héllo");
        assert!(writer.is_finished());
    }

    #[test]
    fn test_late_tick_never_hides_text() {
        let mut doc = heading("Acme");
        let mut writer = Typewriter::default();
        writer.attach(&mut doc);

        writer.handle(&tick(1_000), &mut doc);
        writer.handle(&tick(600), &mut doc);
        assert_eq!(text_of(&doc), "Acme");
    }

    #[test]
    fn test_attach_is_idempotent_and_detach_restores() {
        let mut doc = heading("Acme");
        let mut writer = Typewriter::default();
        writer.attach(&mut doc);
        writer.handle(&tick(650), &mut doc);
        assert!(writer.attach(&mut doc));
        assert_eq!(text_of(&doc), "Ac");

        writer.detach(&mut doc);
        assert_eq!(text_of(&doc), "Acme");
        writer.detach(&mut doc);
        assert!(!writer.is_attached());
    }

    #[test]
    fn test_missing_heading() {
        let mut doc = Document::default();
        let mut writer = Typewriter::default();
        assert!(!writer.attach(&mut doc));
    }
}
