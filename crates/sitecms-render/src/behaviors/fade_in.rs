use super::{Behavior, Effect, UiEvent};
use crate::document::Document;
use crate::template::SECTION_CLASS;

const HIDDEN_CLASS: &str = "fade-in";
const VISIBLE_CLASS: &str = "visible";

/// Sections start faded out and become visible the first time enough of them
/// intersects the viewport.
pub struct FadeIn {
    threshold: f64,
    observed: Vec<String>,
    attached: bool,
}

impl Default for FadeIn {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl FadeIn {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            observed: Vec::new(),
            attached: false,
        }
    }

    pub fn observed(&self) -> &[String] {
        &self.observed
    }
}

impl Behavior for FadeIn {
    fn name(&self) -> &'static str {
        "fade-in"
    }

    fn attach(&mut self, document: &mut Document) -> bool {
        if self.attached {
            return true;
        }
        let sections = document.ids_with_class(SECTION_CLASS);
        if sections.is_empty() {
            return false;
        }
        for id in &sections {
            if let Some(section) = document.element_mut(id) {
                section.add_class(HIDDEN_CLASS);
            }
        }
        self.observed = sections;
        self.attached = true;
        true
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn handle(&mut self, event: &UiEvent, document: &mut Document) -> Vec<Effect> {
        if let UiEvent::Intersect { id, ratio } = event {
            if *ratio >= self.threshold && self.observed.iter().any(|o| o == id) {
                if let Some(section) = document.element_mut(id) {
                    section.add_class(VISIBLE_CLASS);
                }
            }
        }
        Vec::new()
    }

    fn detach(&mut self, document: &mut Document) {
        if !self.attached {
            return;
        }
        for id in self.observed.drain(..) {
            if let Some(section) = document.element_mut(&id) {
                section.remove_class(HIDDEN_CLASS);
            }
        }
        self.attached = false;
    }
}
