use super::{Behavior, Effect, UiEvent};
use crate::document::Document;
use crate::template::SCROLL_TO_TOP_ID;

const VISIBLE_CLASS: &str = "visible";

/// Button shown once the page is scrolled past a threshold; clicking it
/// scrolls back to the top.
pub struct ScrollToTop {
    threshold: f64,
    attached: bool,
}

impl Default for ScrollToTop {
    fn default() -> Self {
        Self::new(300.0)
    }
}

impl ScrollToTop {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            attached: false,
        }
    }
}

impl Behavior for ScrollToTop {
    fn name(&self) -> &'static str {
        "scroll-to-top"
    }

    fn attach(&mut self, document: &mut Document) -> bool {
        if !self.attached {
            self.attached = document.element(SCROLL_TO_TOP_ID).is_some();
        }
        self.attached
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn handle(&mut self, event: &UiEvent, document: &mut Document) -> Vec<Effect> {
        match event {
            UiEvent::Scroll { y } => {
                if let Some(button) = document.element_mut(SCROLL_TO_TOP_ID) {
                    if *y > self.threshold {
                        button.add_class(VISIBLE_CLASS);
                    } else {
                        button.remove_class(VISIBLE_CLASS);
                    }
                }
                Vec::new()
            }
            UiEvent::Click { target } if target == SCROLL_TO_TOP_ID => {
                vec![Effect::ScrollTo { top: 0.0 }]
            }
            _ => Vec::new(),
        }
    }

    fn detach(&mut self, document: &mut Document) {
        if self.attached {
            if let Some(button) = document.element_mut(SCROLL_TO_TOP_ID) {
                button.remove_class(VISIBLE_CLASS);
            }
            self.attached = false;
        }
    }
}
