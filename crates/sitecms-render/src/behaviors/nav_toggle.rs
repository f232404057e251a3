use super::{Behavior, Effect, UiEvent};
use crate::document::Document;
use crate::template::{MOBILE_TOGGLE_ID, NAV_LINKS_ID};

const OPEN_CLASS: &str = "active";

/// Mobile menu button opening and closing the navigation links.
#[derive(Default)]
pub struct NavToggle {
    attached: bool,
}

impl Behavior for NavToggle {
    fn name(&self) -> &'static str {
        "nav-toggle"
    }

    fn attach(&mut self, document: &mut Document) -> bool {
        if !self.attached {
            self.attached = document.element(MOBILE_TOGGLE_ID).is_some()
                && document.element(NAV_LINKS_ID).is_some();
        }
        self.attached
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn handle(&mut self, event: &UiEvent, document: &mut Document) -> Vec<Effect> {
        if let UiEvent::Click { target } = event {
            if target == MOBILE_TOGGLE_ID {
                if let Some(nav) = document.element_mut(NAV_LINKS_ID) {
                    nav.toggle_class(OPEN_CLASS);
                }
            }
        }
        Vec::new()
    }

    fn detach(&mut self, document: &mut Document) {
        if self.attached {
            if let Some(nav) = document.element_mut(NAV_LINKS_ID) {
                nav.remove_class(OPEN_CLASS);
            }
            self.attached = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Element, Markup};

    fn page(with_toggle: bool) -> Document {
        let mut markup = Markup::default();
        let nav = markup.register(NAV_LINKS_ID, Element::new("ul"));
        markup.push(nav);
        if with_toggle {
            let toggle = markup.register(MOBILE_TOGGLE_ID, Element::new("button"));
            markup.push(toggle);
        }
        let mut doc = Document::default();
        doc.set_body(markup);
        doc
    }

    fn is_open(doc: &Document) -> bool {
        doc.element(NAV_LINKS_ID).unwrap().has_class(OPEN_CLASS)
    }

    #[test]
    fn test_toggle() {
        let mut doc = page(true);
        let mut toggle = NavToggle::default();
        assert!(toggle.attach(&mut doc));

        let click = UiEvent::Click { target: MOBILE_TOGGLE_ID.to_string() };
        toggle.handle(&click, &mut doc);
        assert!(is_open(&doc));

        toggle.handle(&UiEvent::Click { target: "elsewhere".into() }, &mut doc);
        assert!(is_open(&doc));

        toggle.handle(&click, &mut doc);
        assert!(!is_open(&doc));

        toggle.handle(&click, &mut doc);
        toggle.detach(&mut doc);
        assert!(!is_open(&doc));
    }

    #[test]
    fn test_needs_both_elements() {
        let mut doc = page(false);
        assert!(!NavToggle::default().attach(&mut doc));
    }
}
