use super::{Behavior, Effect, UiEvent};
use crate::document::Document;
use crate::template::NAV_LINKS_ID;

/// In-page anchors scroll smoothly to their target and close the mobile menu.
#[derive(Default)]
pub struct SmoothScroll {
    attached: bool,
}

impl Behavior for SmoothScroll {
    fn name(&self) -> &'static str {
        "smooth-scroll"
    }

    fn attach(&mut self, _document: &mut Document) -> bool {
        self.attached = true;
        true
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn handle(&mut self, event: &UiEvent, document: &mut Document) -> Vec<Effect> {
        let UiEvent::AnchorClick { href } = event else {
            return Vec::new();
        };
        // A bare "#" is used by toggles and must keep its default action
        let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
            return Vec::new();
        };

        let mut effects = vec![Effect::PreventDefault];
        if document.element(id).is_some() {
            effects.push(Effect::ScrollIntoView { id: id.to_string() });
            if let Some(nav) = document.element_mut(NAV_LINKS_ID) {
                nav.remove_class("active");
            }
        }
        effects
    }

    fn detach(&mut self, _document: &mut Document) {
        self.attached = false;
    }
}
