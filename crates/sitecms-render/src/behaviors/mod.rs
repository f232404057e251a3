//! Page interactivity as small event-driven modules.
//!
//! Each behavior is attached to a rendered [`Document`], receives explicit
//! [`UiEvent`]s and answers with the [`Effect`]s the host should perform.
//! Attaching or detaching twice is a no-op.

mod fade_in;
mod nav_toggle;
mod scroll_top;
mod smooth_scroll;
mod typewriter;

pub use fade_in::FadeIn;
pub use nav_toggle::NavToggle;
pub use scroll_top::ScrollToTop;
pub use smooth_scroll::SmoothScroll;
pub use typewriter::Typewriter;

use std::time::Duration;

use crate::document::Document;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Window scrolled to this vertical offset
    Scroll { y: f64 },
    /// Click on the element with this id
    Click { target: String },
    /// Click on an in-page anchor (`href` starting with `#`)
    AnchorClick { href: String },
    /// Intersection ratio of the element with this id changed
    Intersect { id: String, ratio: f64 },
    /// Time elapsed since the page was rendered
    Tick { elapsed: Duration },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PreventDefault,
    /// Smooth scroll of the window to this offset
    ScrollTo { top: f64 },
    /// Smooth scroll bringing the element into view
    ScrollIntoView { id: String },
}

pub trait Behavior: Send {
    fn name(&self) -> &'static str;

    /// Bind to the document. Returns false when the elements it needs are absent.
    fn attach(&mut self, document: &mut Document) -> bool;

    fn is_attached(&self) -> bool;

    fn handle(&mut self, event: &UiEvent, document: &mut Document) -> Vec<Effect>;

    /// Undo whatever `attach` changed in the document.
    fn detach(&mut self, document: &mut Document);
}

/// The behaviors of one rendered page.
pub struct BehaviorSet {
    behaviors: Vec<Box<dyn Behavior>>,
}

impl Default for BehaviorSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl BehaviorSet {
    pub fn new(behaviors: Vec<Box<dyn Behavior>>) -> Self {
        Self { behaviors }
    }

    /// Typewriter heading, scroll-to-top, smooth scrolling, mobile nav and
    /// fade-in sections.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(Typewriter::default()),
            Box::new(ScrollToTop::default()),
            Box::new(SmoothScroll::default()),
            Box::new(NavToggle::default()),
            Box::new(FadeIn::default()),
        ])
    }

    /// Attach every behavior, returning the names of those that bound.
    pub fn attach_all(&mut self, document: &mut Document) -> Vec<&'static str> {
        self.behaviors
            .iter_mut()
            .filter_map(|b| b.attach(document).then(|| b.name()))
            .collect()
    }

    pub fn attached(&self) -> Vec<&'static str> {
        self.behaviors
            .iter()
            .filter(|b| b.is_attached())
            .map(|b| b.name())
            .collect()
    }

    pub fn dispatch(&mut self, event: &UiEvent, document: &mut Document) -> Vec<Effect> {
        let mut effects = Vec::new();
        for behavior in self.behaviors.iter_mut().filter(|b| b.is_attached()) {
            effects.extend(behavior.handle(event, document));
        }
        effects
    }

    pub fn detach_all(&mut self, document: &mut Document) {
        for behavior in &mut self.behaviors {
            behavior.detach(document);
        }
    }
}
