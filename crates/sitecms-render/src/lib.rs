//! This is the sitecms-render crate - fetches the site documents and renders
//! the public page, its SEO metadata and its interactive behaviors.

pub mod behaviors;
pub mod document;
pub mod fields;
pub mod renderer;
pub mod seo;
pub mod source;
pub mod template;

pub use behaviors::{Behavior, BehaviorSet, Effect, UiEvent};
pub use document::{Document, Element, Markup, MetaAttr, Node};
pub use renderer::{RenderOutcome, RenderedPage, Renderer, RendererConfig, ERROR_MARKUP};
pub use seo::update_seo;
pub use source::{DocumentSource, Endpoint, HttpSource, StoreSource};
pub use template::render_template;
