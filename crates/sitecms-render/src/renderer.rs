use {
    crate::{
        behaviors::{BehaviorSet, Effect, UiEvent},
        document::{Document, Element, Markup},
        seo::update_seo,
        source::DocumentSource,
        template::render_template,
    },
    serde::{Deserialize, Serialize},
    serde_json::Value,
    std::sync::Arc,
    tracing::{debug, error, info, warn},
};

/// Markup shown in place of the page when the site config cannot be loaded.
pub const ERROR_MARKUP: &str = r#"<div class="error">Error loading content. Check console.</div>"#;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RendererConfig {
    /// Value of the `lang` attribute set on the rendered page
    pub lang: String,
    pub config_document: String,
    pub seo_document: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            lang: "fr".to_string(),
            config_document: "config.json".to_string(),
            seo_document: "seo.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    /// The site config was unavailable and the error state was shown
    Failed,
}

/// A rendered page together with the behaviors bound to it.
pub struct RenderedPage {
    pub document: Document,
    pub outcome: RenderOutcome,
    pub unregistered_workers: usize,
    behaviors: BehaviorSet,
}

impl RenderedPage {
    pub fn behaviors(&self) -> Vec<&'static str> {
        self.behaviors.attached()
    }

    /// Feed a UI event to the page and collect what the host should do.
    pub fn dispatch(&mut self, event: &UiEvent) -> Vec<Effect> {
        self.behaviors.dispatch(event, &mut self.document)
    }

    pub fn detach(&mut self) {
        self.behaviors.detach_all(&mut self.document);
    }

    pub fn to_html(&self) -> String {
        self.document.to_html()
    }
}

pub struct Renderer {
    source: Arc<dyn DocumentSource>,
    config: RendererConfig,
}

impl Renderer {
    pub fn new(source: Arc<dyn DocumentSource>, config: RendererConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Site config, or `None` when it could not be fetched.
    pub async fn load_config(&self) -> Option<Value> {
        let name = &self.config.config_document;
        match self.source.fetch(name).await {
            Ok(Value::Null) => None,
            Ok(config) => Some(config),
            Err(e) => {
                error!(file = %name, "Error loading config: {:#}", e);
                None
            }
        }
    }

    /// SEO metadata, or `None` when it could not be fetched.
    pub async fn load_seo(&self) -> Option<Value> {
        let name = &self.config.seo_document;
        match self.source.fetch(name).await {
            Ok(Value::Null) => None,
            Ok(seo) => Some(seo),
            Err(e) => {
                warn!(file = %name, "Error loading SEO data: {:#}", e);
                None
            }
        }
    }

    pub async fn render(&self, document: Document) -> RenderedPage {
        self.render_with(document, BehaviorSet::standard()).await
    }

    pub async fn render_with(&self, mut document: Document, mut behaviors: BehaviorSet) -> RenderedPage {
        let (config, seo) = tokio::join!(self.load_config(), self.load_seo());

        let Some(config) = config else {
            let mut markup = Markup::default();
            markup.push(Element::new("div").class("error").text("Error loading content. Check console.").into());
            document.set_body(markup);
            return RenderedPage {
                document,
                outcome: RenderOutcome::Failed,
                unregistered_workers: 0,
                behaviors,
            };
        };

        if let Some(seo) = &seo {
            update_seo(&mut document, seo, Some(&config));
        }

        let unregistered_workers = document.unregister_service_workers();
        if unregistered_workers > 0 {
            info!(count = unregistered_workers, "Unregistered service workers");
        }

        document.set_body(render_template(&config["text"], &config));
        document.lang = self.config.lang.clone();

        let attached = behaviors.attach_all(&mut document);
        debug!(?attached, "Page rendered");

        RenderedPage {
            document,
            outcome: RenderOutcome::Rendered,
            unregistered_workers,
            behaviors,
        }
    }
}
