use {
    crate::{endpoints, health::HealthService},
    anyhow::Context,
    axum::{
        http::{header, Method},
        routing::{get, post},
        Router,
    },
    sitecms_common::CmsConfig,
    sitecms_render::RendererConfig,
    sitecms_store::{ConfigStore, DocumentStore},
    std::{future::Future, sync::Arc, time::Instant},
    tokio::net::TcpListener,
    tower_http::{
        cors::{Any, CorsLayer},
        services::{ServeDir, ServeFile},
        trace::TraceLayer,
    },
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub health: Arc<HealthService>,
    pub start_time: Instant,
    pub service_name: String,
    pub version: String,
    pub admin_path: String,
    /// Used by the preview route
    pub renderer: RendererConfig,
}

pub struct ApiServer {
    config: CmsConfig,
    health_service: Arc<HealthService>,
    state: AppState,
}

impl ApiServer {
    /// Create a server backed by the file store described by `config`.
    pub fn new(config: CmsConfig) -> anyhow::Result<Self> {
        config.validate().context("Invalid configuration")?;
        let store = ConfigStore::new(config.store.clone()).context("Failed to open document store")?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    pub fn with_store(config: CmsConfig, store: Arc<dyn DocumentStore>) -> Self {
        let health_service = Arc::new(HealthService::new());

        let state = AppState {
            store,
            health: health_service.clone(),
            start_time: Instant::now(),
            service_name: config.server.service_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            admin_path: config.server.admin_path.clone(),
            renderer: RendererConfig::default(),
        };

        Self {
            config,
            health_service,
            state,
        }
    }

    pub fn config(&self) -> &CmsConfig {
        &self.config
    }

    pub async fn register_default_checks(&self) {
        self.health_service.register_store_checks(&self.config.store).await;
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn start<F>(&self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.server.bind_addr;
        let listener = TcpListener::bind(bind_addr)
            .await
            .with_context(|| format!("Failed to bind {}", bind_addr))?;
        self.serve(listener, shutdown).await
    }

    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(
            "Starting {} on {} (admin at {})",
            self.config.server.service_name,
            listener.local_addr()?,
            self.config.server.admin_path
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }

    pub fn router(&self) -> Router {
        let server = &self.config.server;

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_origin(Any);

        Router::new()
            .route("/api/get", get(endpoints::get_file))
            .route("/api/save", post(endpoints::save_file))
            .route("/health", get(endpoints::health_handler))
            .route("/status", get(endpoints::status_handler))
            .route_service(&server.admin_path, ServeFile::new(server.admin_entry_page()))
            .route(&server.preview_path(), get(endpoints::preview))
            .nest_service("/cms-assets", ServeDir::new(&server.admin_ui_root))
            .fallback_service(ServeDir::new(&self.config.store.primary_root))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }
}
