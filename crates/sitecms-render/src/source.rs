use {
    anyhow::{Context, Result},
    async_trait::async_trait,
    serde_json::Value,
    sitecms_common::utils::cache_buster,
    sitecms_store::DocumentStore,
    std::sync::Arc,
};

/// Where the renderer gets its JSON documents from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<Value>;
}

/// Which URL shape an [`HttpSource`] requests documents from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endpoint {
    /// The store read endpoint, `{base}/api/get?file={name}`
    #[default]
    Api,
    /// Deployed static files, `{base}/{name}`
    StaticFiles,
}

/// Fetches documents from a running site over HTTP. Every request carries a
/// `t` query parameter so intermediate caches never answer it.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    endpoint: Endpoint,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, endpoint: Endpoint) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, endpoint)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>, endpoint: Endpoint) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            endpoint,
        }
    }

    fn request(&self, name: &str) -> reqwest::RequestBuilder {
        let t = cache_buster();
        match self.endpoint {
            Endpoint::Api => self
                .client
                .get(format!("{}/api/get", self.base_url))
                .query(&[("file", name), ("t", t.as_str())]),
            Endpoint::StaticFiles => self
                .client
                .get(format!("{}/{}", self.base_url, name))
                .query(&[("t", t.as_str())]),
        }
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, name: &str) -> Result<Value> {
        let response = self
            .request(name)
            .send()
            .await
            .with_context(|| format!("Failed to request {}", name))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Fetching {} returned {}", name, status);
        }

        response
            .json::<Value>()
            .await
            .with_context(|| format!("Invalid JSON in {}", name))
    }
}

/// Reads documents straight from a store, for rendering inside the server.
#[derive(Clone)]
pub struct StoreSource {
    store: Arc<dyn DocumentStore>,
}

impl StoreSource {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DocumentSource for StoreSource {
    async fn fetch(&self, name: &str) -> Result<Value> {
        Ok(self.store.get(name).await?)
    }
}
