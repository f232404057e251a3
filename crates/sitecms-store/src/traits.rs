use {
    crate::SaveReport,
    async_trait::async_trait,
    serde_json::Value,
    sitecms_common::Result,
};

/// Read/replace access to the allow-listed site documents.
/// The HTTP layer and the renderer depend on this seam rather than on the
/// concrete file-backed store.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Whether `name` is on the allow-list
    fn is_allowed(&self, name: &str) -> bool;

    /// Read and parse the primary copy of a document
    async fn get(&self, name: &str) -> Result<Value>;

    /// Replace a document, backing up and mirroring on a best-effort basis
    async fn save(&self, name: &str, document: &Value) -> Result<SaveReport>;
}
