use crate::errors::{CaptionError, RepoError};
use crate::models::{CaptionResult, MemeRecord, TextBox};
use async_trait::async_trait;
use uuid::Uuid;

/// Trait defining operations for storing and retrieving meme records.
#[async_trait]
pub trait MemeRepository: Send + Sync + 'static { // Send+Sync+'static required for Arc<dyn>
    /// Inserts one record. Records are immutable once written.
    async fn save(&self, record: &MemeRecord) -> Result<Uuid, RepoError>;

    /// Lists every stored record in insertion order. An empty store
    /// yields an empty vec, not an error.
    /// WARNING: This can be inefficient on large datasets. Consider pagination.
    async fn list_all(&self) -> Result<Vec<MemeRecord>, RepoError>;
}

/// Trait defining the outbound captioning API surface.
#[async_trait]
pub trait CaptionApi: Send + Sync + 'static {
    /// Performs a single captioning call. A well-formed API answer maps to
    /// `CaptionResult`; transport and protocol faults are `CaptionError`.
    /// Never retried by the implementation.
    async fn caption(
        &self,
        template_id: &str,
        boxes: &[TextBox],
    ) -> Result<CaptionResult, CaptionError>;

    /// Fetches the first entry of the API's template catalog, as-is.
    async fn best_meme(&self) -> Result<serde_json::Value, CaptionError>;
}
