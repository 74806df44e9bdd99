use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /upload`. Field names follow the public wire format.
#[derive(Deserialize, Debug, Clone)]
pub struct UploadRequest {
    pub template_id: String,
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
    #[serde(rename = "memeTexts")]
    pub meme_texts: Vec<String>,
    pub user: String,
}

/// A persisted meme. Created exactly once after a successful captioning
/// call; never updated afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MemeRecord {
    pub meme_id: Uuid,
    pub template_id: String,
    pub image_url: String,
    pub user: String,
    pub created_at: DateTime<Utc>,
}

impl MemeRecord {
    /// Builds a new record with a fresh id and the current timestamp.
    pub fn new(template_id: String, image_url: String, user: String) -> Self {
        Self {
            meme_id: Uuid::new_v4(),
            template_id,
            image_url,
            user,
            created_at: Utc::now(),
        }
    }
}

/// One positioned text field overlaid on a meme template.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TextBox {
    pub text: String,
}

/// Outcome of one captioning call. A well-formed API response always maps
/// to one of these; transport and protocol failures are errors instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionResult {
    Success { image_url: String },
    Failure { error_message: String },
}

/// Body of a successful `POST /upload` response.
#[derive(Serialize, Debug)]
pub struct UploadResponse {
    pub success: bool,
    pub image_url: String,
}
