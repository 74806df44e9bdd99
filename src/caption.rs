use crate::{
    domain::CaptionApi,
    errors::{AppError, CaptionError},
    models::{CaptionResult, TextBox},
};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{self, info};

/// Captioning client for the imgflip-style HTTP API.
///
/// One outbound call per `caption` invocation, form-encoded, bounded by the
/// configured timeout. Retry policy, if any, belongs to the caller.
#[derive(Debug, Clone)]
pub struct ImgflipClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

/// Wire shape of the `caption_image` response.
#[derive(Deserialize, Debug)]
struct CaptionResponse {
    success: bool,
    data: Option<CaptionData>,
    error_message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CaptionData {
    url: String,
}

impl ImgflipClient {
    pub fn new(
        base_url: String,
        username: String,
        password: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        info!(%base_url, ?timeout, "Initializing ImgflipClient");
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InitError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            username,
            password,
        })
    }

    /// Builds the form payload the API expects: credentials, template id,
    /// and one `boxes[i][text]` entry per box, sized to the input.
    fn caption_form(&self, template_id: &str, boxes: &[TextBox]) -> Vec<(String, String)> {
        let mut form = vec![
            ("template_id".to_string(), template_id.to_string()),
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ];
        for (i, text_box) in boxes.iter().enumerate() {
            form.push((format!("boxes[{}][text]", i), text_box.text.clone()));
        }
        form
    }
}

#[async_trait]
impl CaptionApi for ImgflipClient {
    async fn caption(
        &self,
        template_id: &str,
        boxes: &[TextBox],
    ) -> Result<CaptionResult, CaptionError> {
        let url = format!("{}/caption_image", self.base_url);
        tracing::debug!(%template_id, box_count = boxes.len(), "Calling captioning API");

        let response = self
            .http
            .post(&url)
            .form(&self.caption_form(template_id, boxes))
            .send()
            .await
            .map_err(CaptionError::Transport)?;

        // Non-JSON bodies and shape violations are protocol faults, not
        // transport faults: the service answered, just not usefully.
        let parsed: CaptionResponse = response
            .json()
            .await
            .map_err(|e| CaptionError::Protocol(e.to_string()))?;

        if parsed.success {
            let url = parsed
                .data
                .map(|d| d.url)
                .ok_or_else(|| {
                    CaptionError::Protocol("success response missing data.url".to_string())
                })?;
            tracing::debug!(image_url = %url, "Captioning succeeded");
            Ok(CaptionResult::Success { image_url: url })
        } else {
            let message = parsed
                .error_message
                .unwrap_or_else(|| "captioning rejected without a reason".to_string());
            tracing::warn!(%template_id, error_message = %message, "Captioning API rejected the request");
            Ok(CaptionResult::Failure {
                error_message: message,
            })
        }
    }

    async fn best_meme(&self) -> Result<serde_json::Value, CaptionError> {
        let url = format!("{}/get_memes", self.base_url);
        tracing::debug!("Fetching template catalog");

        let catalog: serde_json::Value = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(CaptionError::Transport)?
            .json()
            .await
            .map_err(|e| CaptionError::Protocol(e.to_string()))?;

        // Pass the first catalog entry through untouched.
        catalog
            .pointer("/data/memes/0")
            .cloned()
            .ok_or_else(|| {
                CaptionError::Protocol("catalog response missing data.memes[0]".to_string())
            })
    }
}
