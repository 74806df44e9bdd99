use crate::{
    AppState,
    errors::AppError,
    mapper,
    models::{CaptionResult, MemeRecord, UploadRequest, UploadResponse},
};
use axum::{
    Json,
    extract::{FromRequest, Request, State},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing;

/// JSON body extractor whose rejections stay inside the error taxonomy.
///
/// Axum's default `Json` rejection answers with a plain-text body; routing
/// it through `AppError::Validation` keeps the uniform
/// `{success, error_message}` shape for malformed or incomplete bodies.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Handler for `POST /upload`.
///
/// Validate, map boxes, caption, persist on success, respond. Each request
/// flows through exactly once; every failure is converted to an `AppError`
/// at this boundary rather than escaping the handler.
pub async fn upload_meme(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<UploadRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.template_id.trim().is_empty() {
        return Err(AppError::Validation("template_id must not be empty".to_string()));
    }
    // Validation failures short-circuit before any outbound call.
    let boxes = mapper::boxes_from_texts(&payload.meme_texts)?;

    tracing::debug!(template_id = %payload.template_id, user = %payload.user, photo_url = ?payload.photo_url, "Captioning meme via handler");
    let result = state.captioner.caption(&payload.template_id, &boxes).await?;

    match result {
        CaptionResult::Success { image_url } => {
            let record = MemeRecord::new(payload.template_id, image_url.clone(), payload.user);
            let meme_id = state.meme_repo.save(&record).await?;
            tracing::info!(%meme_id, image_url = %image_url, "Meme created successfully via handler");
            Ok(Json(UploadResponse { success: true, image_url }))
        }
        CaptionResult::Failure { error_message } => {
            // API-supplied rejection: nothing is persisted.
            Err(AppError::CaptionRejected(error_message))
        }
    }
}

/// Handler for `GET /getmemes`.
pub async fn get_memes(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!("Listing all memes via handler");
    let memes = state.meme_repo.list_all().await?;
    tracing::info!("Handler successfully retrieved {} memes", memes.len());
    Ok(Json(memes))
}

/// Handler for `GET /bestmeme`: first entry of the external template
/// catalog, passed through without local validation.
pub async fn best_meme(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!("Fetching best meme via handler");
    let best = state.captioner.best_meme().await?;
    Ok(Json(best))
}
