//! Image upload API endpoints.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::models::UploadResponse;
use crate::upload::{ImageFile, ImageTarget, UploadForm, BADGE_ICON, CLAN_EMBLEM};
use crate::AppState;

/// POST /api/admin/upload-badge-icon - Store a badge icon PNG.
pub async fn upload_badge_icon(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    handle_upload(&state, &BADGE_ICON, multipart).await
}

/// POST /api/admin/upload-clan-emblem - Store (or replace) a clan emblem PNG.
pub async fn upload_clan_emblem(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    handle_upload(&state, &CLAN_EMBLEM, multipart).await
}

async fn handle_upload(
    state: &AppState,
    target: &ImageTarget,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    // A body that is not multipart gets the same JSON envelope as other failures
    let multipart = multipart
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e.body_text())))?;
    let form = read_form(multipart, target.id_field).await?;

    let filename = match target
        .store(&state.config.upload_dir, &form, state.clock.as_ref())
        .await
    {
        Ok(filename) => filename,
        Err(e) => {
            tracing::warn!(kind = target.label, "Upload rejected: {}", e);
            return Err(e);
        }
    };

    tracing::info!(kind = target.label, filename = %filename, "Image uploaded");

    Ok(Json(UploadResponse {
        success: true,
        message: format!("{} uploaded successfully", target.label),
        filename,
    }))
}

/// Collect the `file` field and the identifier field; other fields are ignored.
async fn read_form(mut multipart: Multipart, id_field: &str) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;
            form.file = Some(ImageFile {
                content_type,
                bytes,
            });
        } else if name == id_field {
            let id = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read {}: {}", id_field, e)))?;
            form.id = Some(id);
        }
    }

    Ok(form)
}
