use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::uploads::UploadedImage,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

/// The `image` field of an upload, read out of the multipart body.
#[derive(Debug)]
pub struct IncomingImage {
    pub original_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

pub fn is_allowed_mime(mime: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime.trim().to_ascii_lowercase().as_str())
}

fn extension_for(mime: &str) -> Option<&'static str> {
    match mime.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

/// `<millis>-<uuid>.<ext>` with the extension taken from the accepted MIME
/// type. The client's file name never reaches the disk.
pub fn stored_file_name(mime_type: &str, millis: i64, id: Uuid) -> String {
    let ext = extension_for(mime_type).unwrap_or("jpg");
    format!("{millis}-{id}.{ext}")
}

pub async fn save_image(
    state: &AppState,
    user: &AuthUser,
    image: Option<IncomingImage>,
) -> AppResult<ApiResponse<UploadedImage>> {
    ensure_admin(user)?;
    let image = image.ok_or_else(|| AppError::bad_request("image file required"))?;

    if !is_allowed_mime(&image.mime_type) {
        return Err(AppError::bad_request(format!(
            "unsupported image type: {}",
            image.mime_type
        )));
    }
    if image.bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::bad_request("image exceeds 5 MiB"));
    }

    let dir = &state.config.uploads_dir;
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("create {}: {e}", dir.display())))?;

    let filename = stored_file_name(&image.mime_type, Utc::now().timestamp_millis(), Uuid::new_v4());
    tokio::fs::write(dir.join(&filename), &image.bytes)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("write {filename}: {e}")))?;

    tracing::info!(%filename, size = image.bytes.len(), admin = %user.username, "image uploaded");

    Ok(ApiResponse::success(
        "Image uploaded",
        UploadedImage {
            url: format!("/uploads/{filename}"),
            filename,
            original_name: image.original_name,
            mime_type: image.mime_type,
            size: image.bytes.len() as u64,
        },
        Some(Meta::empty()),
    ))
}
