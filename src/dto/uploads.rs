use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadedImage {
    /// Public path, e.g. `/uploads/1718000000000-<uuid>.png`.
    pub url: String,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
}

/// Multipart form accepted by the upload endpoint.
#[derive(ToSchema)]
pub struct UploadImageForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}
