use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DetectIngredientsInput {
    pub image_data: Vec<u8>,
    pub content_type: String,
}

/// Handle to an upload spooled on local disk. The path is uniquely named per
/// request, so concurrent requests never collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub path: PathBuf,
}
