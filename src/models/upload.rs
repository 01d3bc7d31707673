//! Upload route response model.

use serde::{Deserialize, Serialize};

/// Body returned by both image upload routes on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
}
