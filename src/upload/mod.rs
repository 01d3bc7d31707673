//! Validated PNG uploads for badge icons and clan emblems.
//!
//! Both routes run the same sequence: check the file, check its MIME type,
//! check the identifier, then write the bytes under a generated name. An
//! [`ImageTarget`] supplies the two parts that differ.

use std::path::{Component, Path, PathBuf};

use axum::body::Bytes;
use tokio::fs;

use crate::errors::AppError;

/// The only MIME type accepted for uploaded images.
pub const PNG_MIME: &str = "image/png";

/// Clan categories an emblem may be uploaded for.
pub const EMBLEM_IDS: [&str; 5] = ["francais", "maths", "sciences", "histoire", "geographie"];

/// Source of upload timestamps.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// An uploaded file as received in the multipart form.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// The parsed multipart form of an upload request.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<ImageFile>,
    pub id: Option<String>,
}

/// Per-route upload configuration.
#[derive(Clone, Copy)]
pub struct ImageTarget {
    /// Human-readable name used in logs and the success message
    pub label: &'static str,
    /// Multipart field carrying the identifier
    pub id_field: &'static str,
    /// Accepts or rejects the identifier
    pub validate_id: fn(Option<&str>) -> Result<&str, AppError>,
    /// Builds the stored filename from the identifier and a timestamp
    pub file_name: fn(&str, i64) -> String,
}

/// Badge icons: any non-empty badge id, timestamped filename.
pub const BADGE_ICON: ImageTarget = ImageTarget {
    label: "Badge icon",
    id_field: "badgeId",
    validate_id: validate_badge_id,
    file_name: badge_file_name,
};

/// Clan emblems: allow-listed id, fixed filename (last upload wins).
pub const CLAN_EMBLEM: ImageTarget = ImageTarget {
    label: "Clan emblem",
    id_field: "emblemId",
    validate_id: validate_emblem_id,
    file_name: emblem_file_name,
};

// Badge ids are not checked against the badge catalogue.
fn validate_badge_id(id: Option<&str>) -> Result<&str, AppError> {
    match id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(AppError::validation("No badge ID provided")),
    }
}

fn validate_emblem_id(id: Option<&str>) -> Result<&str, AppError> {
    match id {
        Some(id) if EMBLEM_IDS.contains(&id) => Ok(id),
        _ => Err(AppError::validation("Invalid emblem ID")),
    }
}

fn badge_file_name(id: &str, now_millis: i64) -> String {
    format!("badge-{}-{}.png", id, now_millis)
}

fn emblem_file_name(id: &str, _now_millis: i64) -> String {
    format!("clan-{}.png", id)
}

impl ImageTarget {
    /// Check the form in route order and return the file and identifier.
    pub fn validate<'a>(&self, form: &'a UploadForm) -> Result<(&'a ImageFile, &'a str), AppError> {
        let file = form
            .file
            .as_ref()
            .ok_or_else(|| AppError::validation("No file provided"))?;

        if file.content_type.as_deref() != Some(PNG_MIME) {
            return Err(AppError::validation("File must be PNG format"));
        }

        let id = (self.validate_id)(form.id.as_deref())?;
        Ok((file, id))
    }

    /// Validate the form and write the file into `dir`, returning the stored filename.
    ///
    /// Nothing touches the filesystem unless validation passes. Concurrent
    /// writes to the same filename are not coordinated.
    pub async fn store(
        &self,
        dir: &Path,
        form: &UploadForm,
        clock: &dyn Clock,
    ) -> Result<String, AppError> {
        let (file, id) = self.validate(form)?;
        let file_name = (self.file_name)(id, clock.now_millis());
        let path = path_within(dir, &file_name)?;

        fs::create_dir_all(dir).await?;
        fs::write(&path, &file.bytes).await?;

        tracing::debug!(path = %path.display(), size = file.bytes.len(), "Image written");
        Ok(file_name)
    }
}

/// Join `file_name` onto `dir`, refusing anything but a single plain component.
fn path_within(dir: &Path, file_name: &str) -> Result<PathBuf, AppError> {
    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(dir.join(file_name)),
        _ => Err(AppError::validation("Invalid file name")),
    }
}
