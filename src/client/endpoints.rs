//! Typed bindings for each backend route.

use reqwest::multipart::{Form, Part};

use super::{read_response, ApiClient, ClientError};
use crate::models::{
    Badge, BadgeInput, BadgesResponse, CompleteCourseResponse, Course, CourseInput, CourseStats,
    DeleteResponse, Kpi, PurchasesResponse, RankingResponse, RegisterRequest, RegisterResponse,
    SessionParticipants, UploadResponse, User,
};
use crate::upload::{BADGE_ICON, CLAN_EMBLEM};

/// An image to send to one of the upload routes.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// A PNG image, the only type the upload routes accept.
    pub fn png(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: crate::upload::PNG_MIME.to_string(),
            bytes,
        }
    }
}

impl ApiClient {
    // Auth

    /// POST /api/auth/register - Open a session and remember its id.
    pub async fn register(&self, prenom: &str) -> Result<RegisterResponse, ClientError> {
        let request = RegisterRequest {
            prenom: prenom.to_string(),
        };
        let response: RegisterResponse = self.post("/api/auth/register", &request).await?;
        self.set_session_token(&response.session_id)?;
        Ok(response)
    }

    // Student

    /// GET /api/user
    pub async fn get_user(&self) -> Result<User, ClientError> {
        self.get("/api/user").await
    }

    /// GET /api/courses
    pub async fn get_courses(&self) -> Result<Vec<Course>, ClientError> {
        self.get("/api/courses").await
    }

    /// POST /api/courses/:id/complete
    pub async fn complete_course(
        &self,
        course_id: &str,
    ) -> Result<CompleteCourseResponse, ClientError> {
        let path = format!("/api/courses/{}/complete", course_id);
        self.api_request::<_, ()>(reqwest::Method::POST, &path, None).await
    }

    /// GET /api/student/ranking
    pub async fn get_ranking(&self) -> Result<RankingResponse, ClientError> {
        self.get("/api/student/ranking").await
    }

    /// GET /api/student/badges
    pub async fn get_badges(&self) -> Result<BadgesResponse, ClientError> {
        self.get("/api/student/badges").await
    }

    /// GET /api/student/shop/purchases
    pub async fn get_purchases(&self) -> Result<PurchasesResponse, ClientError> {
        self.get("/api/student/shop/purchases").await
    }

    // Admin

    /// GET /api/admin/kpi
    pub async fn get_kpi(&self) -> Result<Kpi, ClientError> {
        self.get("/api/admin/kpi").await
    }

    pub async fn create_course(&self, course: &CourseInput) -> Result<Course, ClientError> {
        self.post("/api/admin/courses", course).await
    }

    pub async fn update_course(&self, id: &str, course: &CourseInput) -> Result<Course, ClientError> {
        self.put(&format!("/api/admin/courses/{}", id), course).await
    }

    pub async fn delete_course(&self, id: &str) -> Result<DeleteResponse, ClientError> {
        self.delete(&format!("/api/admin/courses/{}", id)).await
    }

    pub async fn create_badge(&self, badge: &BadgeInput) -> Result<Badge, ClientError> {
        self.post("/api/admin/badges", badge).await
    }

    pub async fn update_badge(&self, id: &str, badge: &BadgeInput) -> Result<Badge, ClientError> {
        self.put(&format!("/api/admin/badges/{}", id), badge).await
    }

    pub async fn delete_badge(&self, id: &str) -> Result<DeleteResponse, ClientError> {
        self.delete(&format!("/api/admin/badges/{}", id)).await
    }

    // Teacher

    /// GET /api/teacher/courses/:id/stats
    pub async fn get_course_stats(&self, course_id: &str) -> Result<CourseStats, ClientError> {
        self.get(&format!("/api/teacher/courses/{}/stats", course_id))
            .await
    }

    /// GET /api/teacher/sessions/:id/participants
    pub async fn get_session_participants(
        &self,
        session_id: &str,
    ) -> Result<SessionParticipants, ClientError> {
        self.get(&format!("/api/teacher/sessions/{}/participants", session_id))
            .await
    }

    // Uploads

    /// POST /api/admin/upload-badge-icon
    pub async fn upload_badge_icon(
        &self,
        badge_id: &str,
        image: ImageUpload,
    ) -> Result<UploadResponse, ClientError> {
        self.upload("/api/admin/upload-badge-icon", BADGE_ICON.id_field, badge_id, image)
            .await
    }

    /// POST /api/admin/upload-clan-emblem
    pub async fn upload_clan_emblem(
        &self,
        emblem_id: &str,
        image: ImageUpload,
    ) -> Result<UploadResponse, ClientError> {
        self.upload("/api/admin/upload-clan-emblem", CLAN_EMBLEM.id_field, emblem_id, image)
            .await
    }

    async fn upload(
        &self,
        path: &str,
        id_field: &'static str,
        id: &str,
        image: ImageUpload,
    ) -> Result<UploadResponse, ClientError> {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| {
                ClientError::InvalidRequest(format!(
                    "content type {:?}: {}",
                    image.content_type, e
                ))
            })?;
        let form = Form::new().text(id_field, id.to_string()).part("file", part);

        let url = format!("{}{}", self.upload_base_url, path);
        tracing::debug!(%url, "Image upload");

        let request = self.authorize(self.http.post(&url))?.multipart(form);
        read_response(request.send().await?).await
    }
}
