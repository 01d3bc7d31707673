//! Integration tests for the upload service.

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tempfile::TempDir;

use crate::client::{ApiClient, ClientError, ImageUpload, MemoryStore};
use crate::config::{Config, DEFAULT_API_URL, DEFAULT_MAX_UPLOAD_BYTES};
use crate::upload::Clock;
use crate::{create_router, AppState};

const NOW: i64 = 1_700_000_000_000;
const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    upload_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_admin_token(None).await
    }

    async fn with_admin_token(admin_token: Option<String>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let upload_dir = temp_dir.path().join("public").join("badges");

        let config = Config {
            api_url: DEFAULT_API_URL.to_string(),
            upload_dir: upload_dir.clone(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            upload_url: "http://127.0.0.1:0".to_string(),
            log_level: "warn".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            admin_token,
            session_file: None,
        };

        let state = AppState::with_clock(config, Arc::new(FixedClock(NOW)));
        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            upload_dir,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a multipart upload with an optional Authorization header.
    async fn upload(&self, path: &str, authorization: Option<&str>, form: Form) -> (u16, Value) {
        let mut request = self.client.post(self.url(path)).multipart(form);
        if let Some(value) = authorization {
            request = request.header("Authorization", value);
        }
        let resp = request.send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    fn stored_files(&self) -> Vec<String> {
        match std::fs::read_dir(&self.upload_dir) {
            Ok(entries) => {
                let mut names: Vec<String> = entries
                    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                    .collect();
                names.sort();
                names
            }
            Err(_) => Vec::new(),
        }
    }

    fn api_client(&self) -> ApiClient {
        let client = ApiClient::new(DEFAULT_API_URL, Arc::new(MemoryStore::new()))
            .with_upload_base_url(self.base_url.clone());
        client.set_session_token("admin-session").unwrap();
        client
    }
}

fn image_form(id_field: &str, id: &str, mime: &str, bytes: &'static [u8]) -> Form {
    let part = Part::bytes(bytes)
        .file_name("image")
        .mime_str(mime)
        .unwrap();
    Form::new()
        .text(id_field.to_string(), id.to_string())
        .part("file", part)
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_badge_icon_upload() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .upload(
            "/api/admin/upload-badge-icon",
            Some("Bearer session-token"),
            image_form("badgeId", "b1", "image/png", PNG_BYTES),
        )
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["filename"], format!("badge-b1-{}.png", NOW));
    assert!(body["message"].is_string());

    let stored = std::fs::read(fixture.upload_dir.join(format!("badge-b1-{}.png", NOW))).unwrap();
    assert_eq!(stored, PNG_BYTES);
}

#[tokio::test]
async fn test_badge_icon_rejects_jpeg() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .upload(
            "/api/admin/upload-badge-icon",
            Some("Bearer session-token"),
            image_form("badgeId", "b1", "image/jpeg", b"\xff\xd8\xff"),
        )
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "File must be PNG format");
    assert!(fixture.stored_files().is_empty());
}

#[tokio::test]
async fn test_badge_icon_requires_file() {
    let fixture = TestFixture::new().await;

    let form = Form::new().text("badgeId", "b1");
    let (status, body) = fixture
        .upload("/api/admin/upload-badge-icon", Some("Bearer t"), form)
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "No file provided");
    assert!(fixture.stored_files().is_empty());
}

#[tokio::test]
async fn test_badge_icon_requires_badge_id() {
    let fixture = TestFixture::new().await;

    let part = Part::bytes(PNG_BYTES).file_name("icon.png").mime_str("image/png").unwrap();
    let (status, body) = fixture
        .upload(
            "/api/admin/upload-badge-icon",
            Some("Bearer t"),
            Form::new().part("file", part),
        )
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "No badge ID provided");
}

#[tokio::test]
async fn test_uploads_require_bearer_header() {
    let fixture = TestFixture::new().await;

    for (path, field, id) in [
        ("/api/admin/upload-badge-icon", "badgeId", "b1"),
        ("/api/admin/upload-clan-emblem", "emblemId", "maths"),
    ] {
        let (status, body) = fixture
            .upload(path, None, image_form(field, id, "image/png", PNG_BYTES))
            .await;
        assert_eq!(status, 401);
        assert_eq!(body["error"], "Unauthorized");

        let (status, _) = fixture
            .upload(
                path,
                Some("Basic dXNlcjpwYXNz"),
                image_form(field, id, "image/png", PNG_BYTES),
            )
            .await;
        assert_eq!(status, 401);
    }

    assert!(!fixture.upload_dir.exists());
}

#[tokio::test]
async fn test_clan_emblem_upload_and_overwrite() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .upload(
            "/api/admin/upload-clan-emblem",
            Some("Bearer t"),
            image_form("emblemId", "maths", "image/png", PNG_BYTES),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["filename"], "clan-maths.png");

    let (status, body) = fixture
        .upload(
            "/api/admin/upload-clan-emblem",
            Some("Bearer t"),
            image_form("emblemId", "maths", "image/png", b"\x89PNGsecond"),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["filename"], "clan-maths.png");

    assert_eq!(fixture.stored_files(), vec!["clan-maths.png".to_string()]);
    let stored = std::fs::read(fixture.upload_dir.join("clan-maths.png")).unwrap();
    assert_eq!(stored, b"\x89PNGsecond");
}

#[tokio::test]
async fn test_clan_emblem_rejects_unknown_id() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .upload(
            "/api/admin/upload-clan-emblem",
            Some("Bearer t"),
            image_form("emblemId", "physique", "image/png", PNG_BYTES),
        )
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid emblem ID");
    assert!(fixture.stored_files().is_empty());
}

#[tokio::test]
async fn test_admin_token_enforced_when_configured() {
    let fixture = TestFixture::with_admin_token(Some("admin-key".to_string())).await;

    let (status, _) = fixture
        .upload(
            "/api/admin/upload-clan-emblem",
            Some("Bearer wrong"),
            image_form("emblemId", "sciences", "image/png", PNG_BYTES),
        )
        .await;
    assert_eq!(status, 401);
    assert!(fixture.stored_files().is_empty());

    let (status, body) = fixture
        .upload(
            "/api/admin/upload-clan-emblem",
            Some("Bearer admin-key"),
            image_form("emblemId", "sciences", "image/png", PNG_BYTES),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["filename"], "clan-sciences.png");
}

#[tokio::test]
async fn test_client_upload_round_trip() {
    let fixture = TestFixture::new().await;
    let client = fixture.api_client();

    let uploaded = client
        .upload_badge_icon("b7", ImageUpload::png("icon.png", PNG_BYTES.to_vec()))
        .await
        .unwrap();
    assert!(uploaded.success);
    assert_eq!(uploaded.filename, format!("badge-b7-{}.png", NOW));

    let emblem = client
        .upload_clan_emblem("histoire", ImageUpload::png("emblem.png", PNG_BYTES.to_vec()))
        .await
        .unwrap();
    assert_eq!(emblem.filename, "clan-histoire.png");

    let err = client
        .upload_clan_emblem("physique", ImageUpload::png("emblem.png", PNG_BYTES.to_vec()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Invalid emblem ID");
}

#[tokio::test]
async fn test_client_upload_without_session_is_unauthorized() {
    let fixture = TestFixture::new().await;
    let client = ApiClient::new(DEFAULT_API_URL, Arc::new(MemoryStore::new()))
        .with_upload_base_url(fixture.base_url.clone());

    let err = client
        .upload_badge_icon("b1", ImageUpload::png("icon.png", PNG_BYTES.to_vec()))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http { status: 401, .. }));
    assert_eq!(err.message(), "Unauthorized");
    assert!(fixture.stored_files().is_empty());
}

#[tokio::test]
async fn test_non_multipart_body_gets_json_error() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/admin/upload-badge-icon"))
        .header("Authorization", "Bearer t")
        .json(&serde_json::json!({ "badgeId": "b1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["error"].as_str().unwrap().starts_with("Multipart error"));
    assert!(fixture.stored_files().is_empty());
}

#[tokio::test]
async fn test_client_from_config_uploads_to_service() {
    let fixture = TestFixture::new().await;

    // Backend calls and uploads go to different servers
    let config = Config {
        api_url: DEFAULT_API_URL.to_string(),
        upload_dir: fixture.upload_dir.clone(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        upload_url: format!("{}/", fixture.base_url),
        log_level: "warn".to_string(),
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        admin_token: None,
        session_file: None,
    };
    let client = ApiClient::from_config(&config).unwrap();
    assert_eq!(client.base_url(), DEFAULT_API_URL);
    client.set_session_token("admin-session").unwrap();

    let uploaded = client
        .upload_clan_emblem("geographie", ImageUpload::png("emblem.png", PNG_BYTES.to_vec()))
        .await
        .unwrap();
    assert_eq!(uploaded.filename, "clan-geographie.png");
    assert_eq!(fixture.stored_files(), vec!["clan-geographie.png".to_string()]);
}
