//! HTTP client for the MONKI backend.
//!
//! Every typed endpoint in [`endpoints`] is a thin specialization of
//! [`ApiClient::api_request`]: one round trip, bearer auth taken from the
//! session store, JSON in and out. Nothing is retried or cached, and no
//! timeout is applied.

mod endpoints;
mod error;
mod session;

pub use endpoints::*;
pub use error::*;
pub use session::*;

use std::sync::Arc;

use reqwest::{header, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::Config;

/// Client for the MONKI backend API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    upload_base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// Upload requests go to the same base URL until
    /// [`with_upload_base_url`](Self::with_upload_base_url) says otherwise.
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        let base_url = trim_base(base_url.into());
        Self {
            http: reqwest::Client::new(),
            upload_base_url: base_url.clone(),
            base_url,
            session,
        }
    }

    /// Create a client from configuration, using a file-backed session
    /// store when `session_file` is set.
    ///
    /// Backend calls go to `api_url`, image uploads to `upload_url`.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let session: Arc<dyn SessionStore> = match &config.session_file {
            Some(path) => Arc::new(FileStore::open(path)?),
            None => Arc::new(MemoryStore::new()),
        };
        Ok(Self::new(config.api_url.clone(), session)
            .with_upload_base_url(config.upload_url.clone()))
    }

    /// Send image uploads to a different server than the backend.
    pub fn with_upload_base_url(mut self, url: impl Into<String>) -> Self {
        self.upload_base_url = trim_base(url.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The stored session token, if any.
    pub fn session_token(&self) -> Result<Option<String>, ClientError> {
        self.session.get(SESSION_KEY)
    }

    pub fn set_session_token(&self, token: &str) -> Result<(), ClientError> {
        self.session.set(SESSION_KEY, token)
    }

    /// Forget the stored session token.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.session.remove(SESSION_KEY)
    }

    /// Issue one JSON request against the backend and decode the success body as `T`.
    ///
    /// A non-success status becomes [`ClientError::Http`] whose message is the
    /// body's `error` field, or `HTTP <status>` when there is none.
    pub async fn api_request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "Backend request");

        let mut request = self
            .authorize(self.http.request(method, &url))?
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        read_response(request.send().await?).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.api_request::<T, ()>(Method::GET, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.api_request(Method::POST, path, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.api_request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.api_request::<T, ()>(Method::DELETE, path, None).await
    }

    /// Attach the bearer credential when a session token is stored.
    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        Ok(match self.session_token()? {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }
}

/// Decode a success body, or turn a failure status into [`ClientError::Http`].
async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();

    if !status.is_success() {
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("error")?.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        tracing::debug!(status = status.as_u16(), "Backend error: {}", message);
        return Err(ClientError::Http {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

fn trim_base(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
