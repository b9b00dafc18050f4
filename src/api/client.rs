//! HTTP client for the exhibition backend (`{base_url}/api/v1`).

use std::time::Instant;

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::model::{file_url, StagedImage};
use crate::session::SecureString;

use super::error::ApiError;
use super::types::{
    BlockCreate, BlockPublic, ExhibitPayload, ExhibitPublic, ExhibitionCreate, ExhibitionPublic,
    Listing, Message, OrganizationMembership, Token, UploadResponse, UserProfile, UserPublic,
    UserRegister,
};

/// Paging for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub skip: u32,
    pub limit: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public URL of an uploaded object.
    pub fn file_url(&self, object_key: &str) -> String {
        file_url(&self.base_url, object_key)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    // -- Authentication -----------------------------------------------------

    /// Exchange username/password for a bearer token (form encoded).
    pub async fn login(&self, username: &str, password: &str) -> Result<Token, ApiError> {
        let path = "/login/access-token";
        let request = self
            .client
            .post(self.url(path))
            .form(&[("username", username), ("password", password)]);
        self.execute(path, request).await
    }

    pub async fn signup(&self, user: &UserRegister) -> Result<UserPublic, ApiError> {
        let path = "/users/signup";
        let request = self.client.post(self.url(path)).json(user);
        self.execute(path, request).await
    }

    // -- Profile --------------------------------------------------------------

    pub async fn profile(&self, token: &SecureString) -> Result<UserProfile, ApiError> {
        let path = "/users/me/profile";
        let request = authorized(self.client.get(self.url(path)), Some(token));
        self.execute(path, request).await
    }

    pub async fn update_profile(
        &self,
        profile: &UserProfile,
        token: &SecureString,
    ) -> Result<UserProfile, ApiError> {
        let path = "/users/me/profile";
        let request = authorized(self.client.put(self.url(path)).json(profile), Some(token));
        self.execute(path, request).await
    }

    // -- Files ----------------------------------------------------------------

    /// Upload a staged image under `prefix` and return its object key.
    pub async fn upload_image(
        &self,
        prefix: &str,
        image: &StagedImage,
        file_stem: &str,
        token: Option<&SecureString>,
    ) -> Result<UploadResponse, ApiError> {
        let path = "/files/upload";
        let bytes = image.decode()?;
        let size = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(image.file_name(file_stem))
            .mime_str(image.mime_type())
            .map_err(|source| ApiError::Transport {
                endpoint: path.to_string(),
                source,
            })?;
        let form = Form::new().part("file", part);

        debug!(prefix, size, mime = image.mime_type(), "uploading image");

        let request = authorized(
            self.client
                .post(self.url(path))
                .query(&[("prefix", prefix)])
                .multipart(form),
            token,
        );
        self.execute(path, request).await
    }

    // -- Exhibitions ----------------------------------------------------------

    pub async fn list_exhibitions(
        &self,
        params: ListParams,
        token: Option<&SecureString>,
    ) -> Result<Vec<ExhibitionPublic>, ApiError> {
        let path = "/exhibitions/";
        let request = authorized(
            self.client
                .get(self.url(path))
                .query(&[("skip", params.skip), ("limit", params.limit)]),
            token,
        );
        let listing: Listing<ExhibitionPublic> = self.execute(path, request).await?;
        Ok(listing.into_vec())
    }

    pub async fn create_exhibition(
        &self,
        exhibition: &ExhibitionCreate,
        token: &SecureString,
    ) -> Result<ExhibitionPublic, ApiError> {
        let path = "/exhibitions/";
        let request = authorized(self.client.post(self.url(path)).json(exhibition), Some(token));
        self.execute(path, request).await
    }

    /// Fetch one exhibition with its nested blocks.
    pub async fn get_exhibition(
        &self,
        id: Uuid,
        token: &SecureString,
    ) -> Result<ExhibitionPublic, ApiError> {
        let path = format!("/exhibitions/{}", id);
        let request = authorized(self.client.get(self.url(&path)), Some(token));
        self.execute(&path, request).await
    }

    pub async fn create_block(
        &self,
        exhibition_id: Uuid,
        block: &BlockCreate,
        token: &SecureString,
    ) -> Result<BlockPublic, ApiError> {
        let path = format!("/exhibitions/{}/blocks/", exhibition_id);
        let request = authorized(self.client.post(self.url(&path)).json(block), Some(token));
        self.execute(&path, request).await
    }

    // -- Exhibits -------------------------------------------------------------

    pub async fn list_exhibits(&self, params: ListParams) -> Result<Vec<ExhibitPublic>, ApiError> {
        let path = "/exhibits/";
        let request = self
            .client
            .get(self.url(path))
            .query(&[("skip", params.skip), ("limit", params.limit)]);
        let listing: Listing<ExhibitPublic> = self.execute(path, request).await?;
        Ok(listing.into_vec())
    }

    pub async fn create_exhibit(
        &self,
        exhibit: &ExhibitPayload,
        token: Option<&SecureString>,
    ) -> Result<ExhibitPublic, ApiError> {
        let path = "/exhibits/";
        let request = authorized(self.client.post(self.url(path)).json(exhibit), token);
        self.execute(path, request).await
    }

    pub async fn get_exhibit(&self, id: Uuid) -> Result<ExhibitPublic, ApiError> {
        let path = format!("/exhibits/{}", id);
        let request = self.client.get(self.url(&path));
        self.execute(&path, request).await
    }

    pub async fn update_exhibit(
        &self,
        id: Uuid,
        exhibit: &ExhibitPayload,
        token: &SecureString,
    ) -> Result<ExhibitPublic, ApiError> {
        let path = format!("/exhibits/{}", id);
        let request = authorized(self.client.put(self.url(&path)).json(exhibit), Some(token));
        self.execute(&path, request).await
    }

    pub async fn delete_exhibit(&self, id: Uuid, token: &SecureString) -> Result<String, ApiError> {
        let path = format!("/exhibits/{}", id);
        let request = authorized(self.client.delete(self.url(&path)), Some(token));
        let message: Message = self.execute(&path, request).await?;
        Ok(message.message)
    }

    // -- Organizations --------------------------------------------------------

    pub async fn my_organizations(
        &self,
        token: &SecureString,
    ) -> Result<Vec<OrganizationMembership>, ApiError> {
        let path = "/organizations/my";
        let request = authorized(self.client.get(self.url(path)), Some(token));
        let listing: Listing<OrganizationMembership> = self.execute(path, request).await?;
        Ok(listing.into_vec())
    }

    /// Send a request and decode a JSON body. Non-2xx answers become
    /// `ApiError::Status`; nothing is retried.
    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(endpoint, "sending backend request");

        let start = Instant::now();
        let response = request.send().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let message = error_detail(&body);
            error!(
                endpoint,
                status = %status,
                error = %message,
                latency_ms,
                "backend request failed"
            );
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        debug!(endpoint, status = %status, latency_ms, "backend request completed");

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

fn authorized(builder: RequestBuilder, token: Option<&SecureString>) -> RequestBuilder {
    match token {
        Some(token) => builder.header(AUTHORIZATION, token.bearer()),
        None => builder,
    }
}

/// Pull a readable message out of an error body.
///
/// Understands `{"detail": "..."}` and validation lists
/// `{"detail": [{"msg": "..."}]}`; anything else is returned as is.
fn error_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };

    match value.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.trim().to_string(),
    }
}
