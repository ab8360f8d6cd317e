use std::sync::Arc;

use http::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use url::Url;

use crate::config::{parse_base_url, ClientConfig, API_KEY_HEADER};
use crate::error::{body_preview, ClientError};
use crate::models::{
    Color, CreateOrUpdateUserRequest, CreateUserResponse, LoginResponse, Page,
    RegisterOrLoginRequest, RegisterResponse, Single, UpdateUserResponse, User,
};
use crate::response::ApiResponse;

pub const USERS_PATH: &str = "/users";
pub const COLORS_PATH: &str = "/colors";
pub const REGISTER_PATH: &str = "/register";
pub const LOGIN_PATH: &str = "/login";

/// `{resource}/{id}`
fn item_path(resource: &str, id: u64) -> String {
    format!("{resource}/{id}")
}

/// HTTP client for the ReqRes API.
///
/// One method per remote operation. Cloning is cheap and clones share the
/// connection pool and the (immutable) configuration.
#[derive(Clone)]
pub struct ReqResClient {
    http: reqwest::Client,
    base_url: Url,
    config: Arc<ClientConfig>,
}

impl ReqResClient {
    /// Build a client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidConfig` for an unusable base URL or header
    /// value, and `ClientError::Build` if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = parse_base_url(&config.base_url).map_err(ClientError::InvalidConfig)?;

        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let mut value = HeaderValue::from_str(key)
                .map_err(|e| ClientError::InvalidConfig(format!("{API_KEY_HEADER}: {e}")))?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ── Users ──

    /// `GET /users?page={page}`
    pub async fn list_users(&self, page: u64) -> Result<ApiResponse<Page<User>>, ClientError> {
        let request = self.request(Method::GET, USERS_PATH)?.query(&[("page", page)]);
        self.send(request).await
    }

    /// `GET /users/{id}`
    pub async fn get_user(&self, id: u64) -> Result<ApiResponse<Single<User>>, ClientError> {
        let request = self.request(Method::GET, &item_path(USERS_PATH, id))?;
        self.send(request).await
    }

    /// `POST /users`
    pub async fn create_user(
        &self,
        body: &CreateOrUpdateUserRequest,
    ) -> Result<ApiResponse<CreateUserResponse>, ClientError> {
        self.send_json(Method::POST, USERS_PATH, body).await
    }

    /// `PUT /users/{id}`
    pub async fn update_user(
        &self,
        id: u64,
        body: &CreateOrUpdateUserRequest,
    ) -> Result<ApiResponse<UpdateUserResponse>, ClientError> {
        self.send_json(Method::PUT, &item_path(USERS_PATH, id), body).await
    }

    /// `PATCH /users/{id}`
    pub async fn patch_user(
        &self,
        id: u64,
        body: &CreateOrUpdateUserRequest,
    ) -> Result<ApiResponse<UpdateUserResponse>, ClientError> {
        self.send_json(Method::PATCH, &item_path(USERS_PATH, id), body).await
    }

    /// `DELETE /users/{id}`
    pub async fn delete_user(&self, id: u64) -> Result<ApiResponse<()>, ClientError> {
        let request = self.request(Method::DELETE, &item_path(USERS_PATH, id))?;
        self.send(request).await
    }

    // ── Colors ──

    /// `GET /colors`
    pub async fn list_colors(&self) -> Result<ApiResponse<Page<Color>>, ClientError> {
        let request = self.request(Method::GET, COLORS_PATH)?;
        self.send(request).await
    }

    /// `GET /colors/{id}`
    pub async fn get_color(&self, id: u64) -> Result<ApiResponse<Single<Color>>, ClientError> {
        let request = self.request(Method::GET, &item_path(COLORS_PATH, id))?;
        self.send(request).await
    }

    // ── Auth ──

    /// `POST /register`. A 400 with an [`ErrorResponse`](crate::models::ErrorResponse)
    /// body is returned, not raised.
    pub async fn register(
        &self,
        body: &RegisterOrLoginRequest,
    ) -> Result<ApiResponse<RegisterResponse>, ClientError> {
        self.send_json(Method::POST, REGISTER_PATH, body).await
    }

    /// `POST /login`. A 400 with an [`ErrorResponse`](crate::models::ErrorResponse)
    /// body is returned, not raised.
    pub async fn login(
        &self,
        body: &RegisterOrLoginRequest,
    ) -> Result<ApiResponse<LoginResponse>, ClientError> {
        self.send_json(Method::POST, LOGIN_PATH, body).await
    }

    // ── Plumbing ──

    /// Resolve `path` against the base endpoint, keeping the base's own path.
    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::InvalidConfig(format!("'{}' cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        Ok(self.http.request(method, self.endpoint(path)?))
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(method, path)?.json(body);
        self.send(request).await
    }

    async fn send<T>(&self, request: RequestBuilder) -> Result<ApiResponse<T>, ClientError> {
        let request = request.build().map_err(ClientError::from_transport)?;
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self
            .http
            .execute(request)
            .await
            .map_err(ClientError::from_transport)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(ClientError::from_transport)?;

        if self.config.status_policy.is_fault(status.as_u16()) {
            tracing::warn!(
                %method,
                %url,
                status = status.as_u16(),
                limit = self.config.status_policy.fault_above(),
                "ReqRes call returned a status above the policy limit"
            );
            return Err(ClientError::ServerFault {
                status: status.as_u16(),
                body: body_preview(&body),
            });
        }

        tracing::debug!(
            %method,
            %url,
            status = status.as_u16(),
            bytes = body.len(),
            "ReqRes call completed"
        );

        Ok(ApiResponse::new(status, headers, body))
    }
}

impl std::fmt::Debug for ReqResClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqResClient")
            .field("base_url", &self.base_url.as_str())
            .field("status_policy", &self.config.status_policy)
            .finish()
    }
}
