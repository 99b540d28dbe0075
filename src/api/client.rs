//! HTTP client wrapper for the JobScope REST API.
//!
//! This module provides the `ApiClient` struct the rest of the
//! application issues every request through. The wrapper owns the
//! shared transport configuration (base address, timeout, default
//! content type) and runs the registered interceptors around each
//! exchange, so callers only ever see decoded payloads or `ApiError`.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::auth::{SessionStore, TOKEN_KEY, USER_INFO_KEY};
use crate::config::ClientConfig;
use crate::models::{Job, JobQuery, LoginRequest, LoginResponse, UserInfo};
use crate::nav::Navigator;

use super::interceptor::{AuthInterceptor, Interceptor};
use super::ApiError;

/// API client for the JobScope backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    store: Arc<dyn SessionStore>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl ApiClient {
    /// Create a client with the auth interceptor registered.
    pub fn new(
        config: ClientConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let auth = AuthInterceptor::new(store.clone(), navigator, config.login_route.clone());
        Self::with_interceptors(config, store, vec![Arc::new(auth)])
    }

    /// Create a client with an explicit interceptor list, applied in
    /// registration order around every request.
    pub fn with_interceptors(
        config: ClientConfig,
        store: Arc<dyn SessionStore>,
        interceptors: Vec<Arc<dyn Interceptor>>,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            config,
            store,
            interceptors,
        })
    }

    /// Whether a session token is currently stored.
    pub fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self.store.get(TOKEN_KEY)?.is_some())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Run outbound hooks, dispatch, and map non-2xx statuses.
    async fn dispatch(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let mut headers = HeaderMap::new();
        for interceptor in &self.interceptors {
            // An outbound hook failure aborts before dispatch.
            interceptor.before_send(&mut headers)?;
        }

        let response = request.headers(headers).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Execute a request through the interceptor pipeline and unwrap
    /// the response body. Failures run every failure hook and are then
    /// re-raised to the caller, never swallowed.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        match self.dispatch(request).await {
            Ok(response) => {
                for interceptor in &self.interceptors {
                    interceptor.on_success();
                }
                response
                    .json()
                    .await
                    .map_err(|e| ApiError::InvalidResponse(format!("failed to decode body: {}", e)))
            }
            Err(err) => {
                error!(error = %err, "API request failed");
                for interceptor in &self.interceptors {
                    interceptor.on_failure(&err);
                }
                Err(err)
            }
        }
    }

    // ===== Generic call surface =====

    /// Issue a GET and return the decoded response body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.client.get(self.url(path))).await
    }

    /// Issue a GET with query parameters.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute(self.client.get(self.url(path)).query(query))
            .await
    }

    /// Issue a POST with a JSON body and return the decoded response body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.client.post(self.url(path)).json(body))
            .await
    }

    /// Issue a PUT with a JSON body and return the decoded response body.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.client.put(self.url(path)).json(body))
            .await
    }

    /// Issue a DELETE and return the decoded response body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.client.delete(self.url(path))).await
    }

    // ===== Typed endpoints =====

    /// Log in and persist the session entries on success.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post("/users/login", &body).await?;

        self.store.set(TOKEN_KEY, &response.access_token)?;
        let profile = serde_json::to_string(&response.user)
            .map_err(|e| ApiError::InvalidResponse(format!("failed to serialize profile: {}", e)))?;
        self.store.set(USER_INFO_KEY, &profile)?;

        debug!(username, "login succeeded, session stored");
        Ok(response)
    }

    /// Fetch the authenticated user's profile
    pub async fn fetch_current_user(&self) -> Result<UserInfo, ApiError> {
        self.get("/users/me").await
    }

    /// Fetch the job listing, filtered and paginated by `query`
    pub async fn fetch_jobs(&self, query: &JobQuery) -> Result<Vec<Job>, ApiError> {
        self.get_with_query("/jobs/", query).await
    }

    /// Fetch a single job posting by id
    pub async fn fetch_job(&self, job_id: i64) -> Result<Job, ApiError> {
        self.get(&format!("/jobs/{}", job_id)).await
    }

    /// Full-text job search (GET /jobs/search/)
    pub async fn search_jobs(&self, q: &str) -> Result<Vec<Job>, ApiError> {
        self.get_with_query("/jobs/search/", &[("q", q)]).await
    }
}
