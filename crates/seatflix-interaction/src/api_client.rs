//! Backend HTTP client with session interception.
//!
//! Every request picks up the bearer token from durable storage at send
//! time. A 401 from the backend tears the session down on disk and forces a
//! hard navigation to the entry route; any other failure is handed back to
//! the caller untouched.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Instrument;
use uuid::Uuid;

use seatflix_core::http::{
    AUTHORIZATION_HEADER, ApiRequest, ApiResponse, HardNavigator, HttpTransport, MultipartFile,
    bearer,
};
use seatflix_core::config::ClientConfig;
use seatflix_core::storage::{AUTH_TOKEN_KEY, StorageWrite};
use seatflix_core::{DurableStorage, ENTRY_ROUTE, Result, SeatflixError};

/// Backend client. Without a base URL every request fails with
/// `SeatflixError::Config`; nothing else about the client changes.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Option<String>,
    transport: Arc<dyn HttpTransport>,
    storage: Arc<dyn DurableStorage>,
    navigator: Arc<dyn HardNavigator>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn DurableStorage>,
        navigator: Arc<dyn HardNavigator>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url: Some(base_url).filter(|url| !url.is_empty()),
            transport,
            storage,
            navigator,
        }
    }

    /// Client for `config.api_base_url`, which may be unset.
    pub fn from_config(
        config: &ClientConfig,
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn DurableStorage>,
        navigator: Arc<dyn HardNavigator>,
    ) -> Self {
        Self {
            base_url: config.api_base_url().ok().map(str::to_string),
            transport,
            storage,
            navigator,
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Absolute URL for a backend path.
    pub fn url(&self, path: &str) -> Result<String> {
        let base_url = self.base_url.as_deref().ok_or_else(|| {
            SeatflixError::config("api_base_url is not set (config.toml or SEATFLIX_API_URL)")
        })?;
        Ok(format!("{}/{}", base_url, path.trim_start_matches('/')))
    }

    /// Sends a request through the interceptors.
    ///
    /// Returns the response only for 2xx statuses.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let span = tracing::debug_span!(
            "api_request",
            request_id = %Uuid::new_v4(),
            method = %request.method,
            url = %request.url,
        );
        self.dispatch(request).instrument(span).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(ApiRequest::get(self.url(path)?)).await?.json()
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.send(ApiRequest::post(self.url(path)?).with_json(body))
            .await?
            .json()
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        file: MultipartFile,
    ) -> Result<T> {
        self.send(ApiRequest::post(self.url(path)?).with_multipart(file))
            .await?
            .json()
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse> {
        let request = self.authorize(request);

        let response = self.transport.send(request).await.map_err(|err| {
            tracing::warn!(error = %err, "[Api] no response from backend");
            SeatflixError::from(err)
        })?;

        if response.is_success() {
            tracing::debug!(status = response.status, "[Api] ok");
            return Ok(response);
        }

        if response.is_unauthorized() {
            tracing::warn!("[Api] 401 from backend, ending session");
            self.expire_session();
            return Err(SeatflixError::Unauthorized);
        }

        tracing::debug!(status = response.status, "[Api] request rejected");
        Err(SeatflixError::Http {
            status: response.status,
            body: response.text(),
        })
    }

    fn authorize(&self, request: ApiRequest) -> ApiRequest {
        if request.header(AUTHORIZATION_HEADER).is_some() {
            return request;
        }

        match self.storage.get_item(AUTH_TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => {
                tracing::debug!("[Api] bearer token attached");
                request.with_header(AUTHORIZATION_HEADER, bearer(&token))
            }
            Ok(_) => {
                tracing::debug!("[Api] no auth token, sending anonymously");
                request
            }
            Err(err) => {
                tracing::warn!(error = %err, "[Api] token read failed, sending anonymously");
                request
            }
        }
    }

    /// Clears every session key in one batch, then leaves the app.
    fn expire_session(&self) {
        if let Err(err) = self.storage.apply(&StorageWrite::clear_session()) {
            tracing::warn!(error = %err, "[Api] failed to clear session keys");
        }
        self.navigator.hard_navigate(ENTRY_ROUTE);
    }
}
