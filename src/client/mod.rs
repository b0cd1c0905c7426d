//! Typed HTTP clients for the BankMore services
//!
//! Three remote services back the product: account (authentication, balance,
//! profile), transfer (execution and history) and fee (schedule). Each typed
//! client shares one `reqwest::Client` and an explicit [`SessionHandle`];
//! the bearer token is attached per request, and a 401 response clears the
//! session before surfacing [`ApiError::Unauthorized`].

pub mod account;
pub mod fee;
pub mod transfer;

pub use account::{AccountClient, AccountError};
pub use fee::FeeClient;
pub use transfer::TransferClient;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::session::SessionHandle;

/// Client-layer error taxonomy
#[derive(Debug, Error, Clone)]
pub enum ApiError {
    /// No valid session, or the service revoked the token
    #[error("authentication required")]
    Unauthorized,

    /// The service rejected the request and said why
    #[error("service rejected the request ({status}): {message}")]
    Service { status: u16, message: String },

    /// The request never produced a usable response
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body did not match the expected shape
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Error body shape shared by all three services
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Shared request plumbing: one connection pool, one session.
#[derive(Debug, Clone)]
pub(crate) struct Http {
    client: reqwest::Client,
    session: SessionHandle,
}

impl Http {
    pub(crate) fn new(client: reqwest::Client, session: SessionHandle) -> Self {
        Self { client, session }
    }

    pub(crate) fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, url, None).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: String,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, url, Some(body)).await
    }

    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        url: String,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, url, Some(body)).await
    }

    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let mut request = self.client.request(method.clone(), &url);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, %url, "outbound request");
        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // Token expired or revoked: sign out everywhere
            warn!(%url, "401 from service, clearing session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            return Err(ApiError::Service {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(ApiError::from)
    }
}

/// Acknowledgement body for endpoints that return no payload of interest
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

/// The three typed clients wired to one session and connection pool.
#[derive(Debug, Clone)]
pub struct ApiContext {
    pub account: AccountClient,
    pub transfer: TransferClient,
    pub fee: FeeClient,
}

impl ApiContext {
    /// Build the clients from configuration and an explicit session handle.
    pub fn new(config: &AppConfig, session: SessionHandle) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.http.timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {}", e)))?;

        let http = Http::new(client, session);
        Ok(Self {
            account: AccountClient::new(http.clone(), &config.services.account_url),
            transfer: TransferClient::new(http.clone(), &config.services.transfer_url),
            fee: FeeClient::new(http, &config.services.fee_url),
        })
    }
}

/// Join a base URL and a path without doubling slashes.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
