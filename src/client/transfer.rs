//! Transfer service client
//!
//! Transfer execution and history against the transfer service
//! (`/api/transfer`). Every create call carries a caller-generated
//! idempotency token so a duplicated send cannot double-execute.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use uuid::Uuid;

use super::{ApiError, Http, join_url};
use crate::identity::Cpf;

/// Outcome reported by the transfer service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Completed,
    Pending,
    Failed,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Completed => "completed",
            TransferStatus::Pending => "pending",
            TransferStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An outbound transfer execution request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Fresh per attempt, never reused on retry
    pub request_id: Uuid,
    /// Recipient CPF digits
    pub destination_identifier: String,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransferRequest {
    /// Build a request with a fresh idempotency token.
    pub fn new(destination: &Cpf, amount: Decimal, description: Option<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            destination_identifier: destination.as_str().to_string(),
            amount,
            description,
        }
    }
}

/// The service's acknowledgement, echoing the executed values
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReceipt {
    #[serde(default)]
    pub transfer_id: Option<String>,
    pub status: TransferStatus,
    pub destination_identifier: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One entry of the account's transfer history
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    #[serde(default)]
    pub transfer_id: Option<String>,
    pub status: TransferStatus,
    #[serde(default, alias = "recipientCpf", alias = "toAccount")]
    pub destination_identifier: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Typed client for the transfer service
#[derive(Debug, Clone)]
pub struct TransferClient {
    http: Http,
    base: String,
}

impl TransferClient {
    pub(crate) fn new(http: Http, base_url: &str) -> Self {
        Self {
            http,
            base: join_url(base_url, "api/transfer"),
        }
    }

    #[cfg(test)]
    pub(crate) fn base_url(&self) -> &str {
        &self.base
    }

    /// Execute a transfer. Issues exactly one request; retrying is the
    /// caller's decision and must use a new `TransferRequest`.
    pub async fn create(&self, request: &TransferRequest) -> Result<TransferReceipt, ApiError> {
        info!(
            request_id = %request.request_id,
            amount = %request.amount,
            "submitting transfer"
        );
        self.http.post(self.base.clone(), request).await
    }

    /// Transfer history of the authenticated account, newest first.
    pub async fn list(&self) -> Result<Vec<TransferRecord>, ApiError> {
        self.http.get(join_url(&self.base, "list")).await
    }

    /// A single transfer by id.
    pub async fn get(&self, transfer_id: &str) -> Result<TransferRecord, ApiError> {
        self.http
            .get(join_url(&self.base, transfer_id))
            .await
    }
}
