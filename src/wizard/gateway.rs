//! Collaborator port for the transfer wizard
//!
//! The wizard drives three remote operations it cannot implement itself:
//! the advisory balance, the authoritative transfer execution and the
//! recent-activity view. [`RemoteGateway`] wires them to the typed service
//! clients; tests substitute a mock.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::client::transfer::{TransferReceipt, TransferRecord, TransferRequest};
use crate::client::{AccountClient, ApiError, TransferClient};

/// Submission failures as the wizard sees them.
///
/// A rejection and a transport failure are handled identically past the
/// entry step: the wizard returns to `Entry` and surfaces the reason.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("transfer rejected: {0}")]
    Rejected(String),

    #[error("service unreachable: {0}")]
    Transport(String),
}

impl From<ApiError> for GatewayError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Unauthorized => GatewayError::Rejected("authentication required".into()),
            ApiError::Service { message, .. } => GatewayError::Rejected(message),
            ApiError::Transport(msg) | ApiError::Decode(msg) => GatewayError::Transport(msg),
        }
    }
}

/// Remote operations the wizard depends on
#[async_trait]
pub trait TransferGateway: Send + Sync {
    /// Current balance, used as an advisory upper bound at entry time.
    async fn balance(&self) -> Result<Decimal, GatewayError>;

    /// Execute a transfer. Must be called at most once per request value;
    /// the request carries its own idempotency token.
    async fn execute_transfer(
        &self,
        request: TransferRequest,
    ) -> Result<TransferReceipt, GatewayError>;

    /// Recent transfer activity for the side view. Not required for the
    /// wizard's correctness.
    async fn recent_transfers(&self) -> Result<Vec<TransferRecord>, GatewayError>;
}

/// Gateway backed by the account and transfer services
pub struct RemoteGateway {
    account: AccountClient,
    transfer: TransferClient,
}

impl RemoteGateway {
    pub fn new(account: AccountClient, transfer: TransferClient) -> Self {
        Self { account, transfer }
    }
}

#[async_trait]
impl TransferGateway for RemoteGateway {
    async fn balance(&self) -> Result<Decimal, GatewayError> {
        Ok(self.account.balance().await?.balance)
    }

    async fn execute_transfer(
        &self,
        request: TransferRequest,
    ) -> Result<TransferReceipt, GatewayError> {
        Ok(self.transfer.create(&request).await?)
    }

    async fn recent_transfers(&self) -> Result<Vec<TransferRecord>, GatewayError> {
        Ok(self.transfer.list().await?)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_mapping() {
        assert_eq!(
            GatewayError::from(ApiError::Service {
                status: 422,
                message: "insufficient funds".into(),
            }),
            GatewayError::Rejected("insufficient funds".into())
        );
        assert_eq!(
            GatewayError::from(ApiError::Transport("timeout".into())),
            GatewayError::Transport("timeout".into())
        );
        assert!(matches!(
            GatewayError::from(ApiError::Unauthorized),
            GatewayError::Rejected(_)
        ));
    }
}
