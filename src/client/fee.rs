//! Fee service client
//!
//! Read-only access to the fee schedule (`/api/fee`).

use super::{ApiError, Http, join_url};
use crate::fees::{Fee, FeeSchedule};

/// Typed client for the fee service
#[derive(Debug, Clone)]
pub struct FeeClient {
    http: Http,
    base: String,
}

impl FeeClient {
    pub(crate) fn new(http: Http, base_url: &str) -> Self {
        Self {
            http,
            base: join_url(base_url, "api/fee"),
        }
    }

    #[cfg(test)]
    pub(crate) fn base_url(&self) -> &str {
        &self.base
    }

    /// Fee entries of the authenticated account.
    pub async fn my_fees(&self) -> Result<Vec<Fee>, ApiError> {
        self.http.get(join_url(&self.base, "my")).await
    }

    /// A single fee entry by id.
    pub async fn fee(&self, fee_id: &str) -> Result<Fee, ApiError> {
        self.http
            .get(join_url(&self.base, &format!("fee/{}", fee_id)))
            .await
    }

    /// Fee entries published for a specific account.
    pub async fn fees_for_account(&self, account_number: &str) -> Result<Vec<Fee>, ApiError> {
        self.http.get(join_url(&self.base, account_number)).await
    }

    /// Fetch the authenticated account's entries as a quotable schedule.
    pub async fn schedule(&self) -> Result<FeeSchedule, ApiError> {
        Ok(FeeSchedule::new(self.my_fees().await?))
    }
}
