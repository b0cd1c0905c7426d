//! Account service client
//!
//! Authentication, balance, movements and profile management against the
//! account service (`/api/account`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::{Ack, ApiError, Http, join_url};
use crate::identity::{Cpf, CpfError, strip_non_digits};
use crate::session::Session;

/// Account operation errors: local form rejection or a remote failure
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("invalid CPF: {0}")]
    InvalidCpf(#[from] CpfError),

    #[error("invalid form data: {0}")]
    InvalidForm(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    cpf: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub account_number: String,
    pub name: String,
}

/// New-account registration form
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterForm {
    /// CPF, formatted or bare; stripped before sending
    pub cpf: String,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Profile fields the user may edit
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BalanceResponse {
    pub balance: Decimal,
}

/// Direction of an account movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    Credit,
    Debit,
}

impl MovementKind {
    /// Single-letter wire code
    pub fn code(&self) -> &'static str {
        match self {
            MovementKind::Credit => "C",
            MovementKind::Debit => "D",
        }
    }
}

impl Serialize for MovementKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// A deposit or withdrawal request. Carries its own idempotency token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub request_id: Uuid,
    pub account_number: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: MovementKind,
}

impl Movement {
    /// Build a movement with a fresh idempotency token.
    pub fn new(account_number: impl Into<String>, amount: Decimal, kind: MovementKind) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            account_number: account_number.into(),
            amount,
            kind,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Typed client for the account service
#[derive(Debug, Clone)]
pub struct AccountClient {
    http: Http,
    base: String,
}

impl AccountClient {
    pub(crate) fn new(http: Http, base_url: &str) -> Self {
        Self {
            http,
            base: join_url(base_url, "api/account"),
        }
    }

    #[cfg(test)]
    pub(crate) fn base_url(&self) -> &str {
        &self.base
    }

    /// Authenticate with CPF and password. The CPF is sent stripped of
    /// formatting. Returns the raw response without touching the session.
    pub async fn login(&self, cpf: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let digits = strip_non_digits(cpf);
        let body = LoginRequest {
            cpf: &digits,
            password,
        };
        self.http.post(join_url(&self.base, "login"), &body).await
    }

    /// Validate the CPF locally, authenticate, and store the resulting
    /// session in the shared handle.
    pub async fn sign_in(&self, cpf: &str, password: &str) -> Result<Session, AccountError> {
        let cpf = Cpf::parse(cpf)?;
        let response = self.login(cpf.as_str(), password).await?;

        let session = Session {
            token: response.token,
            account_number: response.account_number,
            name: response.name,
            cpf,
        };
        self.http.session().set(session.clone());
        info!(account = %session.account_number, "signed in");
        Ok(session)
    }

    /// Drop the stored session.
    pub fn sign_out(&self) {
        self.http.session().clear();
        info!("signed out");
    }

    /// Open a new account. The CPF and form constraints are checked
    /// locally before the request goes out.
    pub async fn register(&self, form: &RegisterForm) -> Result<Ack, AccountError> {
        let cpf = Cpf::parse(&form.cpf)?;
        form.validate()?;

        let body = RegisterForm {
            cpf: cpf.as_str().to_string(),
            name: form.name.clone(),
            password: form.password.clone(),
        };
        Ok(self.http.post(join_url(&self.base, "register"), &body).await?)
    }

    /// Current balance of the authenticated account.
    pub async fn balance(&self) -> Result<BalanceResponse, ApiError> {
        self.http.get(join_url(&self.base, "balance")).await
    }

    /// Balance of a specific account, used for pre-transfer checks.
    pub async fn account_balance(&self, account_number: &str) -> Result<BalanceResponse, ApiError> {
        self.http
            .get(join_url(&self.base, &format!("balance/{}", account_number)))
            .await
    }

    /// Whether an account number exists.
    pub async fn account_exists(&self, account_number: &str) -> Result<ExistsResponse, ApiError> {
        self.http
            .get(join_url(&self.base, &format!("exists/{}", account_number)))
            .await
    }

    /// Execute a deposit or withdrawal.
    pub async fn create_movement(&self, movement: &Movement) -> Result<Ack, ApiError> {
        info!(
            request_id = %movement.request_id,
            kind = movement.kind.code(),
            "submitting movement"
        );
        self.http.post(join_url(&self.base, "movement"), movement).await
    }

    /// Deactivate the authenticated account. Requires password confirmation.
    pub async fn deactivate(&self, password: &str) -> Result<Ack, ApiError> {
        #[derive(Serialize)]
        struct Body<'a> {
            password: &'a str,
        }
        self.http
            .put(join_url(&self.base, "deactivate"), &Body { password })
            .await
    }

    /// Update the user profile.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Ack, AccountError> {
        update.validate()?;
        Ok(self.http.put(join_url(&self.base, "profile"), update).await?)
    }

    /// Change the account password.
    pub async fn change_password(&self, current: &str, new: &str) -> Result<Ack, ApiError> {
        let body = ChangePasswordRequest {
            current_password: current,
            new_password: new,
        };
        self.http
            .put(join_url(&self.base, "change-password"), &body)
            .await
    }

    /// Probe whether the stored token is still accepted.
    ///
    /// A 401 clears the session as a side effect; every other failure is
    /// reported as-is so callers can distinguish a dead token from a dead
    /// service.
    pub async fn validate_token(&self) -> Result<bool, ApiError> {
        match self.balance().await {
            Ok(_) => Ok(true),
            Err(ApiError::Unauthorized) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_movement_wire_shape() {
        let movement = Movement::new("1234", Decimal::from_str("150.00").unwrap(), MovementKind::Credit);
        let json = serde_json::to_value(&movement).unwrap();

        assert_eq!(json["accountNumber"], "1234");
        assert_eq!(json["type"], "C");
        assert!(json["requestId"].is_string());
    }

    #[test]
    fn test_movement_tokens_are_fresh() {
        let a = Movement::new("1", Decimal::ONE, MovementKind::Debit);
        let b = Movement::new("1", Decimal::ONE, MovementKind::Debit);
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn test_register_form_constraints() {
        let form = RegisterForm {
            cpf: "529.982.247-25".to_string(),
            name: "Maria Silva".to_string(),
            password: "s3cret-pass".to_string(),
        };
        assert!(form.validate().is_ok());

        let short_password = RegisterForm {
            password: "short".to_string(),
            ..form.clone()
        };
        assert!(short_password.validate().is_err());

        let empty_name = RegisterForm {
            name: String::new(),
            ..form
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_profile_update_constraints() {
        let update = ProfileUpdate {
            name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
        };
        assert!(update.validate().is_ok());

        let bad_email = ProfileUpdate {
            email: "not-an-email".to_string(),
            ..update
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_movement_kind_codes() {
        assert_eq!(MovementKind::Credit.code(), "C");
        assert_eq!(MovementKind::Debit.code(), "D");
    }
}
