//! BankMore client core
//!
//! Client-side building blocks for the BankMore retail banking product:
//! CPF validation, the three-step transfer wizard and typed clients for the
//! three backing HTTP services. Rendering is the presentation layer's job;
//! this crate owns the logic underneath it.
//!
//! # Modules
//!
//! - [`identity`] - CPF validation and display formatting
//! - [`money`] - amount parsing and pt-BR currency formatting
//! - [`format`] - date, account-number and text display helpers
//! - [`fees`] - fee schedule and local quoting
//! - [`session`] - explicit authenticated-session context
//! - [`client`] - typed clients for the account, transfer and fee services
//! - [`wizard`] - the transfer wizard state machine
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing initialization

pub mod client;
pub mod config;
pub mod fees;
pub mod format;
pub mod identity;
pub mod logging;
pub mod money;
pub mod session;
pub mod wizard;

// Convenient re-exports at crate root
pub use client::{AccountClient, ApiContext, ApiError, FeeClient, TransferClient};
pub use config::AppConfig;
pub use fees::{Fee, FeeKind, FeeQuote, FeeSchedule};
pub use identity::{Cpf, CpfError, format_cpf, is_valid_cpf};
pub use money::{format_brl, parse_brl};
pub use session::{Session, SessionHandle};
pub use wizard::{
    DraftError, DraftFields, RemoteGateway, TransferDraft, TransferGateway, TransferWizard,
    WizardError, WizardState,
};
