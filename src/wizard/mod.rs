//! Three-step transfer wizard
//!
//! Collects transfer parameters, holds them across a confirmation step and
//! submits exactly once per user confirmation.
//!
//! # State Machine
//!
//! ```text
//! ENTRY ── submit_draft ──> CONFIRMING ── confirm ──> RESULT
//!   ^                          │    │                   │
//!   │<──── back (keep input) ──┘    │                   │
//!   │<──── submit failure ──────────┘                   │
//!   │<──────────────── reset (discard) ─────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. A draft exists only after passing validation; `Entry` carries raw
//!    input, never a draft.
//! 2. Each confirm issues at most one outbound request, with a fresh
//!    idempotency token per attempt.
//! 3. A response arriving after `reset`/`back` is discarded; it never
//!    mutates a wizard the user has already moved past.

pub mod controller;
pub mod draft;
pub mod gateway;
pub mod state;


// Re-exports for convenience
pub use controller::{TransferWizard, WizardError};
pub use draft::{DraftError, DraftFields, MAX_DESCRIPTION_LEN, TransferDraft};
pub use gateway::{GatewayError, RemoteGateway, TransferGateway};
pub use state::WizardState;
