//! Transfer wizard controller
//!
//! Owns the wizard state exclusively: every mutation happens here, in
//! response to a user action or a completed network response. One
//! submission may be in flight at a time, and a response that arrives
//! after the wizard moved on is ignored.

use std::sync::{Arc, Mutex, MutexGuard};

use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::draft::{DraftError, DraftFields, TransferDraft};
use super::gateway::{GatewayError, TransferGateway};
use super::state::WizardState;
use crate::client::transfer::{TransferReceipt, TransferRecord, TransferRequest};

/// Wizard action errors
#[derive(Debug, Error)]
pub enum WizardError {
    /// Entry-form rejection; the state stays at `Entry`
    #[error(transparent)]
    Validation(#[from] DraftError),

    /// The service rejected the transfer or was unreachable; the wizard
    /// returned to `Entry`
    #[error(transparent)]
    Submission(#[from] GatewayError),

    #[error("the entry form is not active")]
    NotAtEntry,

    #[error("no draft is awaiting confirmation")]
    NotConfirming,

    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// The wizard was reset or sent back while the submission was pending;
    /// the late response was discarded
    #[error("the pending submission was superseded")]
    Superseded,
}

struct Inner {
    state: WizardState,
    /// Advisory balance; stale values are caught by the service
    balance: Decimal,
    recent: Vec<TransferRecord>,
    /// Bumped whenever a pending response must be discarded
    epoch: u64,
    in_flight: bool,
}

struct Shared {
    inner: Mutex<Inner>,
    state_tx: watch::Sender<WizardState>,
    gateway: Arc<dyn TransferGateway>,
}

/// The three-step transfer wizard: `Entry -> Confirming -> Result`
#[derive(Clone)]
pub struct TransferWizard {
    shared: Arc<Shared>,
}

impl TransferWizard {
    pub fn new(gateway: Arc<dyn TransferGateway>) -> Self {
        let state = WizardState::default();
        let (state_tx, _) = watch::channel(state.clone());
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state,
                    balance: Decimal::ZERO,
                    recent: Vec::new(),
                    epoch: 0,
                    in_flight: false,
                }),
                state_tx,
                gateway,
            }),
        }
    }

    /// Snapshot of the current step.
    pub fn state(&self) -> WizardState {
        self.lock().state.clone()
    }

    /// Subscribe to step changes.
    pub fn watch_state(&self) -> watch::Receiver<WizardState> {
        self.shared.state_tx.subscribe()
    }

    /// Last fetched balance. Zero until the first successful refresh.
    pub fn balance(&self) -> Decimal {
        self.lock().balance
    }

    /// Last fetched activity, newest first.
    pub fn recent_transfers(&self) -> Vec<TransferRecord> {
        self.lock().recent.clone()
    }

    /// Whether a submission is currently in flight (confirm is disabled).
    pub fn is_submitting(&self) -> bool {
        self.lock().in_flight
    }

    /// Fetch balance and recent activity from the collaborators.
    ///
    /// Best-effort: a failed fetch is logged and the previous value kept.
    pub async fn refresh(&self) {
        match self.shared.gateway.balance().await {
            Ok(balance) => self.lock().balance = balance,
            Err(e) => warn!(error = %e, "balance refresh failed"),
        }
        match self.shared.gateway.recent_transfers().await {
            Ok(recent) => self.lock().recent = recent,
            Err(e) => warn!(error = %e, "activity refresh failed"),
        }
    }

    /// Validate the entry form and advance to the confirmation step.
    ///
    /// On rejection the wizard stays at `Entry`, keeping the attempted
    /// input, and the error names the offending field.
    pub fn submit_draft(&self, fields: DraftFields) -> Result<(), WizardError> {
        let mut inner = self.lock();
        if !inner.state.is_entry() {
            return Err(WizardError::NotAtEntry);
        }

        match TransferDraft::from_fields(&fields, inner.balance) {
            Ok(draft) => {
                debug!(amount = %draft.amount(), "draft accepted");
                inner.state = WizardState::Confirming { draft, fields };
                self.publish(&inner);
                Ok(())
            }
            Err(e) => {
                debug!(field = e.field(), error = %e, "draft rejected");
                inner.state = WizardState::Entry { fields };
                self.publish(&inner);
                Err(WizardError::Validation(e))
            }
        }
    }

    /// Return from confirmation to the entry form, keeping the entered
    /// values for editing. A pending submission is superseded.
    pub fn back(&self) -> Result<(), WizardError> {
        let mut inner = self.lock();
        let WizardState::Confirming { fields, .. } = &inner.state else {
            return Err(WizardError::NotConfirming);
        };

        let fields = fields.clone();
        inner.state = WizardState::Entry { fields };
        inner.epoch += 1;
        inner.in_flight = false;
        self.publish(&inner);
        Ok(())
    }

    /// Discard everything and return to a fresh entry form. A pending
    /// submission is superseded.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.state = WizardState::default();
        inner.epoch += 1;
        inner.in_flight = false;
        self.publish(&inner);
    }

    /// Submit the confirmed draft.
    ///
    /// Exactly one outbound request is issued per accepted invocation,
    /// carrying a fresh idempotency token. While it is in flight further
    /// confirms are rejected. Success advances to `Result` and triggers a
    /// non-blocking refresh; failure returns the wizard to `Entry`.
    pub async fn confirm(&self) -> Result<TransferReceipt, WizardError> {
        let (request, fields, epoch) = {
            let mut inner = self.lock();
            let WizardState::Confirming { draft, fields } = &inner.state else {
                return Err(WizardError::NotConfirming);
            };
            if inner.in_flight {
                return Err(WizardError::SubmissionInFlight);
            }

            let request = TransferRequest::new(
                draft.recipient(),
                draft.amount(),
                draft.description().map(str::to_string),
            );
            let fields = fields.clone();
            inner.in_flight = true;
            (request, fields, inner.epoch)
        };

        info!(request_id = %request.request_id, amount = %request.amount, "submitting transfer");
        let outcome = self.shared.gateway.execute_transfer(request).await;

        let mut inner = self.lock();
        if inner.epoch != epoch {
            debug!("discarding response for a superseded submission");
            return Err(WizardError::Superseded);
        }
        inner.in_flight = false;

        match outcome {
            Ok(receipt) => {
                info!(transfer_id = ?receipt.transfer_id, "transfer accepted");
                inner.state = WizardState::Result {
                    receipt: receipt.clone(),
                };
                self.publish(&inner);
                drop(inner);
                self.spawn_refresh();
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "transfer submission failed");
                inner.state = WizardState::Entry { fields };
                self.publish(&inner);
                Err(WizardError::Submission(e))
            }
        }
    }

    fn spawn_refresh(&self) {
        let wizard = self.clone();
        tokio::spawn(async move {
            wizard.refresh().await;
        });
    }

    fn publish(&self, inner: &Inner) {
        self.shared.state_tx.send_replace(inner.state.clone());
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.shared.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::gateway::mock::MockGateway;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn wizard_with_balance(balance: &str) -> (TransferWizard, Arc<MockGateway>) {
        let gateway = Arc::new(MockGateway::new(dec(balance)));
        (TransferWizard::new(gateway.clone()), gateway)
    }

    fn valid_fields() -> DraftFields {
        DraftFields {
            recipient_cpf: "529.982.247-25".to_string(),
            amount: "100.00".to_string(),
            description: "rent".to_string(),
        }
    }

    #[tokio::test]
    async fn test_starts_at_entry_with_zero_balance() {
        let (wizard, _) = wizard_with_balance("500");
        assert!(wizard.state().is_entry());
        assert_eq!(wizard.balance(), Decimal::ZERO);

        wizard.refresh().await;
        assert_eq!(wizard.balance(), dec("500"));
    }

    #[tokio::test]
    async fn test_submit_draft_advances_to_confirming() {
        let (wizard, _) = wizard_with_balance("500");
        wizard.refresh().await;

        wizard.submit_draft(valid_fields()).unwrap();
        assert!(wizard.state().is_confirming());
    }

    #[tokio::test]
    async fn test_invalid_draft_stays_at_entry_with_fields() {
        let (wizard, _) = wizard_with_balance("500");
        wizard.refresh().await;

        let mut fields = valid_fields();
        fields.amount = "0".to_string();
        let err = wizard.submit_draft(fields.clone()).unwrap_err();
        assert!(matches!(err, WizardError::Validation(_)));

        match wizard.state() {
            WizardState::Entry { fields: kept } => assert_eq!(kept, fields),
            other => panic!("expected Entry, got {}", other),
        }
    }

    #[tokio::test]
    async fn test_back_keeps_entered_values() {
        let (wizard, _) = wizard_with_balance("500");
        wizard.refresh().await;

        wizard.submit_draft(valid_fields()).unwrap();
        wizard.back().unwrap();

        match wizard.state() {
            WizardState::Entry { fields } => assert_eq!(fields, valid_fields()),
            other => panic!("expected Entry, got {}", other),
        }
    }

    #[tokio::test]
    async fn test_confirm_outside_confirming_is_rejected() {
        let (wizard, gateway) = wizard_with_balance("500");
        let err = wizard.confirm().await.unwrap_err();
        assert!(matches!(err, WizardError::NotConfirming));
        assert_eq!(gateway.transfer_calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_draft_outside_entry_is_rejected() {
        let (wizard, _) = wizard_with_balance("500");
        wizard.refresh().await;
        wizard.submit_draft(valid_fields()).unwrap();

        let err = wizard.submit_draft(valid_fields()).unwrap_err();
        assert!(matches!(err, WizardError::NotAtEntry));
    }
}
