//! Wizard view-state definitions
//!
//! The step is a tagged union carrying only the data valid for that step:
//! no draft is reachable at `Entry`, and a receipt only exists at `Result`.

use std::fmt;

use super::draft::{DraftFields, TransferDraft};
use crate::client::transfer::TransferReceipt;

/// Current step of the transfer wizard
#[derive(Debug, Clone)]
pub enum WizardState {
    /// Collecting transfer parameters. Retains the last entered fields so
    /// a validation failure or "back" keeps the user's input.
    Entry { fields: DraftFields },

    /// A validated draft held while the user reviews it. `fields` is the
    /// input the draft was built from, restored on "back".
    Confirming {
        draft: TransferDraft,
        fields: DraftFields,
    },

    /// The service accepted the transfer; `receipt` echoes the values.
    Result { receipt: TransferReceipt },
}

impl WizardState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardState::Entry { .. } => "ENTRY",
            WizardState::Confirming { .. } => "CONFIRMING",
            WizardState::Result { .. } => "RESULT",
        }
    }

    #[inline]
    pub fn is_entry(&self) -> bool {
        matches!(self, WizardState::Entry { .. })
    }

    #[inline]
    pub fn is_confirming(&self) -> bool {
        matches!(self, WizardState::Confirming { .. })
    }

    #[inline]
    pub fn is_result(&self) -> bool {
        matches!(self, WizardState::Result { .. })
    }
}

impl Default for WizardState {
    fn default() -> Self {
        WizardState::Entry {
            fields: DraftFields::default(),
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_entry() {
        let state = WizardState::default();
        assert!(state.is_entry());
        match state {
            WizardState::Entry { fields } => assert_eq!(fields, DraftFields::default()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_step_names() {
        assert_eq!(WizardState::default().as_str(), "ENTRY");
        assert_eq!(WizardState::default().to_string(), "ENTRY");
    }

    #[test]
    fn test_step_predicates() {
        let state = WizardState::default();
        assert!(state.is_entry());
        assert!(!state.is_confirming());
        assert!(!state.is_result());
    }
}
