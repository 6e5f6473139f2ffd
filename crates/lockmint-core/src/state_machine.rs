use crate::domain::WalletPosition;
use crate::ports::PortError;

/// Lifecycle of a lock or redeem submission. One submission is in flight at
/// a time; a new `Submit` is only legal from `Idle`, `Confirmed` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    /// Dispatched to the node, no hash assigned yet.
    Submitting,
    /// Hash assigned, waiting for the receipt.
    Pending,
    Confirmed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionAction {
    Submit,
    HashAssigned,
    Confirm,
    Fail,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub from: SubmissionPhase,
    pub to: SubmissionPhase,
    pub reason: &'static str,
}

/// Applies `action` to `phase`, returning the next phase and a transition
/// record. Illegal pairs are rejected rather than silently absorbed.
pub fn submission_transition(
    phase: SubmissionPhase,
    action: SubmissionAction,
) -> Result<(SubmissionPhase, StateTransition), PortError> {
    use SubmissionAction as A;
    use SubmissionPhase as P;

    let (to, reason) = match (phase, action) {
        (P::Idle | P::Confirmed | P::Failed, A::Submit) => {
            (P::Submitting, "submission dispatched")
        }
        (P::Submitting, A::HashAssigned) => (P::Pending, "transaction hash assigned"),
        // A provider may settle without ever reporting the hash.
        (P::Submitting | P::Pending, A::Confirm) => (P::Confirmed, "receipt confirmed"),
        (P::Submitting | P::Pending, A::Fail) => (P::Failed, "submission failed"),
        (P::Confirmed | P::Failed, A::Reset) => (P::Idle, "cleared"),
        (from, action) => {
            return Err(PortError::Validation(format!(
                "illegal submission transition: {from:?} on {action:?}"
            )))
        }
    };

    Ok((
        to,
        StateTransition {
            from: phase,
            to,
            reason,
        },
    ))
}

/// The redeem button is active only for a wallet that holds a lock which has
/// matured.
pub fn redeem_enabled(position: &WalletPosition) -> bool {
    position.is_locked && position.can_redeem
}

/// The lock action is offered only while the wallet holds no active lock.
pub fn lock_available(position: &WalletPosition) -> bool {
    !position.is_locked
}

/// A short allowance does not disable the lock button; the pool's revert
/// comes back through the error alert instead. Only an in-flight submission
/// pauses it.
pub fn lock_button_enabled(position: &WalletPosition, processing: bool) -> bool {
    lock_available(position) && !processing
}

pub fn redeem_button_enabled(position: &WalletPosition, processing: bool) -> bool {
    redeem_enabled(position) && !processing
}
