//! Commission transition guard.
//!
//! [`guard`] decides whether an operation is legal for a commission in a
//! given status. It is a pure function: rules are checked in a fixed order
//! and the first one that matches decides the outcome.

use serde::{Deserialize, Serialize};

use super::CommissionStatus;

/// A lifecycle operation that can be requested on a commission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionOperation {
    /// Artist takes the commission on.
    Accept,
    /// Artist declines the commission.
    Reject,
    /// Artist delivers (or re-delivers) artwork.
    SubmitArtwork,
    /// Customer asks for changes to the delivered artwork.
    RequestRevision,
    /// Customer signs off on the delivered artwork.
    Approve,
    /// Either party calls the commission off.
    Cancel,
}

impl CommissionOperation {
    pub const ALL: [CommissionOperation; 6] = [
        CommissionOperation::Accept,
        CommissionOperation::Reject,
        CommissionOperation::SubmitArtwork,
        CommissionOperation::RequestRevision,
        CommissionOperation::Approve,
        CommissionOperation::Cancel,
    ];

    /// Human-readable verb phrase, used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionOperation::Accept => "accept",
            CommissionOperation::Reject => "reject",
            CommissionOperation::SubmitArtwork => "submit artwork",
            CommissionOperation::RequestRevision => "request revision",
            CommissionOperation::Approve => "approve",
            CommissionOperation::Cancel => "cancel",
        }
    }

    /// Operations that decide whether the commission goes ahead at all.
    fn is_decision(&self) -> bool {
        matches!(self, CommissionOperation::Accept | CommissionOperation::Reject)
    }

    /// Operations that act on delivered artwork.
    fn needs_artwork(&self) -> bool {
        matches!(
            self,
            CommissionOperation::Approve | CommissionOperation::RequestRevision
        )
    }
}

impl std::fmt::Display for CommissionOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a denial happened, for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialKind {
    /// The operation is not legal in the current status.
    InvalidTransaction,
    /// A revision was requested with no revisions left.
    NoRemainingRevision,
}

/// A refused transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denial {
    pub kind: DenialKind,
    pub reason: &'static str,
}

impl Denial {
    fn invalid(reason: &'static str) -> Self {
        Self {
            kind: DenialKind::InvalidTransaction,
            reason,
        }
    }
}

pub const REASON_CANCELLED: &str = "commission has been cancelled";
pub const REASON_ENDED: &str = "commission has ended";
pub const REASON_REJECTED: &str = "commission has been rejected";
pub const REASON_NOT_ACCEPTED: &str = "commission has yet to be accepted";
pub const REASON_ALREADY_ACCEPTED: &str = "commission has been accepted";
pub const REASON_ARTWORK_NOT_FINISHED: &str = "artwork not finished";
pub const REASON_NO_REVISIONS: &str = "no more revision can be made";

/// Decides whether `operation` may be applied.
///
/// Rules, in precedence order:
/// 1. cancelled commissions admit nothing;
/// 2. approved commissions admit nothing;
/// 3. rejected commissions admit nothing;
/// 4. everything but accept, reject and cancel needs an accepted commission;
/// 5. accept and reject are only possible before acceptance;
/// 6. approve and request revision need submitted artwork;
/// 7. request revision needs a remaining revision.
pub fn guard(
    status: CommissionStatus,
    remaining_revisions: u8,
    operation: CommissionOperation,
) -> Result<(), Denial> {
    match status {
        CommissionStatus::Cancelled => return Err(Denial::invalid(REASON_CANCELLED)),
        CommissionStatus::Approved => return Err(Denial::invalid(REASON_ENDED)),
        CommissionStatus::Rejected => return Err(Denial::invalid(REASON_REJECTED)),
        _ => {}
    }

    if !operation.is_decision()
        && operation != CommissionOperation::Cancel
        && !status.is_accepted()
    {
        return Err(Denial::invalid(REASON_NOT_ACCEPTED));
    }

    if status.is_accepted() && operation.is_decision() {
        return Err(Denial::invalid(REASON_ALREADY_ACCEPTED));
    }

    if operation.needs_artwork() && !status.is_artwork_submitted() {
        return Err(Denial::invalid(REASON_ARTWORK_NOT_FINISHED));
    }

    if operation == CommissionOperation::RequestRevision && remaining_revisions == 0 {
        return Err(Denial {
            kind: DenialKind::NoRemainingRevision,
            reason: REASON_NO_REVISIONS,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use CommissionOperation::*;
    use CommissionStatus as S;

    fn reason(status: CommissionStatus, remaining: u8, op: CommissionOperation) -> &'static str {
        guard(status, remaining, op).unwrap_err().reason
    }

    #[test]
    fn terminal_states_deny_everything_with_their_own_reason() {
        for op in CommissionOperation::ALL {
            assert_eq!(reason(S::Cancelled, 3, op), REASON_CANCELLED);
            assert_eq!(reason(S::Approved, 3, op), REASON_ENDED);
            assert_eq!(reason(S::Rejected, 3, op), REASON_REJECTED);
        }
    }

    #[test]
    fn pending_allows_only_decisions_and_cancel() {
        assert!(guard(S::Pending, 1, Accept).is_ok());
        assert!(guard(S::Pending, 1, Reject).is_ok());
        assert!(guard(S::Pending, 1, Cancel).is_ok());

        for op in [SubmitArtwork, RequestRevision, Approve] {
            assert_eq!(reason(S::Pending, 1, op), REASON_NOT_ACCEPTED);
        }
    }

    #[test]
    fn accepted_commission_cannot_be_decided_again() {
        for status in [S::Accepted, S::ArtworkSubmitted] {
            assert_eq!(reason(status, 1, Accept), REASON_ALREADY_ACCEPTED);
            assert_eq!(reason(status, 1, Reject), REASON_ALREADY_ACCEPTED);
        }
    }

    #[test]
    fn approve_and_revision_need_artwork() {
        assert_eq!(reason(S::Accepted, 1, Approve), REASON_ARTWORK_NOT_FINISHED);
        assert_eq!(
            reason(S::Accepted, 1, RequestRevision),
            REASON_ARTWORK_NOT_FINISHED
        );
        assert!(guard(S::ArtworkSubmitted, 1, Approve).is_ok());
        assert!(guard(S::ArtworkSubmitted, 1, RequestRevision).is_ok());
    }

    #[test]
    fn artwork_can_be_submitted_and_resubmitted() {
        assert!(guard(S::Accepted, 0, SubmitArtwork).is_ok());
        assert!(guard(S::ArtworkSubmitted, 0, SubmitArtwork).is_ok());
    }

    #[test]
    fn exhausted_budget_is_a_distinct_denial() {
        let denial = guard(S::ArtworkSubmitted, 0, RequestRevision).unwrap_err();
        assert_eq!(denial.kind, DenialKind::NoRemainingRevision);
        assert_eq!(denial.reason, REASON_NO_REVISIONS);
    }

    #[test]
    fn artwork_check_precedes_budget_check() {
        let denial = guard(S::Accepted, 0, RequestRevision).unwrap_err();
        assert_eq!(denial.kind, DenialKind::InvalidTransaction);
        assert_eq!(denial.reason, REASON_ARTWORK_NOT_FINISHED);
    }

    #[test]
    fn acceptance_check_precedes_artwork_check() {
        assert_eq!(reason(S::Pending, 0, RequestRevision), REASON_NOT_ACCEPTED);
    }

    #[test]
    fn cancel_is_allowed_from_every_live_state() {
        for status in [S::Pending, S::Accepted, S::ArtworkSubmitted] {
            assert!(guard(status, 0, Cancel).is_ok(), "{status}");
        }
    }

    #[test]
    fn operation_names() {
        assert_eq!(SubmitArtwork.to_string(), "submit artwork");
        assert_eq!(RequestRevision.to_string(), "request revision");
        assert_eq!(
            serde_json::to_string(&RequestRevision).unwrap(),
            "\"request_revision\""
        );
    }
}
