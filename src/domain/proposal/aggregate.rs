//! Proposal aggregate entity.
//!
//! A proposal is a negotiation between a sender and a receiver over the
//! duties each side commits to. Status changes follow `ProposalStatus`'s
//! state machine; every counter-offer archives the superseded terms as a
//! `ProposalHistory` entry.

use crate::domain::foundation::{ProposalId, StateMachine, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::{DutyTerms, ProposalError, ProposalHistory, ProposalStatus};

const ONLY_DRAFTS_CAN_BE_SENT: &str = "Only drafts can be sent";
const ONLY_OPEN_CAN_BE_ACCEPTED: &str = "Can only accept sent / countered proposals";
const ONLY_OPEN_CAN_BE_REJECTED: &str = "Can only reject sent / countered proposals";
const ONLY_OPEN_CAN_BE_COUNTERED: &str = "Can only counter sent / countered proposals";

/// Proposal aggregate.
///
/// # Invariants
///
/// - `sender != receiver`
/// - `status` only changes along `ProposalStatus::valid_transitions`
/// - `terms` hold the latest opening or countered duties
/// - `verified_at` is only set on accepted proposals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    id: ProposalId,
    status: ProposalStatus,
    sender: UserId,
    receiver: UserId,
    terms: DutyTerms,
    created_at: Timestamp,
    updated_at: Timestamp,
    /// Set once an administrator has completed the offline verification.
    verified_at: Option<Timestamp>,
}

impl Proposal {
    /// Create a new draft proposal.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if sender and receiver are the same party
    pub fn new(
        id: ProposalId,
        sender: UserId,
        receiver: UserId,
        terms: DutyTerms,
    ) -> Result<Self, ProposalError> {
        if sender == receiver {
            return Err(ProposalError::validation(
                "receiver",
                "You cannot send a proposal to yourself.",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            status: ProposalStatus::Draft,
            sender,
            receiver,
            terms,
            created_at: now,
            updated_at: now,
            verified_at: None,
        })
    }

    /// Reconstitute a proposal from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ProposalId,
        status: ProposalStatus,
        sender: UserId,
        receiver: UserId,
        terms: DutyTerms,
        created_at: Timestamp,
        updated_at: Timestamp,
        verified_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            status,
            sender,
            receiver,
            terms,
            created_at,
            updated_at,
            verified_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ProposalId {
        &self.id
    }

    pub fn status(&self) -> ProposalStatus {
        self.status
    }

    pub fn sender(&self) -> &UserId {
        &self.sender
    }

    pub fn receiver(&self) -> &UserId {
        &self.receiver
    }

    pub fn terms(&self) -> &DutyTerms {
        &self.terms
    }

    pub fn sender_duties(&self) -> &str {
        self.terms.sender_duties()
    }

    pub fn receiver_duties(&self) -> &str {
        self.terms.receiver_duties()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn verified_at(&self) -> Option<&Timestamp> {
        self.verified_at.as_ref()
    }

    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Parties
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_sender(&self, user: &UserId) -> bool {
        &self.sender == user
    }

    pub fn is_receiver(&self, user: &UserId) -> bool {
        &self.receiver == user
    }

    pub fn is_party(&self, user: &UserId) -> bool {
        self.is_sender(user) || self.is_receiver(user)
    }

    /// The other side of the negotiation, if `user` is a party at all.
    pub fn counterpart_of(&self, user: &UserId) -> Option<&UserId> {
        if self.is_sender(user) {
            Some(&self.receiver)
        } else if self.is_receiver(user) {
            Some(&self.sender)
        } else {
            None
        }
    }

    /// Both parties can read the current state; nobody else can.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if `user` is neither sender nor receiver
    pub fn authorize_view(&self, user: &UserId) -> Result<(), ProposalError> {
        if self.is_party(user) {
            Ok(())
        } else {
            Err(ProposalError::forbidden("You are not part of this proposal."))
        }
    }

    /// Whose turn it is: the receiver answers a sent or countered proposal,
    /// the sender may only answer once it has been countered.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if `user` may not respond in the current status
    pub fn authorize_response(&self, user: &UserId) -> Result<(), ProposalError> {
        let allowed = (self.is_receiver(user) && self.status.is_open_for_response())
            || (self.is_sender(user) && self.status == ProposalStatus::Countered);
        if allowed {
            Ok(())
        } else {
            Err(ProposalError::forbidden("Action not allowed."))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Draft → Sent.
    ///
    /// # Errors
    ///
    /// - `IllegalTransition` unless the proposal is a draft
    pub fn send(&mut self) -> Result<(), ProposalError> {
        self.move_to(ProposalStatus::Sent, ONLY_DRAFTS_CAN_BE_SENT)
    }

    /// Sent | Countered → Accepted.
    ///
    /// # Errors
    ///
    /// - `IllegalTransition` unless the proposal is sent or countered
    pub fn accept(&mut self) -> Result<(), ProposalError> {
        self.move_to(ProposalStatus::Accepted, ONLY_OPEN_CAN_BE_ACCEPTED)
    }

    /// Sent | Countered → Rejected.
    ///
    /// # Errors
    ///
    /// - `IllegalTransition` unless the proposal is sent or countered
    pub fn reject(&mut self) -> Result<(), ProposalError> {
        self.move_to(ProposalStatus::Rejected, ONLY_OPEN_CAN_BE_REJECTED)
    }

    /// Sent | Countered → Countered with new terms.
    ///
    /// Returns the history entry holding the terms that were replaced. The
    /// caller is responsible for persisting it alongside the proposal.
    ///
    /// # Errors
    ///
    /// - `IllegalTransition` unless the proposal is sent or countered
    pub fn counter(&mut self, terms: DutyTerms) -> Result<ProposalHistory, ProposalError> {
        if !self.status.can_transition_to(&ProposalStatus::Countered) {
            return Err(ProposalError::illegal_transition(ONLY_OPEN_CAN_BE_COUNTERED));
        }

        let previous = std::mem::replace(&mut self.terms, terms);
        self.status = ProposalStatus::Countered;
        self.updated_at = Timestamp::now();
        Ok(ProposalHistory::snapshot(self.id, previous))
    }

    /// Records that the offline verification of an accepted proposal is done.
    ///
    /// Returns `false` when the proposal was already verified.
    ///
    /// # Errors
    ///
    /// - `IllegalTransition` unless the proposal is accepted
    pub fn mark_verified(&mut self) -> Result<bool, ProposalError> {
        if self.status != ProposalStatus::Accepted {
            return Err(ProposalError::illegal_transition(
                "Only accepted proposals can be verified",
            ));
        }
        if self.verified_at.is_some() {
            return Ok(false);
        }
        let now = Timestamp::now();
        self.verified_at = Some(now);
        self.updated_at = now;
        Ok(true)
    }

    fn move_to(&mut self, target: ProposalStatus, message: &str) -> Result<(), ProposalError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| ProposalError::illegal_transition(message))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operator() -> UserId {
        UserId::new("operator-1").unwrap()
    }

    fn vendor() -> UserId {
        UserId::new("vendor-1").unwrap()
    }

    fn stranger() -> UserId {
        UserId::new("stranger").unwrap()
    }

    fn draft() -> Proposal {
        Proposal::new(
            ProposalId::new(),
            operator(),
            vendor(),
            DutyTerms::opening("Bring 15 tourists on Fridays", Some("Serve laksa".into())).unwrap(),
        )
        .unwrap()
    }

    fn with_status(status: ProposalStatus) -> Proposal {
        let mut p = draft();
        match status {
            ProposalStatus::Draft => {}
            ProposalStatus::Sent => p.send().unwrap(),
            ProposalStatus::Accepted => {
                p.send().unwrap();
                p.accept().unwrap();
            }
            ProposalStatus::Rejected => {
                p.send().unwrap();
                p.reject().unwrap();
            }
            ProposalStatus::Countered => {
                p.send().unwrap();
                p.counter(DutyTerms::counter("Bring 10", "Serve rojak").unwrap())
                    .unwrap();
            }
        }
        p
    }

    fn counter_terms() -> DutyTerms {
        DutyTerms::counter("Bring 20 tourists", "Serve laksa and chendol").unwrap()
    }

    // Construction

    #[test]
    fn new_proposal_is_draft() {
        let p = draft();
        assert_eq!(p.status(), ProposalStatus::Draft);
        assert!(!p.is_verified());
    }

    #[test]
    fn cannot_propose_to_yourself() {
        let result = Proposal::new(
            ProposalId::new(),
            vendor(),
            vendor(),
            DutyTerms::opening("x", None).unwrap(),
        );
        assert!(matches!(result, Err(ProposalError::ValidationFailed { .. })));
    }

    // Draft

    #[test]
    fn draft_can_only_be_sent() {
        assert!(with_status(ProposalStatus::Draft).accept().unwrap_err().is_illegal_transition());
        assert!(with_status(ProposalStatus::Draft).reject().unwrap_err().is_illegal_transition());
        assert!(with_status(ProposalStatus::Draft)
            .counter(counter_terms())
            .unwrap_err()
            .is_illegal_transition());

        let mut p = draft();
        p.send().unwrap();
        assert_eq!(p.status(), ProposalStatus::Sent);
    }

    // Open states

    #[test]
    fn open_states_accept_reject_and_counter() {
        for status in [ProposalStatus::Sent, ProposalStatus::Countered] {
            let mut p = with_status(status);
            p.accept().unwrap();
            assert_eq!(p.status(), ProposalStatus::Accepted);

            let mut p = with_status(status);
            p.reject().unwrap();
            assert_eq!(p.status(), ProposalStatus::Rejected);

            let mut p = with_status(status);
            p.counter(counter_terms()).unwrap();
            assert_eq!(p.status(), ProposalStatus::Countered);
        }
    }

    #[test]
    fn open_states_cannot_be_sent_again() {
        for status in [ProposalStatus::Sent, ProposalStatus::Countered] {
            let err = with_status(status).send().unwrap_err();
            assert_eq!(err, ProposalError::illegal_transition("Only drafts can be sent"));
        }
    }

    // Terminal states

    #[test]
    fn terminal_states_refuse_everything() {
        for status in [ProposalStatus::Accepted, ProposalStatus::Rejected] {
            let mut p = with_status(status);
            let before = p.clone();
            assert!(p.send().unwrap_err().is_illegal_transition());
            assert!(p.accept().unwrap_err().is_illegal_transition());
            assert!(p.reject().unwrap_err().is_illegal_transition());
            assert!(p.counter(counter_terms()).unwrap_err().is_illegal_transition());
            assert_eq!(p, before);
        }
    }

    // Counter

    #[test]
    fn counter_snapshots_previous_terms() {
        let mut p = with_status(ProposalStatus::Sent);
        let entry = p.counter(counter_terms()).unwrap();

        assert_eq!(entry.proposal_id(), p.id());
        assert_eq!(entry.sender_duties(), "Bring 15 tourists on Fridays");
        assert_eq!(entry.receiver_duties(), "Serve laksa");
        assert_eq!(p.sender_duties(), "Bring 20 tourists");
        assert_eq!(p.receiver_duties(), "Serve laksa and chendol");
    }

    #[test]
    fn failed_counter_leaves_terms_untouched() {
        let mut p = with_status(ProposalStatus::Accepted);
        let _ = p.counter(counter_terms());
        assert_eq!(p.sender_duties(), "Bring 15 tourists on Fridays");
    }

    // Authorization

    #[test]
    fn only_parties_can_view() {
        let p = draft();
        assert!(p.authorize_view(&operator()).is_ok());
        assert!(p.authorize_view(&vendor()).is_ok());
        assert!(matches!(
            p.authorize_view(&stranger()),
            Err(ProposalError::Forbidden(_))
        ));
    }

    #[test]
    fn receiver_responds_to_sent_proposal_but_sender_does_not() {
        let p = with_status(ProposalStatus::Sent);
        assert!(p.authorize_response(&vendor()).is_ok());
        assert!(p.authorize_response(&operator()).is_err());
    }

    #[test]
    fn both_parties_respond_to_countered_proposal() {
        let p = with_status(ProposalStatus::Countered);
        assert!(p.authorize_response(&vendor()).is_ok());
        assert!(p.authorize_response(&operator()).is_ok());
        assert!(p.authorize_response(&stranger()).is_err());
    }

    #[test]
    fn nobody_responds_to_closed_or_draft_proposals() {
        for status in [ProposalStatus::Draft, ProposalStatus::Accepted, ProposalStatus::Rejected] {
            let p = with_status(status);
            assert!(p.authorize_response(&vendor()).is_err());
            assert!(p.authorize_response(&operator()).is_err());
        }
    }

    #[test]
    fn counterpart_is_the_other_party() {
        let p = draft();
        assert_eq!(p.counterpart_of(&operator()), Some(&vendor()));
        assert_eq!(p.counterpart_of(&vendor()), Some(&operator()));
        assert_eq!(p.counterpart_of(&stranger()), None);
    }

    // Verification

    #[test]
    fn verification_requires_accepted_status() {
        assert!(with_status(ProposalStatus::Sent).mark_verified().is_err());

        let mut p = with_status(ProposalStatus::Accepted);
        assert_eq!(p.mark_verified(), Ok(true));
        assert!(p.is_verified());
        assert_eq!(p.mark_verified(), Ok(false));
    }
}
