//! ProposalTransitionService - applies status changes to proposals.
//!
//! Each operation validates the transition on the aggregate, persists the
//! result, and then tells the notifier. The caller's proposal is only
//! replaced once the new state has been stored, so a refused or failed
//! transition leaves it exactly as it was.
//!
//! Once the new state is stored the transition has happened. Notifier and
//! agreement-queue failures after that point are logged, never returned.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::foundation::DomainError;
use crate::domain::proposal::{ActingContext, DutyTerms, Proposal, ProposalError, ProposalHistory};
use crate::ports::{AgreementQueue, ProposalNotifier, ProposalRepository};

pub struct ProposalTransitionService {
    repository: Arc<dyn ProposalRepository>,
    notifier: Arc<dyn ProposalNotifier>,
    agreements: Arc<dyn AgreementQueue>,
}

impl ProposalTransitionService {
    pub fn new(
        repository: Arc<dyn ProposalRepository>,
        notifier: Arc<dyn ProposalNotifier>,
        agreements: Arc<dyn AgreementQueue>,
    ) -> Self {
        Self {
            repository,
            notifier,
            agreements,
        }
    }

    /// Draft → Sent, then `new_proposal`.
    pub async fn send(
        &self,
        proposal: &mut Proposal,
        ctx: &ActingContext,
    ) -> Result<(), ProposalError> {
        let mut next = proposal.clone();
        next.send()
            .map_err(|err| refused(proposal, ctx, "send", err))?;

        self.commit(proposal, next, None, ctx, "send").await?;
        followup(
            proposal,
            ctx,
            "new_proposal",
            self.notifier.new_proposal(proposal, ctx).await,
        );
        Ok(())
    }

    /// Sent | Countered → Accepted, then `accepted` and one agreement-queue entry.
    ///
    /// The queue entry is made even when the `accepted` notice fails.
    pub async fn accept(
        &self,
        proposal: &mut Proposal,
        ctx: &ActingContext,
    ) -> Result<(), ProposalError> {
        let mut next = proposal.clone();
        next.accept()
            .map_err(|err| refused(proposal, ctx, "accept", err))?;

        self.commit(proposal, next, None, ctx, "accept").await?;
        followup(
            proposal,
            ctx,
            "accepted",
            self.notifier.accepted(proposal, ctx).await,
        );
        followup(
            proposal,
            ctx,
            "new_agreement",
            self.agreements.new_agreement(proposal).await,
        );
        Ok(())
    }

    /// Sent | Countered → Rejected, then `rejected`.
    pub async fn reject(
        &self,
        proposal: &mut Proposal,
        ctx: &ActingContext,
    ) -> Result<(), ProposalError> {
        let mut next = proposal.clone();
        next.reject()
            .map_err(|err| refused(proposal, ctx, "reject", err))?;

        self.commit(proposal, next, None, ctx, "reject").await?;
        followup(
            proposal,
            ctx,
            "rejected",
            self.notifier.rejected(proposal, ctx).await,
        );
        Ok(())
    }

    /// Sent | Countered → Countered with new duties.
    ///
    /// Both duty texts are validated before anything else happens. The
    /// superseded duties are written to history in the same repository call
    /// that updates the proposal row.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if either duty text is blank
    /// - `IllegalTransition` unless the proposal is sent or countered
    pub async fn counter(
        &self,
        proposal: &mut Proposal,
        sender_duties: impl Into<String>,
        receiver_duties: impl Into<String>,
        ctx: &ActingContext,
    ) -> Result<(), ProposalError> {
        let terms = DutyTerms::counter(sender_duties, receiver_duties)?;

        let mut next = proposal.clone();
        let entry = next
            .counter(terms)
            .map_err(|err| refused(proposal, ctx, "counter", err))?;

        self.commit(proposal, next, Some(&entry), ctx, "counter")
            .await?;
        followup(
            proposal,
            ctx,
            "countered",
            self.notifier.countered(proposal, ctx).await,
        );
        Ok(())
    }

    async fn commit(
        &self,
        proposal: &mut Proposal,
        next: Proposal,
        history: Option<&ProposalHistory>,
        ctx: &ActingContext,
        action: &'static str,
    ) -> Result<(), ProposalError> {
        let stored = match history {
            Some(entry) => self.repository.update_with_history(&next, entry).await,
            None => self.repository.update(&next).await,
        };
        if let Err(err) = stored {
            error!(
                proposal_id = %next.id(),
                correlation_id = ctx.correlation_id(),
                action,
                error = %err,
                "Failed to persist proposal transition"
            );
            return Err(err.into());
        }

        info!(
            proposal_id = %next.id(),
            actor = %ctx.actor,
            correlation_id = ctx.correlation_id(),
            action,
            from = %proposal.status(),
            to = %next.status(),
            "Proposal transition applied"
        );
        *proposal = next;
        Ok(())
    }
}

/// Logs a failed step that ran after the transition was stored.
fn followup(
    proposal: &Proposal,
    ctx: &ActingContext,
    step: &'static str,
    result: Result<(), DomainError>,
) {
    if let Err(err) = result {
        error!(
            proposal_id = %proposal.id(),
            correlation_id = ctx.correlation_id(),
            step,
            error = %err,
            "Post-transition step failed"
        );
    }
}

fn refused(
    proposal: &Proposal,
    ctx: &ActingContext,
    action: &'static str,
    err: ProposalError,
) -> ProposalError {
    warn!(
        proposal_id = %proposal.id(),
        actor = %ctx.actor,
        correlation_id = ctx.correlation_id(),
        action,
        status = %proposal.status(),
        reason = %err,
        "Proposal transition refused"
    );
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProposalRepository;
    use crate::adapters::notify::InMemoryAgreementQueue;
    use crate::domain::foundation::{DomainError, ProposalId, UserId};
    use crate::domain::proposal::{Notice, ProposalHistory, ProposalStatus};
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Test Doubles
    // ════════════════════════════════════════════════════════════════════════════

    /// Records every call; when `failing`, each call also returns an error.
    #[derive(Default)]
    struct RecordingNotifier {
        calls: Mutex<Vec<(&'static str, ProposalId)>>,
        failing: bool,
    }

    impl RecordingNotifier {
        fn failing() -> Self {
            Self {
                failing: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().iter().map(|(c, _)| *c).collect()
        }

        fn record(&self, call: &'static str, proposal: &Proposal) -> Result<(), DomainError> {
            self.calls.lock().unwrap().push((call, *proposal.id()));
            if self.failing {
                Err(DomainError::database("directory down"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl ProposalNotifier for RecordingNotifier {
        async fn new_proposal(
            &self,
            proposal: &Proposal,
            _ctx: &ActingContext,
        ) -> Result<(), DomainError> {
            self.record("new_proposal", proposal)
        }

        async fn rejected(&self, proposal: &Proposal, _ctx: &ActingContext) -> Result<(), DomainError> {
            self.record("rejected", proposal)
        }

        async fn accepted(&self, proposal: &Proposal, _ctx: &ActingContext) -> Result<(), DomainError> {
            self.record("accepted", proposal)
        }

        async fn countered(
            &self,
            proposal: &Proposal,
            _ctx: &ActingContext,
        ) -> Result<(), DomainError> {
            self.record("countered", proposal)
        }

        async fn deliver(&self, _recipient: &UserId, _notice: Notice) -> Result<(), DomainError> {
            Ok(())
        }
    }

    /// Repository whose writes always fail.
    struct FailingRepository;

    #[async_trait]
    impl ProposalRepository for FailingRepository {
        async fn save(&self, _p: &Proposal) -> Result<(), DomainError> {
            Err(DomainError::database("disk full"))
        }
        async fn update(&self, _p: &Proposal) -> Result<(), DomainError> {
            Err(DomainError::database("disk full"))
        }
        async fn find_by_id(&self, _id: &ProposalId) -> Result<Option<Proposal>, DomainError> {
            Ok(None)
        }
        async fn find_for_party(&self, _u: &UserId) -> Result<Vec<Proposal>, DomainError> {
            Ok(vec![])
        }
        async fn find_awaiting_verification(&self) -> Result<Vec<Proposal>, DomainError> {
            Ok(vec![])
        }
        async fn update_with_history(
            &self,
            _p: &Proposal,
            _e: &ProposalHistory,
        ) -> Result<(), DomainError> {
            Err(DomainError::database("disk full"))
        }
        async fn history_for(&self, _id: &ProposalId) -> Result<Vec<ProposalHistory>, DomainError> {
            Ok(vec![])
        }
        async fn delete(&self, _id: &ProposalId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    struct Fixture {
        repo: Arc<InMemoryProposalRepository>,
        notifier: Arc<RecordingNotifier>,
        queue: Arc<InMemoryAgreementQueue>,
        service: ProposalTransitionService,
        proposal: Proposal,
    }

    async fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryProposalRepository::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let queue = Arc::new(InMemoryAgreementQueue::new());
        let service = ProposalTransitionService::new(repo.clone(), notifier.clone(), queue.clone());
        let proposal = Proposal::new(
            ProposalId::new(),
            UserId::new("op-1").unwrap(),
            UserId::new("vendor-1").unwrap(),
            DutyTerms::opening("Bring 12 guests on Fridays", Some("Prepare tasting set".into()))
                .unwrap(),
        )
        .unwrap();
        repo.save(&proposal).await.unwrap();
        Fixture {
            repo,
            notifier,
            queue,
            service,
            proposal,
        }
    }

    fn ctx(actor: &str) -> ActingContext {
        ActingContext::new(UserId::new(actor).unwrap())
    }

    async fn stored(f: &Fixture) -> Proposal {
        f.repo.find_by_id(f.proposal.id()).await.unwrap().unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Send
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn send_moves_draft_to_sent_and_notifies() {
        let f = fixture().await;
        let mut p = f.proposal.clone();

        f.service.send(&mut p, &ctx("op-1")).await.unwrap();

        assert_eq!(p.status(), ProposalStatus::Sent);
        assert_eq!(stored(&f).await.status(), ProposalStatus::Sent);
        assert_eq!(f.notifier.calls(), vec!["new_proposal"]);
    }

    #[tokio::test]
    async fn send_twice_is_illegal_and_not_notified_again() {
        let f = fixture().await;
        let mut p = f.proposal.clone();
        f.service.send(&mut p, &ctx("op-1")).await.unwrap();

        let err = f.service.send(&mut p, &ctx("op-1")).await.unwrap_err();

        assert_eq!(err, ProposalError::illegal_transition("Only drafts can be sent"));
        assert_eq!(f.notifier.calls(), vec!["new_proposal"]);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Accept / Reject
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn accept_from_draft_is_illegal() {
        let f = fixture().await;
        let mut p = f.proposal.clone();

        let err = f.service.accept(&mut p, &ctx("vendor-1")).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Can only accept sent / countered proposals"
        );
        assert_eq!(p.status(), ProposalStatus::Draft);
        assert!(f.queue.announced().is_empty());
        assert!(f.notifier.calls().is_empty());
    }

    #[tokio::test]
    async fn accept_notifies_and_queues_agreement_once() {
        let f = fixture().await;
        let mut p = f.proposal.clone();
        f.service.send(&mut p, &ctx("op-1")).await.unwrap();

        f.service.accept(&mut p, &ctx("vendor-1")).await.unwrap();

        assert_eq!(p.status(), ProposalStatus::Accepted);
        assert_eq!(f.notifier.calls(), vec!["new_proposal", "accepted"]);
        assert_eq!(f.queue.count_for(p.id()), 1);

        assert!(f.service.accept(&mut p, &ctx("vendor-1")).await.is_err());
        assert_eq!(f.queue.count_for(p.id()), 1);
    }

    #[tokio::test]
    async fn reject_from_sent_is_terminal() {
        let f = fixture().await;
        let mut p = f.proposal.clone();
        f.service.send(&mut p, &ctx("op-1")).await.unwrap();

        f.service.reject(&mut p, &ctx("vendor-1")).await.unwrap();

        assert_eq!(stored(&f).await.status(), ProposalStatus::Rejected);
        let err = f
            .service
            .counter(&mut p, "a", "b", &ctx("vendor-1"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Can only counter sent / countered proposals"
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Counter
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn counter_archives_prior_duties() {
        let f = fixture().await;
        let mut p = f.proposal.clone();
        f.service.send(&mut p, &ctx("op-1")).await.unwrap();

        f.service
            .counter(&mut p, "Bring 6 guests", "Offer a discount", &ctx("vendor-1"))
            .await
            .unwrap();

        assert_eq!(p.status(), ProposalStatus::Countered);
        assert_eq!(p.sender_duties(), "Bring 6 guests");
        let history = f.repo.history_for(p.id()).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].sender_duties(), "Bring 12 guests on Fridays");
        assert_eq!(history[0].receiver_duties(), "Prepare tasting set");
        assert_eq!(f.notifier.calls(), vec!["new_proposal", "countered"]);
    }

    #[tokio::test]
    async fn counter_with_blank_duty_changes_nothing() {
        let f = fixture().await;
        let mut p = f.proposal.clone();
        f.service.send(&mut p, &ctx("op-1")).await.unwrap();
        let before = p.clone();

        let err = f
            .service
            .counter(&mut p, "Bring 6 guests", "   ", &ctx("vendor-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProposalError::ValidationFailed { .. }));
        assert_eq!(
            err.to_string(),
            "Both duty fields are required for a counter-proposal."
        );
        assert_eq!(p, before);
        assert_eq!(stored(&f).await, before);
        assert_eq!(f.repo.history_count(), 0);
    }

    #[tokio::test]
    async fn repeated_counters_grow_history() {
        let f = fixture().await;
        let mut p = f.proposal.clone();
        f.service.send(&mut p, &ctx("op-1")).await.unwrap();

        f.service
            .counter(&mut p, "Round one", "Reply one", &ctx("vendor-1"))
            .await
            .unwrap();
        f.service
            .counter(&mut p, "Round two", "Reply two", &ctx("op-1"))
            .await
            .unwrap();

        let history = f.repo.history_for(p.id()).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].sender_duties(), "Round one");
        assert_eq!(p.sender_duties(), "Round two");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Persistence failures
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn failed_update_leaves_caller_state_untouched() {
        let notifier = Arc::new(RecordingNotifier::default());
        let service = ProposalTransitionService::new(
            Arc::new(FailingRepository),
            notifier.clone(),
            Arc::new(InMemoryAgreementQueue::new()),
        );
        let f = fixture().await;
        let mut p = f.proposal.clone();

        let err = service.send(&mut p, &ctx("op-1")).await.unwrap_err();

        assert!(matches!(err, ProposalError::Infrastructure(_)));
        assert_eq!(p.status(), ProposalStatus::Draft);
        assert!(notifier.calls().is_empty());
    }

    #[tokio::test]
    async fn counter_on_missing_row_writes_no_history() {
        let f = fixture().await;
        let mut unsaved = Proposal::new(
            ProposalId::new(),
            UserId::new("op-1").unwrap(),
            UserId::new("vendor-1").unwrap(),
            DutyTerms::opening("Bring 2 guests", None).unwrap(),
        )
        .unwrap();
        unsaved.send().unwrap();
        let before = unsaved.clone();

        let err = f
            .service
            .counter(&mut unsaved, "Bring 3", "Serve tea", &ctx("vendor-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProposalError::Infrastructure(_)));
        assert_eq!(unsaved, before);
        assert_eq!(f.repo.history_count(), 0);
        assert!(f.notifier.calls().is_empty());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Notification failures
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn failing_notifier_does_not_undo_stored_transitions() {
        let f = fixture().await;
        let notifier = Arc::new(RecordingNotifier::failing());
        let service =
            ProposalTransitionService::new(f.repo.clone(), notifier.clone(), f.queue.clone());
        let mut p = f.proposal.clone();

        service.send(&mut p, &ctx("op-1")).await.unwrap();
        service.accept(&mut p, &ctx("vendor-1")).await.unwrap();

        assert_eq!(stored(&f).await.status(), ProposalStatus::Accepted);
        assert_eq!(notifier.calls(), vec!["new_proposal", "accepted"]);
        assert_eq!(f.queue.count_for(p.id()), 1);

        let err = service.accept(&mut p, &ctx("vendor-1")).await.unwrap_err();
        assert!(err.is_illegal_transition());
        assert_eq!(f.queue.count_for(p.id()), 1);
    }

    #[tokio::test]
    async fn failing_notifier_still_records_counter() {
        let f = fixture().await;
        let service = ProposalTransitionService::new(
            f.repo.clone(),
            Arc::new(RecordingNotifier::failing()),
            f.queue.clone(),
        );
        let mut p = f.proposal.clone();
        service.send(&mut p, &ctx("op-1")).await.unwrap();

        service
            .counter(&mut p, "Bring 6 guests", "Offer a discount", &ctx("vendor-1"))
            .await
            .unwrap();

        assert_eq!(stored(&f).await.status(), ProposalStatus::Countered);
        assert_eq!(f.repo.history_count(), 1);
    }
}
