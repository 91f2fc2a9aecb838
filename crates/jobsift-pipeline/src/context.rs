//! Run context - the mutable state of one run
//!
//! Everything a run changes lives here rather than in ambient state, so each
//! stage can be driven and inspected in isolation.

use crate::metrics::RunSummary;
use crate::throttle::ThrottleController;
use jobsift_domain::{IdentitySet, RecordId, RunMode};

/// State carried through one run
#[derive(Debug, Clone)]
pub struct RunContext {
    identity: IdentitySet,
    throttle: ThrottleController,
    summary: RunSummary,
}

impl RunContext {
    /// Start a run with the ids already handled
    pub fn new(identity: IdentitySet, mode: RunMode) -> Self {
        Self {
            identity,
            throttle: ThrottleController::new(mode),
            summary: RunSummary::new(),
        }
    }

    /// Whether `id` was handled by this or an earlier run
    pub fn is_known(&self, id: &RecordId) -> bool {
        self.identity.contains(id)
    }

    /// Charge the budget for a record about to be sent for extraction
    pub fn submit(&mut self) {
        self.throttle.record_submitted();
    }

    /// Mark `id` as handled; call only after its row was appended
    pub fn commit(&mut self, id: RecordId) {
        self.identity.insert(id);
        self.summary.processed += 1;
    }

    /// Ids known so far
    pub fn identity(&self) -> &IdentitySet {
        &self.identity
    }

    /// The processing budget
    pub fn throttle(&self) -> &ThrottleController {
        &self.throttle
    }

    /// Counts so far
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Counts so far, for updating
    pub fn summary_mut(&mut self) -> &mut RunSummary {
        &mut self.summary
    }

    /// Finish the run and hand back its summary
    pub fn into_summary(self) -> RunSummary {
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_updates_all_state() {
        let mut ctx = RunContext::new(IdentitySet::new(), RunMode::Bounded(1));
        let id = RecordId::new("a");
        assert!(!ctx.is_known(&id));

        ctx.submit();
        ctx.commit(id.clone());

        assert!(ctx.is_known(&id));
        assert!(ctx.throttle().should_stop());
        assert_eq!(ctx.summary().processed, 1);
    }

    #[test]
    fn test_submission_spends_budget_without_commit() {
        let mut ctx = RunContext::new(IdentitySet::new(), RunMode::Bounded(1));
        ctx.submit();

        assert!(ctx.throttle().should_stop());
        assert_eq!(ctx.summary().processed, 0);
        assert!(ctx.identity().is_empty());
    }

    #[test]
    fn test_prior_ids_are_known() {
        let identity: IdentitySet = vec![RecordId::new("old")].into_iter().collect();
        let ctx = RunContext::new(identity, RunMode::Exhaustive);
        assert!(ctx.is_known(&RecordId::new("old")));
        assert_eq!(ctx.into_summary().processed, 0);
    }
}
