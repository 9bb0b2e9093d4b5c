//! Capture / attempt / rollback-or-commit
//!
//! Every state-changing call site goes through [`Attempt`]. Optimistic paths
//! capture the state they are about to change; the capture is discarded on
//! commit and restored verbatim on rollback. Non-optimistic paths record only
//! whether anything was applied.

use std::future::Future;

use careerdeck_domain::Result;
use tracing::debug;

/// Result of trying a mutation, with the snapshot needed to undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an attempt must be committed or rolled back"]
pub struct Attempt<S> {
    applied: bool,
    rollback: Option<S>,
}

impl<S> Attempt<S> {
    /// Applied remotely first; nothing local to undo.
    pub fn committed() -> Self {
        Self { applied: true, rollback: None }
    }

    /// Nothing changed.
    pub fn skipped() -> Self {
        Self { applied: false, rollback: None }
    }

    /// Applied locally before confirmation; `before` restores it.
    pub fn optimistic(before: S) -> Self {
        Self { applied: true, rollback: Some(before) }
    }

    pub fn applied(&self) -> bool {
        self.applied
    }

    pub fn can_roll_back(&self) -> bool {
        self.rollback.is_some()
    }

    /// Keep the change and drop the snapshot.
    pub fn commit(self) -> bool {
        self.applied
    }

    /// Restore the captured snapshot into `target`. Returns whether anything
    /// was restored.
    pub fn rollback(self, target: &mut S) -> bool {
        match self.rollback {
            Some(before) => {
                *target = before;
                true
            }
            None => false,
        }
    }
}

/// Apply `local` to `state` right away, then await `remote`.
///
/// On remote failure `state` is put back exactly as it was before `local`
/// ran and the remote error is returned.
pub async fn run_optimistic<S, T, F, Fut>(state: &mut S, local: F, remote: Fut) -> Result<T>
where
    S: Clone,
    F: FnOnce(&mut S),
    Fut: Future<Output = Result<T>>,
{
    let attempt = Attempt::optimistic(state.clone());
    local(state);

    match remote.await {
        Ok(value) => {
            attempt.commit();
            Ok(value)
        }
        Err(err) => {
            debug!(error = %err, "remote call failed; restoring optimistic snapshot");
            attempt.rollback(state);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use careerdeck_domain::CareerDeckError;

    use super::*;

    #[test]
    fn rollback_restores_snapshot() {
        let mut state = vec![1, 2, 3];
        let attempt = Attempt::optimistic(state.clone());
        state.clear();

        assert!(attempt.can_roll_back());
        assert!(attempt.rollback(&mut state));
        assert_eq!(state, vec![1, 2, 3]);
    }

    #[test]
    fn committed_and_skipped_have_nothing_to_restore() {
        let mut state = 5;
        assert!(!Attempt::<i32>::committed().rollback(&mut state));
        assert!(Attempt::<i32>::committed().commit());
        assert!(!Attempt::<i32>::skipped().applied());
        assert_eq!(state, 5);
    }

    #[tokio::test]
    async fn optimistic_change_survives_remote_success() {
        let mut state = vec!["a", "b"];
        let result = run_optimistic(&mut state, |s| s.retain(|v| *v != "a"), async { Ok(()) }).await;

        assert!(result.is_ok());
        assert_eq!(state, vec!["b"]);
    }

    #[tokio::test]
    async fn optimistic_change_is_reverted_on_remote_failure() {
        let mut state = vec!["a", "b"];
        let result: Result<()> = run_optimistic(&mut state, |s| s.clear(), async {
            Err(CareerDeckError::Network("boom".into()))
        })
        .await;

        assert_eq!(result, Err(CareerDeckError::Network("boom".into())));
        assert_eq!(state, vec!["a", "b"]);
    }
}
