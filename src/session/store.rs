// src/session/store.rs
use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::wizard::reducer::{reduce, Action};
use crate::core::wizard::state::KycState;
use crate::utils::error::{KycError, Result};

/// In-memory wizard sessions. State is mutated only through [`SessionStore::apply`],
/// which runs the pure reducer against the stored state under the write lock,
/// so concurrent dispatches for one session serialize cleanly. Nothing is
/// persisted; sessions die with the process.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, KycState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self { sessions: RwLock::new(HashMap::new()) }
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(id, KycState::new());
        id
    }

    /// Snapshot of a session's state.
    pub async fn get(&self, id: &Uuid) -> Result<KycState> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| KycError::Session(format!("unknown session {id}")))
    }

    /// Apply one action and return the successor state. A failed transition
    /// leaves the stored state untouched.
    pub async fn apply(&self, id: &Uuid, action: Action) -> Result<KycState> {
        let mut sessions = self.sessions.write().await;
        let state = sessions
            .get(id)
            .ok_or_else(|| KycError::Session(format!("unknown session {id}")))?;
        let next = reduce(state, action)?;
        sessions.insert(*id, next.clone());
        Ok(next)
    }

    /// Discard a session, as on navigation away from the journey.
    pub async fn remove(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wizard::state::FinalStatus;
    use crate::core::wizard::steps::WizardStep;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new();
        let id = store.create().await;
        let state = store.get(&id).await.unwrap();
        assert_eq!(state.current_step, WizardStep::Welcome);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_session_is_an_error() {
        let store = SessionStore::new();
        assert!(store.get(&Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn test_apply_persists_the_successor_state() {
        let store = SessionStore::new();
        let id = store.create().await;
        let state = store.apply(&id, Action::Advance).await.unwrap();
        assert_eq!(state.current_step, WizardStep::UserInfo);
        assert_eq!(store.get(&id).await.unwrap().current_step, WizardStep::UserInfo);
    }

    #[tokio::test]
    async fn test_failed_transition_leaves_state_untouched() {
        let store = SessionStore::new();
        let id = store.create().await;
        let result = store
            .apply(&id, Action::SetFinalStatus { status: FinalStatus::Verified })
            .await;
        assert!(result.is_err());
        let state = store.get(&id).await.unwrap();
        assert_eq!(state.final_status, FinalStatus::NotStarted);
    }

    #[tokio::test]
    async fn test_remove_discards_the_session() {
        let store = SessionStore::new();
        let id = store.create().await;
        assert!(store.remove(&id).await);
        assert!(!store.remove(&id).await);
        assert!(store.get(&id).await.is_err());
    }
}
