//! Per-user transient conversation state. Sessions live only in memory, so
//! a process restart drops in-flight registrations and the user retries via
//! /start.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::model::UserId;

/// Where a user currently is in the dialogue. Absence of a session is the
/// terminal idle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    AwaitFirstName,
    AwaitLastName,
    AwaitBadge,
    AwaitPhoto,
    AwaitSteps,
}

/// Fields collected so far, filled in state order. A session has no TTL; a
/// user who abandons mid-flow stays here until /start or /cancel.
#[derive(Debug, Clone)]
pub struct Session {
    pub state: ConversationState,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Set once a photo is accepted; the badge is not kept here because the
    /// submission row takes it from the cache.
    pub photo_ref: Option<String>,
}

impl Session {
    pub fn new(state: ConversationState) -> Self {
        Self {
            state,
            first_name: None,
            last_name: None,
            photo_ref: None,
        }
    }
}

/// Keyed session storage shared between the dispatch paths.
#[derive(Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<UserId, Session>>,
}

impl SessionStore {
    pub async fn get(&self, user: &UserId) -> Option<Session> {
        self.inner.read().await.get(user).cloned()
    }

    pub async fn put(&self, user: UserId, session: Session) {
        self.inner.write().await.insert(user, session);
    }

    /// Remove a session; true if one was active.
    pub async fn clear(&self, user: &UserId) -> bool {
        self.inner.write().await.remove(user).is_some()
    }
}
