//! Shared data structures used throughout the application.
//! An `Arc<AppState>` is handed to the conversation handler and to both
//! scheduler tasks; the cache inside it is the only state they share.

use std::fmt;
use std::sync::Arc;

use crate::cache::SubmissionCache;
use crate::config::BotConfig;
use crate::gateway::MessagingGateway;
use crate::session::SessionStore;
use crate::store::RecordStore;

/// Opaque, stable user identifier as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Sender identity attached to every inbound event.
#[derive(Debug, Clone)]
pub struct Sender {
    pub id: UserId,
    /// Optional display handle; stored alongside rows but never required.
    pub handle: Option<String>,
}

/// The central, shared state of the application.
pub struct AppState {
    /// Read-through projection of the record store; the one resource shared
    /// between the dialogue path and the background tasks.
    pub cache: SubmissionCache,
    /// Durable source of truth for registrations and submissions.
    pub store: Arc<dyn RecordStore>,
    /// Outbound message delivery.
    pub gateway: Arc<dyn MessagingGateway>,
    /// Per-user in-flight dialogue state.
    pub sessions: SessionStore,
    pub config: BotConfig,
}
