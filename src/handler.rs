//! The conversation engine. Inbound events from the transport land here as
//! `on_command` / `on_text` / `on_photo` and drive the per-user state
//! machine: registration (first name, last name, badge) followed by the
//! two-step daily submission (photo, then step count).

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::time::timeout;
use tracing::{error, warn};

use crate::constants::*;
use crate::error::StoreError;
use crate::model::{AppState, Sender, UserId};
use crate::session::{ConversationState, Session};
use crate::store::SheetRow;
use crate::util;

const APPEND_TIMEOUT: Duration = Duration::from_secs(EXTERNAL_CALL_TIMEOUT_SECS);

pub struct Handler {
    state: Arc<AppState>,
}

impl Handler {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// A slash command ("start", "cancel"). Anything else is treated like a
    /// plain message outside a dialogue.
    pub async fn on_command(&self, sender: &Sender, name: &str) {
        match name {
            "start" => self.start(sender).await,
            "cancel" => self.cancel(sender).await,
            _ => self.idle_message(sender).await,
        }
    }

    /// A plain text message.
    pub async fn on_text(&self, sender: &Sender, text: &str) {
        let Some(session) = self.state.sessions.get(&sender.id).await else {
            self.idle_message(sender).await;
            return;
        };
        match session.state {
            ConversationState::AwaitFirstName => self.take_first_name(sender, session, text).await,
            ConversationState::AwaitLastName => self.take_last_name(sender, session, text).await,
            ConversationState::AwaitBadge => self.finish_registration(sender, session, text).await,
            ConversationState::AwaitPhoto => {
                self.reply(&sender.id, prompt_for(session.state)).await
            }
            ConversationState::AwaitSteps => self.take_steps(sender, session, text).await,
        }
    }

    /// A photo attachment, reduced by the transport to an opaque reference.
    pub async fn on_photo(&self, sender: &Sender, photo_ref: &str) {
        match self.state.sessions.get(&sender.id).await {
            Some(mut session) if session.state == ConversationState::AwaitPhoto => {
                session.photo_ref = Some(photo_ref.to_string());
                session.state = ConversationState::AwaitSteps;
                self.state.sessions.put(sender.id.clone(), session).await;
                self.reply(&sender.id, MSG_ASK_STEPS).await;
            }
            // Wrong input kind for the current state: re-prompt, no mutation.
            Some(session) => self.reply(&sender.id, prompt_for(session.state)).await,
            None => self.idle_photo(sender, photo_ref).await,
        }
    }

    async fn start(&self, sender: &Sender) {
        if self.state.cache.is_registered(&sender.id).await {
            // Registration is one-time; /start never re-enters it.
            self.state.sessions.clear(&sender.id).await;
            self.reply(&sender.id, MSG_ALREADY_REGISTERED).await;
            return;
        }
        self.state
            .sessions
            .put(sender.id.clone(), Session::new(ConversationState::AwaitFirstName))
            .await;
        self.reply(&sender.id, MSG_ASK_FIRST_NAME).await;
    }

    async fn cancel(&self, sender: &Sender) {
        if self.state.sessions.clear(&sender.id).await {
            self.reply(&sender.id, MSG_CANCELLED).await;
        } else {
            self.idle_message(sender).await;
        }
    }

    async fn take_first_name(&self, sender: &Sender, mut session: Session, text: &str) {
        let Some(name) = non_empty(text) else {
            self.reply(&sender.id, MSG_EMPTY_INPUT).await;
            return;
        };
        session.first_name = Some(name);
        session.state = ConversationState::AwaitLastName;
        self.state.sessions.put(sender.id.clone(), session).await;
        self.reply(&sender.id, MSG_ASK_LAST_NAME).await;
    }

    async fn take_last_name(&self, sender: &Sender, mut session: Session, text: &str) {
        let Some(name) = non_empty(text) else {
            self.reply(&sender.id, MSG_EMPTY_INPUT).await;
            return;
        };
        session.last_name = Some(name);
        session.state = ConversationState::AwaitBadge;
        self.state.sessions.put(sender.id.clone(), session).await;
        self.reply(&sender.id, MSG_ASK_BADGE).await;
    }

    async fn finish_registration(&self, sender: &Sender, mut session: Session, text: &str) {
        let Some(badge) = non_empty(text) else {
            self.reply(&sender.id, MSG_EMPTY_INPUT).await;
            return;
        };
        let row = SheetRow::registration(
            sender,
            session.first_name.as_deref().unwrap_or_default(),
            session.last_name.as_deref().unwrap_or_default(),
            &badge,
            self.today(),
        );
        match self.append_row(row).await {
            Ok(()) => {
                self.state.cache.record_registration(&sender.id, &badge).await;
                session.state = ConversationState::AwaitPhoto;
                self.state.sessions.put(sender.id.clone(), session).await;
                self.reply(&sender.id, MSG_REGISTERED).await;
            }
            Err(e) => {
                error!(
                    target = "bot.register",
                    user = %sender.id,
                    error = %e,
                    transient = e.is_transient(),
                    "registration append failed"
                );
                self.state.sessions.clear(&sender.id).await;
                self.reply(&sender.id, MSG_REGISTRATION_ERROR).await;
            }
        }
    }

    async fn take_steps(&self, sender: &Sender, session: Session, text: &str) {
        let Some(steps) = util::parse_steps(text) else {
            self.reply(&sender.id, MSG_NOT_A_NUMBER).await;
            return;
        };
        let today = self.today();
        let badge = self.state.cache.badge_of(&sender.id).await;
        let row = SheetRow {
            first_name: session.first_name.clone().unwrap_or_default(),
            last_name: session.last_name.clone().unwrap_or_default(),
            user_id: sender.id.clone(),
            handle: sender.handle.clone().unwrap_or_default(),
            badge,
            steps: Some(steps),
            photo_ref: session.photo_ref.clone(),
            date: today,
        };
        match self.append_row(row).await {
            Ok(()) => {
                self.state.cache.record_submission(&sender.id, today).await;
                self.state.sessions.clear(&sender.id).await;
                self.reply(&sender.id, MSG_SAVED).await;
            }
            Err(e) => {
                error!(
                    target = "bot.submit",
                    user = %sender.id,
                    error = %e,
                    transient = e.is_transient(),
                    "submission append failed"
                );
                self.state.sessions.clear(&sender.id).await;
                self.reply(&sender.id, MSG_SAVE_ERROR).await;
            }
        }
    }

    /// A photo with no active session starts the daily submission, guarded
    /// by the dedup check so nobody re-enters the path twice the same day.
    async fn idle_photo(&self, sender: &Sender, photo_ref: &str) {
        if self.state.cache.has_submitted(&sender.id, self.today()).await {
            self.reply(&sender.id, MSG_ALREADY_SUBMITTED_TODAY).await;
            return;
        }
        if !self.state.cache.is_registered(&sender.id).await {
            self.reply(&sender.id, MSG_REGISTER_FIRST).await;
            return;
        }
        let mut session = Session::new(ConversationState::AwaitSteps);
        session.photo_ref = Some(photo_ref.to_string());
        self.state.sessions.put(sender.id.clone(), session).await;
        self.reply(&sender.id, MSG_ASK_STEPS).await;
    }

    /// Anything arriving outside a dialogue.
    async fn idle_message(&self, sender: &Sender) {
        if self.state.cache.has_submitted(&sender.id, self.today()).await {
            self.reply(&sender.id, MSG_ALREADY_SUBMITTED_TODAY).await;
        } else {
            self.reply(&sender.id, MSG_SEND_PHOTO_FIRST).await;
        }
    }

    fn today(&self) -> NaiveDate {
        util::today_in(self.state.config.timezone)
    }

    async fn append_row(&self, row: SheetRow) -> Result<(), StoreError> {
        match timeout(APPEND_TIMEOUT, self.state.store.append_row(row)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout),
        }
    }

    /// Reply failures never change dialogue state; they are logged and the
    /// user simply misses one message.
    async fn reply(&self, user: &UserId, text: &str) {
        if let Err(e) = self.state.gateway.send_text(user, text).await {
            warn!(target = "bot.reply", user = %user, error = %e, "reply delivery failed");
        }
    }
}

fn prompt_for(state: ConversationState) -> &'static str {
    match state {
        ConversationState::AwaitFirstName => MSG_ASK_FIRST_NAME,
        ConversationState::AwaitLastName => MSG_ASK_LAST_NAME,
        ConversationState::AwaitBadge => MSG_ASK_BADGE,
        ConversationState::AwaitPhoto => MSG_NOT_A_PHOTO,
        ConversationState::AwaitSteps => MSG_NOT_A_NUMBER,
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
