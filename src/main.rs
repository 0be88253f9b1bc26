use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use stepsbot::cache::SubmissionCache;
use stepsbot::config::BotConfig;
use stepsbot::error::DeliveryError;
use stepsbot::gateway::MessagingGateway;
use stepsbot::handler::Handler;
use stepsbot::model::{AppState, Sender, UserId};
use stepsbot::scheduler;
use stepsbot::session::SessionStore;
use stepsbot::store_csv::CsvStore;

/// Console stand-in for the chat transport: outbound messages go to stdout.
/// Lets the bot run end-to-end locally without a platform client.
struct ConsoleGateway;

#[async_trait]
impl MessagingGateway for ConsoleGateway {
    async fn send_text(&self, user: &UserId, text: &str) -> Result<(), DeliveryError> {
        println!("[to {user}] {text}");
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let sheet_path = config.sheet_path.clone();
    let state = Arc::new(AppState {
        cache: SubmissionCache::new(),
        store: Arc::new(CsvStore::new(sheet_path)),
        gateway: Arc::new(ConsoleGateway),
        sessions: SessionStore::default(),
        config,
    });

    // The initial load is the one fatal path: a store we cannot read at all
    // leaves nothing to serve from.
    if let Err(e) = state.cache.refresh(state.store.as_ref()).await {
        error!(error = %e, "initial store load failed");
        std::process::exit(1);
    }

    // Detached on purpose: both loops run for the life of the process.
    let _refresh_task = scheduler::spawn_refresh_task(state.clone());
    let _reminder_task = scheduler::spawn_daily_reminder_task(state.clone());

    info!(
        timezone = %state.config.timezone,
        reminder_time = %state.config.reminder_time,
        "bot started; reading stdin (\"<user> /start\", \"<user> photo:<ref>\", \"<user> <text>\")"
    );

    let handler = Handler::new(state);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let Some((user, payload)) = line.split_once(' ') else {
            continue;
        };
        let sender = Sender {
            id: UserId::from(user),
            handle: None,
        };
        if let Some(command) = payload.strip_prefix('/') {
            handler.on_command(&sender, command.trim()).await;
        } else if let Some(photo_ref) = payload.strip_prefix("photo:") {
            handler.on_photo(&sender, photo_ref.trim()).await;
        } else {
            handler.on_text(&sender, payload).await;
        }
    }
}
