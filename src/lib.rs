//! Daily steps intake bot: a registration dialogue, one (photo, step count)
//! submission per user per day, and a reminder sweep for everyone who has
//! not submitted yet. The chat transport and the durable table live behind
//! the `gateway` and `store` seams so the core stays testable in-process.

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod handler;
pub mod model;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod store_csv;
pub mod util;

pub use model::{AppState, Sender, UserId};
