//! Telegram alert delivery.
//!
//! Sends MarkdownV2-formatted premium alerts to a single configured chat.

mod format;

pub mod notifier;

pub use notifier::{TelegramConfig, TelegramNotifier};
