//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for the supported alert channels.

mod log;

#[cfg(feature = "telegram")]
pub mod telegram;

pub use log::LogNotifier;
