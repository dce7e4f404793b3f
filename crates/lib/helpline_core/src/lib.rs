//! # helpline_core
//!
//! Core domain logic for Helpline: the FAQ table, the AI completion and
//! messaging providers, the chat log store, and the decision chain that
//! ties them together.

pub mod chat;
pub mod chat_log;
pub mod completion;
pub mod config;
pub mod faq;
pub mod messaging;
pub mod migrate;
pub mod uuid;

#[cfg(test)]
mod test_support;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
