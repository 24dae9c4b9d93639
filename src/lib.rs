//! Chat widget: theme toggle, per-session user id, and a message panel that
//! relays each message to a `/chat` endpoint and shows the reply.
//!
//! Everything except [`ui`] is plain Rust and runs without a browser.

pub mod client;
pub mod config;
pub mod controller;
pub mod coordinator;
pub mod identity;
pub mod logging;
pub mod render;
pub mod storage;
pub mod theme;
pub mod types;

#[cfg(feature = "dioxus")]
pub mod ui;
