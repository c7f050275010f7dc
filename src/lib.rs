//! memehub-client: Client library for the memehub content service.
//!
//! The hub stores content addressed by an owner namespace plus an
//! identifier. This library wraps its three HTTP operations — structured
//! JSON upload, raw binary upload, binary download — behind [`HubClient`],
//! and layers a [`conversation::Conversation`] log on top that can snapshot
//! itself to the hub.
//!
//! ## Modules
//!
//! - [`error`]: Typed error types for all failure modes
//! - [`hub`]: HTTP client, endpoint configuration, wire types
//! - [`conversation`]: Conversation history with hub synchronization
//! - [`logging`]: Tracing subscriber setup for embedding binaries
//!
//! ## Failure contract
//!
//! Every hub operation exists in two flavors. The `try_` methods return a
//! typed [`HubError`]; the plain methods log the failure at error level and
//! return `None`, so callers that treat the hub as best-effort storage never
//! have to unwind.
//!
//! ## Example
//!
//! ```rust,no_run
//! use memehub_client::HubClient;
//!
//! # async fn run() -> memehub_client::Result<()> {
//! memehub_client::logging::init_logging_with_default("info");
//!
//! let client = HubClient::new("http://localhost:8080")?;
//! if let Some(reply) = client.upload_meme("alice", "f1.txt", "hello hub").await {
//!     println!("hub replied: {:?}", reply);
//! }
//! # Ok(())
//! # }
//! ```

pub mod conversation;
pub mod error;
pub mod hub;
pub mod logging;

// Re-export commonly used types at crate root
pub use conversation::{Conversation, ConversationMessage};
pub use error::{HubError, Result};
pub use hub::{HubClient, HubConfig, HubResponse, MemeRecord};
