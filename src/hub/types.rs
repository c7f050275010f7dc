//! Wire types for the memehub API.
//!
//! The hub speaks three shapes:
//! - **Structured upload**: a JSON [`MemeRecord`] body
//! - **Binary upload**: a multipart form (`file` part + `owner` field)
//! - **Download**: a urlencoded form, answered with raw bytes

use serde::{Deserialize, Serialize};

// ============================================================================
// Upload Types
// ============================================================================

/// A structured record posted to `/api/upload` (client → hub).
///
/// Field names on the wire are capitalized exactly as the hub expects:
/// `Owner`, `ID`, `Message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemeRecord {
    /// Namespace the record is stored under.
    #[serde(rename = "Owner")]
    pub owner: String,
    /// Identifier within the owner's namespace, usually filename-shaped.
    #[serde(rename = "ID")]
    pub id: String,
    /// The content itself.
    #[serde(rename = "Message")]
    pub message: String,
}

impl MemeRecord {
    pub fn new(
        owner: impl Into<String>,
        id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            id: id.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Decoded JSON object returned by the hub's upload endpoints.
///
/// The hub does not commit to a fixed reply schema, so this stays a plain
/// JSON object (e.g. `{"status": "ok"}`). A non-object reply is a decode
/// error.
pub type HubResponse = serde_json::Map<String, serde_json::Value>;
