//! Conversation history with hub synchronization.
//!
//! A [`Conversation`] is an ordered log of role/content messages with
//! optional wall-clock timestamps. It can persist itself to disk as JSON or
//! plain text, and push a snapshot of itself to the hub as a structured
//! record.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{HubError, Result};
use crate::hub::{HubClient, HubResponse};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: String,
    pub content: String,
    /// Local wall-clock time the message was added, if timestamps were on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// An ordered conversation log.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    history: Vec<ConversationMessage>,
    time_enabled: bool,
    autosave_path: Option<PathBuf>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the log with a system prompt as its first message.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.add("system", prompt);
        self
    }

    /// Append standing rules as a user message.
    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.add("user", rules);
        self
    }

    /// Stamp every message added from here on with local wall-clock time.
    pub fn with_timestamps(mut self) -> Self {
        self.time_enabled = true;
        self
    }

    /// Rewrite the history as JSON to `path` after every append.
    pub fn with_autosave(mut self, path: impl Into<PathBuf>) -> Self {
        self.autosave_path = Some(path.into());
        self
    }

    /// Append a message to the log.
    ///
    /// Autosave is best effort: a failed write is logged at warn level and
    /// does not fail the append.
    pub fn add(&mut self, role: impl Into<String>, content: impl Into<String>) {
        let timestamp = self
            .time_enabled
            .then(|| Local::now().format(TIMESTAMP_FORMAT).to_string());
        self.history.push(ConversationMessage {
            role: role.into(),
            content: content.into(),
            timestamp,
        });

        if let Some(path) = self.autosave_path.clone() {
            if let Err(err) = self.save_json(&path) {
                warn!(path = %path.display(), error = %err, "conversation autosave failed");
            }
        }
    }

    /// Remove and return the message at `index`, if it exists.
    pub fn delete(&mut self, index: usize) -> Option<ConversationMessage> {
        if index < self.history.len() {
            Some(self.history.remove(index))
        } else {
            None
        }
    }

    /// Replace role and content at `index`. Returns false if out of range.
    pub fn update(
        &mut self,
        index: usize,
        role: impl Into<String>,
        content: impl Into<String>,
    ) -> bool {
        match self.history.get_mut(index) {
            Some(message) => {
                message.role = role.into();
                message.content = content.into();
                true
            }
            None => false,
        }
    }

    /// The message at `index`, if it exists.
    pub fn query(&self, index: usize) -> Option<&ConversationMessage> {
        self.history.get(index)
    }

    /// All messages whose content contains `keyword`.
    pub fn search(&self, keyword: &str) -> Vec<&ConversationMessage> {
        self.history
            .iter()
            .filter(|message| message.content.contains(keyword))
            .collect()
    }

    /// Number of messages per role.
    pub fn count_by_role(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for message in &self.history {
            *counts.entry(message.role.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// The full history as a compact JSON array.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.history).map_err(HubError::JsonSerialize)
    }

    /// Write the history to `path` as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.history).map_err(HubError::JsonSerialize)?;
        fs::write(path, json).map_err(|source| HubError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a history previously written by [`Conversation::save_json`].
    ///
    /// Timestamps and autosave are off on the loaded value; re-enable them
    /// with the builder methods.
    pub fn load_json(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| HubError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let history = serde_json::from_str(&contents)?;
        Ok(Self {
            history,
            ..Self::default()
        })
    }

    /// Write the history to `path` as `role: content` lines.
    ///
    /// One line per message; multiline content will not round-trip.
    pub fn export_text(&self, path: &Path) -> Result<()> {
        let mut out = String::new();
        for message in &self.history {
            out.push_str(&message.role);
            out.push_str(": ");
            out.push_str(&message.content);
            out.push('\n');
        }
        fs::write(path, out).map_err(|source| HubError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Append messages from a `role: content` text file.
    ///
    /// Lines without a `: ` separator are skipped.
    pub fn import_text(&mut self, path: &Path) -> Result<()> {
        let contents = fs::read_to_string(path).map_err(|source| HubError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        for line in contents.lines() {
            if let Some((role, content)) = line.split_once(": ") {
                self.add(role, content);
            }
        }
        Ok(())
    }

    /// Upload a snapshot of the history to the hub as a structured record.
    ///
    /// The record id is `{owner}-{timestamp}-conversation.json` and the
    /// message body is the JSON history. Best effort: failures are logged
    /// and collapse to `None`, like the underlying upload.
    pub async fn sync_to_hub(&self, client: &HubClient, owner: &str) -> Option<HubResponse> {
        let payload = match self.to_json() {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "conversation serialization failed, skipping hub sync");
                return None;
            }
        };
        let id = format!(
            "{}-{}-conversation.json",
            owner,
            Local::now().format(TIMESTAMP_FORMAT)
        );
        client.upload_meme(owner, &id, &payload).await
    }
}

impl fmt::Display for Conversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for message in &self.history {
            writeln!(f, "{}: {}", message.role, message.content)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_query() {
        let mut conversation = Conversation::new();
        conversation.add("user", "hello");
        conversation.add("assistant", "hi there");

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.query(0).unwrap().role, "user");
        assert_eq!(conversation.query(1).unwrap().content, "hi there");
        assert!(conversation.query(2).is_none());
    }

    #[test]
    fn test_messages_untimestamped_by_default() {
        let mut conversation = Conversation::new();
        conversation.add("user", "hello");
        assert_eq!(conversation.query(0).unwrap().timestamp, None);
    }

    #[test]
    fn test_timestamps_recorded_when_enabled() {
        let mut conversation = Conversation::new().with_timestamps();
        conversation.add("user", "hello");

        let stamp = conversation.query(0).unwrap().timestamp.as_deref().unwrap();
        assert!(
            chrono::NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok(),
            "unexpected timestamp format: {}",
            stamp
        );
    }

    #[test]
    fn test_builder_seeds_system_prompt_and_rules() {
        let conversation = Conversation::new()
            .with_system_prompt("you are a meme curator")
            .with_rules("be brief");

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.query(0).unwrap().role, "system");
        assert_eq!(conversation.query(1).unwrap().role, "user");
        assert_eq!(conversation.query(1).unwrap().content, "be brief");
    }

    #[test]
    fn test_delete_shifts_remaining_messages() {
        let mut conversation = Conversation::new();
        conversation.add("user", "first");
        conversation.add("user", "second");

        let removed = conversation.delete(0).unwrap();
        assert_eq!(removed.content, "first");
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.query(0).unwrap().content, "second");

        assert!(conversation.delete(5).is_none());
    }

    #[test]
    fn test_update_in_place() {
        let mut conversation = Conversation::new();
        conversation.add("user", "draft");

        assert!(conversation.update(0, "assistant", "final"));
        assert_eq!(conversation.query(0).unwrap().role, "assistant");
        assert_eq!(conversation.query(0).unwrap().content, "final");

        assert!(!conversation.update(3, "user", "nope"));
    }

    #[test]
    fn test_search_matches_content_substring() {
        let mut conversation = Conversation::new();
        conversation.add("user", "cats are great");
        conversation.add("assistant", "dogs are great");
        conversation.add("user", "agreed");

        let hits = conversation.search("great");
        assert_eq!(hits.len(), 2);
        assert!(conversation.search("birds").is_empty());
    }

    #[test]
    fn test_count_by_role() {
        let mut conversation = Conversation::new();
        conversation.add("user", "one");
        conversation.add("assistant", "two");
        conversation.add("user", "three");

        let counts = conversation.count_by_role();
        assert_eq!(counts.get("user"), Some(&2));
        assert_eq!(counts.get("assistant"), Some(&1));
    }

    #[test]
    fn test_display_renders_role_content_paragraphs() {
        let mut conversation = Conversation::new();
        conversation.add("user", "hello");
        conversation.add("assistant", "hi");

        assert_eq!(conversation.to_string(), "user: hello\n\nassistant: hi\n\n");
    }

    #[test]
    fn test_clear_empties_history() {
        let mut conversation = Conversation::new();
        conversation.add("user", "hello");
        conversation.clear();
        assert!(conversation.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut conversation = Conversation::new().with_timestamps();
        conversation.add("user", "hello");
        conversation.add("assistant", "hi");
        conversation.save_json(&path).unwrap();

        let loaded = Conversation::load_json(&path).unwrap();
        assert_eq!(loaded.messages(), conversation.messages());
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "not json").unwrap();

        let err = Conversation::load_json(&path);
        assert!(matches!(err, Err(HubError::JsonParse { .. })));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Conversation::load_json(&dir.path().join("absent.json"));
        assert!(matches!(err, Err(HubError::Io { .. })));
    }

    #[test]
    fn test_export_and_import_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.txt");

        let mut conversation = Conversation::new();
        conversation.add("user", "hello");
        conversation.add("assistant", "hi");
        conversation.export_text(&path).unwrap();

        let mut imported = Conversation::new();
        imported.import_text(&path).unwrap();

        assert_eq!(imported.len(), 2);
        assert_eq!(imported.query(0).unwrap().role, "user");
        assert_eq!(imported.query(0).unwrap().content, "hello");
        assert_eq!(imported.query(1).unwrap().role, "assistant");
    }

    #[test]
    fn test_autosave_rewrites_file_after_each_add() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autosave.json");

        let mut conversation = Conversation::new().with_autosave(&path);
        conversation.add("user", "first");

        let loaded = Conversation::load_json(&path).unwrap();
        assert_eq!(loaded.len(), 1);

        conversation.add("user", "second");
        let loaded = Conversation::load_json(&path).unwrap();
        assert_eq!(loaded.len(), 2);
    }
}
