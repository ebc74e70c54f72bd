//! Conversation history codec: transport message lists to ordered turn
//! sequences and back, plus the JSON file round trip used for export/import.

use crate::error::HistoryError;
use chrono::{DateTime, Utc};
use lyra_llm::{Message, MessageContent, MessageRole, ThreadMessage};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Author role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One conversation turn. Insertion order within a session is meaningful and
/// is preserved by the export/import round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at,
        }
    }

    /// User turn stamped with the caller clock
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content, Utc::now())
    }

    /// Assistant turn stamped with the caller clock
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content, Utc::now())
    }

    pub(crate) fn to_message(&self) -> Message {
        match self.role {
            Role::System => Message::system(self.content.clone()),
            Role::User => Message::human(self.content.clone()),
            Role::Assistant => Message::ai(self.content.clone()),
        }
    }
}

/// Convert a transport message list to turns, preserving transport order.
pub fn decode_messages(messages: &[ThreadMessage]) -> Result<Vec<Turn>, HistoryError> {
    messages
        .iter()
        .map(|message| {
            let role = match message.role {
                MessageRole::User => Role::User,
                MessageRole::Assistant => Role::Assistant,
            };
            Ok(Turn::new(
                role,
                message_text(message)?,
                timestamp(message.created_at),
            ))
        })
        .collect()
}

/// Extract the single text segment of a thread message.
///
/// Multi-segment and non-text content is out of scope; it is rejected here
/// rather than silently dropped.
pub(crate) fn message_text(message: &ThreadMessage) -> Result<&str, HistoryError> {
    match message.content.as_slice() {
        [MessageContent::Text { text }] => Ok(&text.value),
        _ => Err(HistoryError::UnsupportedContent {
            message_id: message.id.clone(),
        }),
    }
}

pub(crate) fn timestamp(epoch_seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(epoch_seconds, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Serialize turns to a JSON file (ordered array of role/content/timestamp).
pub fn write_turns(turns: &[Turn], path: &Path) -> Result<(), HistoryError> {
    let json = serde_json::to_string_pretty(turns)?;
    fs::write(path, json)?;
    Ok(())
}

/// Deserialize turns from a JSON export file.
pub fn read_turns(path: &Path) -> Result<Vec<Turn>, HistoryError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Timestamped default filename for exports in the current directory.
pub fn default_export_path() -> PathBuf {
    PathBuf::from(format!(
        "lyra_conversation_{}.json",
        Utc::now().format("%Y%m%d_%H%M%S")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyra_llm::TextContent;

    fn text_message(id: &str, role: MessageRole, value: &str, created_at: i64) -> ThreadMessage {
        ThreadMessage {
            id: id.to_string(),
            thread_id: "thread_1".to_string(),
            role,
            content: vec![MessageContent::Text {
                text: TextContent {
                    value: value.to_string(),
                    annotations: vec![],
                },
            }],
            created_at,
        }
    }

    #[test]
    fn test_decode_preserves_order_and_content() {
        let messages = vec![
            text_message("msg_1", MessageRole::User, "hello", 100),
            text_message("msg_2", MessageRole::Assistant, "hi there", 101),
        ];

        let turns = decode_messages(&messages).unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "hello");
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].content, "hi there");
        assert!(turns[0].created_at < turns[1].created_at);
    }

    #[test]
    fn test_decode_rejects_multi_segment_content() {
        let mut message = text_message("msg_1", MessageRole::Assistant, "part one", 100);
        message.content.push(MessageContent::Text {
            text: TextContent {
                value: "part two".to_string(),
                annotations: vec![],
            },
        });

        let err = decode_messages(&[message]).unwrap_err();
        assert!(matches!(
            err,
            HistoryError::UnsupportedContent { ref message_id } if message_id == "msg_1"
        ));
    }

    #[test]
    fn test_decode_rejects_image_content() {
        let message = ThreadMessage {
            id: "msg_img".to_string(),
            thread_id: "thread_1".to_string(),
            role: MessageRole::User,
            content: vec![MessageContent::ImageFile {
                image_file: serde_json::json!({"file_id": "file_123"}),
            }],
            created_at: 100,
        };

        assert!(decode_messages(&[message]).is_err());
    }

    #[test]
    fn test_turn_serde_roundtrip_is_lossless() {
        let turns = vec![
            Turn::new(Role::User, "What is 2+2?", timestamp(1_700_000_000)),
            Turn::new(Role::Assistant, "4", timestamp(1_700_000_005)),
        ];

        let json = serde_json::to_string(&turns).unwrap();
        assert!(json.contains("\"timestamp\""));
        assert!(json.contains("\"role\":\"user\""));

        let decoded: Vec<Turn> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, turns);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let turns = vec![
            Turn::new(Role::User, "hello", timestamp(100)),
            Turn::new(Role::Assistant, "hi", timestamp(101)),
        ];

        write_turns(&turns, &path).unwrap();
        let read_back = read_turns(&path).unwrap();
        assert_eq!(read_back, turns);
    }
}
