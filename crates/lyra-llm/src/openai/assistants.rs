// OpenAI Assistants API (v2) wire types
// https://platform.openai.com/docs/api-reference/assistants

use serde::{Deserialize, Serialize};

/// Assistant object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assistant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub model: String,
    #[serde(default)]
    pub instructions: Option<String>,
    pub created_at: i64,
    #[serde(default)]
    pub tools: Vec<AssistantTool>,
}

/// Tool attached to an assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantTool {
    CodeInterpreter,
    FileSearch,
    Function { function: serde_json::Value },
}

/// Thread object (server-side message container)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub created_at: i64,
}

/// Message stored in a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub id: String,
    pub thread_id: String,
    pub role: MessageRole,
    pub content: Vec<MessageContent>,
    pub created_at: i64,
}

/// Author role of a thread message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One content segment of a thread message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextContent },
    ImageFile { image_file: serde_json::Value },
    ImageUrl { image_url: serde_json::Value },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<serde_json::Value>,
}

/// Run object (asynchronous assistant execution against a thread)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub thread_id: String,
    pub assistant_id: String,
    pub status: RunStatus,
    pub created_at: i64,
    #[serde(default)]
    pub last_error: Option<RunError>,
}

/// Run lifecycle status.
///
/// The status set is defined by the server; `Unknown` captures values this
/// client does not recognize and is treated as terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Completed,
    Failed,
    Cancelled,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Statuses the poll loop keeps waiting on.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            RunStatus::Queued | RunStatus::InProgress | RunStatus::Cancelling
        )
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
            RunStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunError {
    pub code: String,
    pub message: String,
}

/// Paginated list envelope shared by the list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    pub object: String,
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

/// Listing order for thread messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrder {
    Ascending,
    Descending,
}

impl MessageOrder {
    pub(crate) fn as_query(&self) -> &'static str {
        match self {
            MessageOrder::Ascending => "asc",
            MessageOrder::Descending => "desc",
        }
    }
}

/// Request body for `POST /assistants`
#[derive(Debug, Clone, Serialize)]
pub struct CreateAssistantRequest {
    pub name: String,
    pub instructions: String,
    pub model: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<AssistantTool>,
}

/// Request body for `POST /threads/{thread_id}/messages`
#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest {
    pub role: MessageRole,
    pub content: String,
}

/// Request body for `POST /threads/{thread_id}/runs`
#[derive(Debug, Clone, Serialize)]
pub struct CreateRunRequest {
    pub assistant_id: String,
}
