use crate::error::Result;
use crate::openai::{
    Assistant, CreateAssistantRequest, MessageOrder, MessageRole, Run, Thread, ThreadMessage,
};
use crate::types::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for single-shot chat completions (the stateless path)
///
/// One request carries the full conversation; nothing persists server-side.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}

/// Trait for the assistant/thread/run resource surface (the stateful path)
///
/// All ids are opaque server-assigned handles. Run creation is the only
/// operation that is not safe to retry blindly: a retry starts a second run.
#[async_trait]
pub trait AssistantTransport: Send + Sync {
    async fn list_assistants(&self) -> Result<Vec<Assistant>>;

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant>;

    async fn create_assistant(&self, request: CreateAssistantRequest) -> Result<Assistant>;

    async fn create_thread(&self) -> Result<Thread>;

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage>;

    async fn list_messages(&self, thread_id: &str, order: MessageOrder)
        -> Result<Vec<ThreadMessage>>;

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run>;

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;
}

/// Convenience trait for clients that support both paths
pub trait AssistantClient: ChatClient + AssistantTransport {}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub options: ChatOptions,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: ChatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: Option<String>,
    pub usage: Option<TokenUsage>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}
