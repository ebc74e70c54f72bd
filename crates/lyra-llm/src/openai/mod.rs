pub mod assistants;
pub mod client;

pub use assistants::{
    Assistant, AssistantTool, CreateAssistantRequest, CreateMessageRequest, CreateRunRequest,
    ListEnvelope, MessageContent, MessageOrder, MessageRole, Run, RunError, RunStatus,
    TextContent, Thread, ThreadMessage,
};
pub use client::OpenAIClient;
