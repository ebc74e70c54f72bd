pub mod config;
pub mod error;
pub mod openai;
pub mod traits;
pub mod types;

pub use traits::{
    AssistantClient, AssistantTransport, ChatClient, ChatOptions, ChatRequest, ChatResponse,
    TokenUsage,
};

pub use config::{ClientFactory, OpenAIConfig};
pub use error::TransportError;
pub use openai::{
    Assistant, AssistantTool, CreateAssistantRequest, MessageContent, MessageOrder, MessageRole,
    OpenAIClient, Run, RunError, RunStatus, TextContent, Thread, ThreadMessage,
};
pub use types::Message;
