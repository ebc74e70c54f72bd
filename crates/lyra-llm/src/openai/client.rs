// OpenAI-specific client implementation (HTTP direct, no SDK)

use crate::error::{Result, TransportError};
use crate::openai::assistants::{
    Assistant, CreateAssistantRequest, CreateMessageRequest, CreateRunRequest, ListEnvelope,
    MessageOrder, MessageRole, Run, Thread, ThreadMessage,
};
use crate::traits::{
    AssistantClient, AssistantTransport, ChatClient, ChatRequest, ChatResponse, TokenUsage,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// The assistants surface is versioned separately from the rest of the API.
const ASSISTANTS_BETA: &str = "assistants=v2";

/// OpenAI client
pub struct OpenAIClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| TransportError::Config("Invalid API key format".to_string()))?,
        );
        headers.insert("OpenAI-Beta", HeaderValue::from_static(ASSISTANTS_BETA));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: OPENAI_API_BASE.to_string(),
        })
    }

    /// Override the API base URL (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode the JSON body, mapping non-2xx responses to
    /// `TransportError::Api` with the server's error message when present.
    async fn request_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => envelope.error.message,
                Err(_) => body,
            };
            return Err(TransportError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }

    /// Build chat completion request payload
    fn build_chat_request(&self, request: &ChatRequest) -> Value {
        let messages: Vec<Value> = request
            .messages
            .iter()
            .map(|msg| {
                serde_json::json!({
                    "role": msg.role(),
                    "content": msg.content(),
                })
            })
            .collect();

        let mut payload = serde_json::json!({
            "model": request.model,
            "messages": messages,
        });

        let obj = payload.as_object_mut().unwrap();

        // o1 and gpt-5 models reject temperature and use a different token cap
        let is_reasoning_model =
            request.model.starts_with("o1") || request.model.starts_with("gpt-5");

        if let Some(temp) = request.options.temperature {
            if !is_reasoning_model {
                obj.insert("temperature".to_string(), serde_json::json!(temp));
            }
        }
        if let Some(max_tokens) = request.options.max_tokens {
            let token_field = if is_reasoning_model {
                "max_completion_tokens"
            } else {
                "max_tokens"
            };
            obj.insert(token_field.to_string(), serde_json::json!(max_tokens));
        }

        payload
    }
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        debug!(model = %request.model, messages = request.messages.len(), "Chat completion");
        let payload = self.build_chat_request(&request);

        let raw: OpenAIChatResponse = self
            .request_json(
                self.http_client
                    .post(self.url("/chat/completions"))
                    .json(&payload),
            )
            .await?;

        let choice = raw.choices.into_iter().next();
        Ok(ChatResponse {
            content: choice.as_ref().and_then(|c| c.message.content.clone()),
            usage: raw.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.and_then(|c| c.finish_reason),
        })
    }
}

#[async_trait]
impl AssistantTransport for OpenAIClient {
    async fn list_assistants(&self) -> Result<Vec<Assistant>> {
        let envelope: ListEnvelope<Assistant> = self
            .request_json(
                self.http_client
                    .get(self.url("/assistants"))
                    .query(&[("limit", "100")]),
            )
            .await?;
        Ok(envelope.data)
    }

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        self.request_json(
            self.http_client
                .get(self.url(&format!("/assistants/{}", assistant_id))),
        )
        .await
    }

    async fn create_assistant(&self, request: CreateAssistantRequest) -> Result<Assistant> {
        debug!(name = %request.name, model = %request.model, "Creating assistant");
        self.request_json(self.http_client.post(self.url("/assistants")).json(&request))
            .await
    }

    async fn create_thread(&self) -> Result<Thread> {
        self.request_json(
            self.http_client
                .post(self.url("/threads"))
                .json(&serde_json::json!({})),
        )
        .await
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage> {
        let request = CreateMessageRequest {
            role,
            content: content.to_string(),
        };
        self.request_json(
            self.http_client
                .post(self.url(&format!("/threads/{}/messages", thread_id)))
                .json(&request),
        )
        .await
    }

    async fn list_messages(
        &self,
        thread_id: &str,
        order: MessageOrder,
    ) -> Result<Vec<ThreadMessage>> {
        let envelope: ListEnvelope<ThreadMessage> = self
            .request_json(
                self.http_client
                    .get(self.url(&format!("/threads/{}/messages", thread_id)))
                    .query(&[("order", order.as_query())]),
            )
            .await?;
        Ok(envelope.data)
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        debug!(thread_id, assistant_id, "Starting run");
        let request = CreateRunRequest {
            assistant_id: assistant_id.to_string(),
        };
        self.request_json(
            self.http_client
                .post(self.url(&format!("/threads/{}/runs", thread_id)))
                .json(&request),
        )
        .await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.request_json(
            self.http_client
                .get(self.url(&format!("/threads/{}/runs/{}", thread_id, run_id))),
        )
        .await
    }
}

// OpenAI supports both the completion and the assistant path
impl AssistantClient for OpenAIClient {}

// ============================================================================
// OPENAI-SPECIFIC RESPONSE TYPES (for Chat Completions)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIChatResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Choice {
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResponseMessage {
    pub role: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}
