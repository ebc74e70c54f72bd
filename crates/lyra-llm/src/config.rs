// Configuration layer for client creation

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration for the OpenAI transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    /// Base URL for the OpenAI API (optional, defaults to https://api.openai.com/v1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Factory for creating clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    /// Create a full client (completions + assistants) from configuration
    pub fn create_client(config: OpenAIConfig) -> Result<Arc<dyn crate::traits::AssistantClient>> {
        let mut client = crate::openai::OpenAIClient::new(config.api_key)?;
        if let Some(base_url) = config.base_url {
            client = client.with_base_url(base_url);
        }
        Ok(Arc::new(client))
    }

    /// Create a chat-only client from configuration
    pub fn create_chat_client(config: OpenAIConfig) -> Result<Arc<dyn crate::traits::ChatClient>> {
        let mut client = crate::openai::OpenAIClient::new(config.api_key)?;
        if let Some(base_url) = config.base_url {
            client = client.with_base_url(base_url);
        }
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_config() {
        let config = OpenAIConfig::new("test-key");
        assert_eq!(config.api_key, "test-key");
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_base_url_override() {
        let config = OpenAIConfig::new("test-key").with_base_url("http://localhost:8080/v1");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/v1"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = OpenAIConfig::new("test-key").with_base_url("http://localhost:8080/v1");

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: OpenAIConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.api_key, deserialized.api_key);
        assert_eq!(config.base_url, deserialized.base_url);
    }

    #[test]
    fn test_factory_creates_client() {
        let config = OpenAIConfig::new("test-key");
        assert!(ClientFactory::create_client(config).is_ok());
    }
}
