use std::time::Duration;

pub const DEFAULT_ASSISTANT_NAME: &str = "Lyra";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(120);

/// Session-level configuration, supplied by the caller.
///
/// `assistant_id` short-circuits name resolution: when set, the resolver
/// validates it remotely and never lists or creates assistants.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub assistant_name: String,
    pub assistant_id: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// Fixed wait between run-status polls.
    pub poll_interval: Duration,
    /// Deadline for the whole poll loop. `None` polls forever.
    pub poll_timeout: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            assistant_id: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_timeout: Some(DEFAULT_POLL_TIMEOUT),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assistant_name(mut self, name: impl Into<String>) -> Self {
        self.assistant_name = name.into();
        self
    }

    pub fn assistant_id(mut self, id: impl Into<String>) -> Self {
        self.assistant_id = Some(id.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn poll_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// System prompt injected at the head of direct completions.
    pub fn system_prompt(&self) -> String {
        format!("You are {}, a helpful AI assistant.", self.assistant_name)
    }

    /// Instructions used when the resolver has to create the assistant.
    pub fn create_instructions(&self) -> String {
        format!(
            "You are {}, a helpful AI assistant. You are knowledgeable, friendly, \
             and always ready to help with any questions or tasks.",
            self.assistant_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.assistant_name, "Lyra");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.assistant_id.is_none());
        assert_eq!(config.poll_timeout, Some(DEFAULT_POLL_TIMEOUT));
    }

    #[test]
    fn test_builder_chain() {
        let config = SessionConfig::new()
            .assistant_name("Echo")
            .assistant_id("asst_123")
            .model("gpt-4o")
            .temperature(0.3)
            .poll_interval(Duration::from_millis(250))
            .poll_timeout(None);

        assert_eq!(config.assistant_name, "Echo");
        assert_eq!(config.assistant_id.as_deref(), Some("asst_123"));
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.temperature, 0.3);
        assert!(config.poll_timeout.is_none());
    }

    #[test]
    fn test_system_prompt_uses_name() {
        let config = SessionConfig::new().assistant_name("Echo");
        assert_eq!(config.system_prompt(), "You are Echo, a helpful AI assistant.");
    }
}
