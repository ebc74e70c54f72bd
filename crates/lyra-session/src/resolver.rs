use crate::config::SessionConfig;
use crate::error::ResolveError;
use lyra_llm::{Assistant, AssistantClient, AssistantTool, CreateAssistantRequest};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Resolves the assistant identity this client talks to.
///
/// Resolution happens at most once per client lifetime: an explicitly
/// configured id is validated remotely without any listing; otherwise the
/// visible assistants are listed once, searched by name (case-insensitive
/// exact match), and the assistant is created only when no match exists.
pub struct AssistantResolver {
    transport: Arc<dyn AssistantClient>,
    config: SessionConfig,
    // Never held across an await point.
    cached: Mutex<Option<Assistant>>,
}

impl AssistantResolver {
    pub fn new(transport: Arc<dyn AssistantClient>, config: SessionConfig) -> Self {
        Self {
            transport,
            config,
            cached: Mutex::new(None),
        }
    }

    /// Identity currently in use, if already resolved.
    pub fn current(&self) -> Option<Assistant> {
        self.cached.lock().unwrap().clone()
    }

    /// Resolve the active assistant, reusing the cached identity when present.
    pub async fn resolve(&self) -> Result<Assistant, ResolveError> {
        if let Some(assistant) = self.current() {
            return Ok(assistant);
        }

        let assistant = match self.config.assistant_id.clone() {
            Some(id) => self.retrieve(&id).await?,
            None => self.find_or_create().await?,
        };

        *self.cached.lock().unwrap() = Some(assistant.clone());
        Ok(assistant)
    }

    /// Explicit override by id. Validates remotely before committing; the
    /// previously active identity is kept when validation fails.
    pub async fn set_by_id(&self, id: &str) -> Result<Assistant, ResolveError> {
        let assistant = self.retrieve(id).await?;
        info!(assistant_id = %assistant.id, "Active assistant set by id");
        *self.cached.lock().unwrap() = Some(assistant.clone());
        Ok(assistant)
    }

    async fn retrieve(&self, id: &str) -> Result<Assistant, ResolveError> {
        self.transport.retrieve_assistant(id).await.map_err(|e| {
            if e.is_not_found() {
                ResolveError::NotFound { id: id.to_string() }
            } else {
                ResolveError::Transport(e)
            }
        })
    }

    async fn find_or_create(&self) -> Result<Assistant, ResolveError> {
        let wanted = self.config.assistant_name.to_lowercase();

        let assistants = self.transport.list_assistants().await?;
        if let Some(found) = assistants
            .into_iter()
            .find(|a| a.name.as_deref().is_some_and(|n| n.to_lowercase() == wanted))
        {
            debug!(assistant_id = %found.id, name = %self.config.assistant_name, "Found assistant by name");
            return Ok(found);
        }

        info!(name = %self.config.assistant_name, "No matching assistant, creating one");
        let created = self
            .transport
            .create_assistant(CreateAssistantRequest {
                name: self.config.assistant_name.clone(),
                instructions: self.config.create_instructions(),
                model: self.config.model.clone(),
                tools: vec![AssistantTool::CodeInterpreter],
            })
            .await?;
        Ok(created)
    }
}
