//! The session manager: path selection, thread lifecycle, run polling, and
//! reply extraction.

use crate::config::SessionConfig;
use crate::error::SendError;
use crate::history::{self, Role, Turn};
use crate::resolver::AssistantResolver;
use lyra_llm::{
    Assistant, AssistantClient, ChatOptions, ChatRequest, Message, MessageOrder, MessageRole, Run,
    RunStatus,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

/// Which transport path a send goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPath {
    /// Stateful: thread + asynchronous run, polled to completion
    Assistant,
    /// Stateless: one chat-completion round trip
    Direct,
}

/// Per-call overrides for the direct path
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

/// One logical conversation, owned by the caller.
///
/// `thread_id` is assigned lazily by the first assistant-path send. A session
/// must not be driven by two concurrent sends; `send` takes `&mut Session`,
/// so the borrow checker enforces that.
#[derive(Debug, Clone, Default)]
pub struct Session {
    thread_id: Option<String>,
    turns: Vec<Turn>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    /// Locally mirrored turn sequence, in insertion order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Start over: the next assistant-path send opens a fresh thread.
    /// The remote thread is left untouched.
    pub fn reset(&mut self) {
        self.thread_id = None;
        self.turns.clear();
    }
}

/// Health probe result. Always a value, never an error.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub healthy: bool,
    pub api_connected: bool,
    pub assistant: Option<Assistant>,
    pub error: Option<String>,
}

/// Drives conversations against the transport.
///
/// Holds the shared transport handle and the resolver; all per-conversation
/// state lives in the caller-owned [`Session`]. Shareable across tasks
/// (`Arc<SessionManager>`); distinct sessions may be driven concurrently.
pub struct SessionManager {
    transport: Arc<dyn AssistantClient>,
    resolver: AssistantResolver,
    config: SessionConfig,
}

impl SessionManager {
    pub fn new(transport: Arc<dyn AssistantClient>, config: SessionConfig) -> Self {
        let resolver = AssistantResolver::new(transport.clone(), config.clone());
        Self {
            transport,
            resolver,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Send a message through the given path.
    pub async fn send(
        &self,
        session: &mut Session,
        message: &str,
        path: SendPath,
    ) -> Result<String, SendError> {
        self.send_with_options(session, message, path, SendOptions::default())
            .await
    }

    /// Send with per-call model/temperature overrides (direct path only).
    pub async fn send_with_options(
        &self,
        session: &mut Session,
        message: &str,
        path: SendPath,
        options: SendOptions,
    ) -> Result<String, SendError> {
        if message.trim().is_empty() {
            return Err(SendError::InvalidInput);
        }

        match path {
            SendPath::Assistant => self.send_assistant(session, message).await,
            SendPath::Direct => self.send_direct(session, message, options).await,
        }
    }

    async fn send_assistant(
        &self,
        session: &mut Session,
        message: &str,
    ) -> Result<String, SendError> {
        let assistant = self.resolver.resolve().await?;

        let thread_id = match session.thread_id.clone() {
            Some(id) => id,
            None => {
                let thread = self.transport.create_thread().await?;
                debug!(thread_id = %thread.id, "Created conversation thread");
                session.thread_id = Some(thread.id.clone());
                thread.id
            }
        };

        let posted = self
            .transport
            .create_message(&thread_id, MessageRole::User, message)
            .await?;
        session.turns.push(Turn::new(
            Role::User,
            message,
            history::timestamp(posted.created_at),
        ));

        let run = self.transport.create_run(&thread_id, &assistant.id).await?;
        debug!(run_id = %run.id, status = %run.status, "Run started");

        self.poll_run(run).await?;

        // Completed: exactly one message-list fetch, newest first.
        let messages = self
            .transport
            .list_messages(&thread_id, MessageOrder::Descending)
            .await?;
        let reply = messages
            .iter()
            .find(|m| m.role == MessageRole::Assistant)
            .ok_or(SendError::EmptyResponse)?;

        let text = history::message_text(reply)?.to_string();
        session.turns.push(Turn::new(
            Role::Assistant,
            text.clone(),
            history::timestamp(reply.created_at),
        ));
        Ok(text)
    }

    /// Drive the run state machine to a terminal status.
    ///
    /// Non-terminal: queued, in_progress, cancelling. `requires_action` is
    /// treated as terminal: this client never submits tool outputs, so such
    /// a run cannot make progress. The deadline bounds the loop; an abandoned
    /// run is left running remotely, never cancelled implicitly.
    async fn poll_run(&self, mut run: Run) -> Result<Run, SendError> {
        let started = Instant::now();
        let thread_id = run.thread_id.clone();

        while run.status.is_pending() {
            if let Some(timeout) = self.config.poll_timeout {
                if started.elapsed() >= timeout {
                    warn!(run_id = %run.id, status = %run.status, "Run polling deadline reached");
                    return Err(SendError::RunTimeout {
                        run_id: run.id,
                        waited: started.elapsed(),
                    });
                }
            }
            sleep(self.config.poll_interval).await;
            run = self.transport.retrieve_run(&thread_id, &run.id).await?;
            debug!(run_id = %run.id, status = %run.status, "Run status");
        }

        match run.status {
            RunStatus::Completed => Ok(run),
            status => {
                if let Some(err) = &run.last_error {
                    warn!(run_id = %run.id, code = %err.code, message = %err.message, "Run failed");
                }
                Err(SendError::RunNotCompleted { status })
            }
        }
    }

    async fn send_direct(
        &self,
        session: &mut Session,
        message: &str,
        options: SendOptions,
    ) -> Result<String, SendError> {
        let model = options.model.unwrap_or_else(|| self.config.model.clone());
        let temperature = options.temperature.unwrap_or(self.config.temperature);

        let mut messages = Vec::with_capacity(session.turns.len() + 2);
        if session.turns.first().map_or(true, |t| t.role != Role::System) {
            messages.push(Message::system(self.config.system_prompt()));
        }
        messages.extend(session.turns.iter().map(Turn::to_message));
        messages.push(Message::human(message));

        let mut chat_options = ChatOptions::new().temperature(temperature);
        if let Some(max_tokens) = self.config.max_tokens {
            chat_options = chat_options.max_tokens(max_tokens);
        }

        debug!(model = %model, turns = session.turns.len(), "Direct completion");
        let response = self
            .transport
            .chat(ChatRequest::new(model, messages).with_options(chat_options))
            .await?;
        let text = response.content.ok_or(SendError::EmptyResponse)?;

        // Direct-path turns are stamped with the caller clock.
        session.turns.push(Turn::user(message));
        session.turns.push(Turn::assistant(text.clone()));
        Ok(text)
    }

    /// Fetch the current thread's history as turns (oldest first).
    /// Empty when the session has no thread yet.
    pub async fn history(&self, session: &Session) -> Result<Vec<Turn>, SendError> {
        let Some(thread_id) = session.thread_id() else {
            return Ok(Vec::new());
        };
        let messages = self
            .transport
            .list_messages(thread_id, MessageOrder::Ascending)
            .await?;
        Ok(history::decode_messages(&messages)?)
    }

    /// Export the conversation to a JSON file and return its path.
    ///
    /// Uses the remote thread history when one exists, the locally mirrored
    /// turns otherwise (direct-path sessions have no thread). System turns
    /// are not exported.
    pub async fn export_conversation(
        &self,
        session: &Session,
        path: Option<&Path>,
    ) -> Result<PathBuf, SendError> {
        let turns: Vec<Turn> = if session.thread_id().is_some() {
            self.history(session).await?
        } else {
            session
                .turns
                .iter()
                .filter(|t| t.role != Role::System)
                .cloned()
                .collect()
        };

        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(history::default_export_path);
        history::write_turns(&turns, &path)?;
        info!(path = %path.display(), turns = turns.len(), "Exported conversation");
        Ok(path)
    }

    /// Import a conversation export, replaying every turn into a **new**
    /// thread in original order. The session's previous thread is never
    /// touched. Returns the number of turns replayed.
    pub async fn import_conversation(
        &self,
        session: &mut Session,
        path: &Path,
    ) -> Result<usize, SendError> {
        let turns = history::read_turns(path)?;

        let thread = self.transport.create_thread().await?;
        for turn in &turns {
            let role = match turn.role {
                Role::Assistant => MessageRole::Assistant,
                _ => MessageRole::User,
            };
            self.transport
                .create_message(&thread.id, role, &turn.content)
                .await?;
        }

        info!(thread_id = %thread.id, turns = turns.len(), "Imported conversation");
        session.thread_id = Some(thread.id);
        session.turns = turns.clone();
        Ok(turns.len())
    }

    /// One minimal completion plus one assistant resolution.
    pub async fn health_check(&self) -> HealthReport {
        let probe = ChatRequest::new(self.config.model.clone(), vec![Message::human("Hello")])
            .with_options(ChatOptions::new().max_tokens(10));

        if let Err(e) = self.transport.chat(probe).await {
            return HealthReport {
                healthy: false,
                api_connected: false,
                assistant: self.resolver.current(),
                error: Some(e.to_string()),
            };
        }

        match self.resolver.resolve().await {
            Ok(assistant) => HealthReport {
                healthy: true,
                api_connected: true,
                assistant: Some(assistant),
                error: None,
            },
            Err(e) => HealthReport {
                healthy: false,
                api_connected: true,
                assistant: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// Assistants visible to the configured credentials.
    pub async fn list_assistants(&self) -> Result<Vec<Assistant>, SendError> {
        Ok(self.transport.list_assistants().await?)
    }

    /// The resolved active assistant (resolving it on first use).
    pub async fn assistant_info(&self) -> Result<Assistant, SendError> {
        Ok(self.resolver.resolve().await?)
    }

    /// Switch the active assistant, validating the id remotely first.
    pub async fn set_assistant_by_id(&self, id: &str) -> Result<Assistant, SendError> {
        Ok(self.resolver.set_by_id(id).await?)
    }
}
