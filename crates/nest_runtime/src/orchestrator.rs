//! Per-session facade: one user message in, one assistant message out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use nest_actions::ActionBus;
use nest_core::{ConversationMessage, MessageStatus, ProjectSnapshot, SessionId};
use nest_llms::{GeminiConfig, GeminiProvider, Message, Provider};
use nest_observability::{record_duration, record_error, turn_span};
use tokio::sync::Mutex;
use tracing::Instrument;

use crate::config::RuntimeConfig;
use crate::context::grounding_exchange;
use crate::conversation::{tool_definitions, Conversation, TurnReply};
use crate::error::{Result, RuntimeError};
use crate::prompt::build_system_prompt;
use crate::synthesis::synthesize;

pub const WELCOME_MESSAGE: &str = "Hello! I'm your NestPilot assistant. I can help you create, update, and manage your lists and tasks using natural language. Just tell me what you'd like to do!\n\nFor example:\n• \"Create a new list called 'Frontend Tasks'\"\n• \"Add a task to implement user login\"\n• \"Mark the API task as completed\"\n• \"Move the bug fix task to the done list\"";

pub const ERROR_REPLY: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

pub const TIMEOUT_REPLY: &str = "Sorry, the request took too long to process. The operation might have completed - please check your lists and tasks. If not, please try again with a simpler request.";

const REFRESHING_ACTION: &str = "get_project_data";

/// Shared session state. The lock is only held for short reads and writes,
/// never across a model call or a dispatch.
#[derive(Default)]
struct SessionState {
    messages: Vec<ConversationMessage>,
    snapshot: Option<ProjectSnapshot>,
    grounding: Vec<Message>,
    initialized: bool,
    indeterminate: bool,
    /// `None` while a turn holds the conversation.
    conversation: Option<Conversation>,
}

/// Clears the busy flag when the turn ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Orchestrator {
    session_id: SessionId,
    config: RuntimeConfig,
    provider: Arc<dyn Provider>,
    bus: ActionBus,
    busy: AtomicBool,
    state: Mutex<SessionState>,
}

impl Orchestrator {
    pub fn new(config: RuntimeConfig, provider: Arc<dyn Provider>, bus: ActionBus) -> Self {
        Self {
            session_id: SessionId::new(),
            config,
            provider,
            bus,
            busy: AtomicBool::new(false),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Build with the Gemini provider. Fails without a credential.
    pub fn from_config(config: RuntimeConfig, bus: ActionBus) -> Result<Self> {
        let key = config.require_api_key()?.to_string();
        let provider = GeminiProvider::new(GeminiConfig::new(key)).map_err(|e| match e {
            nest_llms::Error::MissingApiKey(_) => {
                RuntimeError::MissingCredential(GeminiProvider::API_KEY_ENV.to_string())
            }
            other => RuntimeError::Llm(other),
        })?;
        Ok(Self::new(config, Arc::new(provider), bus))
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn bus(&self) -> &ActionBus {
        &self.bus
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn welcome_message(&self) -> ConversationMessage {
        ConversationMessage::assistant(WELCOME_MESSAGE)
    }

    /// Visible messages, oldest first.
    pub async fn history(&self) -> Vec<ConversationMessage> {
        self.state.lock().await.messages.clone()
    }

    pub async fn snapshot(&self) -> Option<ProjectSnapshot> {
        self.state.lock().await.snapshot.clone()
    }

    /// True after a turn timed out or failed; outcomes of that turn should
    /// be checked with `get_project_data` rather than retried.
    pub async fn is_indeterminate(&self) -> bool {
        self.state.lock().await.indeterminate
    }

    /// Fetch the project, cache it and prepare the grounding exchange.
    pub async fn initialize_session(&self) -> Result<()> {
        self.state.lock().await.initialized = true;
        self.load_project().await
    }

    async fn load_project(&self) -> Result<()> {
        let project = self.bus.store().fetch_project(self.bus.project_uid()).await?;
        let snapshot = ProjectSnapshot::from(project);
        tracing::info!(
            lists = snapshot.lists.len(),
            tasks = snapshot.tasks.len(),
            "session grounded"
        );
        let mut state = self.state.lock().await;
        state.grounding = grounding_exchange(&snapshot);
        state.snapshot = Some(snapshot);
        Ok(())
    }

    fn open_conversation(&self, grounding: Vec<Message>) -> Conversation {
        let registry = self.bus.registry();
        Conversation::new(
            self.provider.clone(),
            &self.config,
            build_system_prompt(registry.schemas()),
            tool_definitions(&registry.manifest()),
            grounding,
        )
    }

    /// Process one user message and return the assistant's reply.
    ///
    /// Only `Busy` and `EmptyMessage` are returned as errors. Model failures
    /// and timeouts become failed or timed-out assistant messages.
    pub async fn handle_user_message(&self, text: &str) -> Result<ConversationMessage> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RuntimeError::EmptyMessage);
        }
        let _busy = BusyGuard::acquire(&self.busy).ok_or(RuntimeError::Busy)?;

        let span = turn_span!(self.session_id.as_str(), self.bus.project_uid());
        self.run_turn(text).instrument(span).await
    }

    async fn run_turn(&self, text: &str) -> Result<ConversationMessage> {
        let start = Instant::now();

        let (placeholder_id, needs_init) = {
            let mut state = self.state.lock().await;
            state.messages.push(ConversationMessage::user(text));
            let placeholder = ConversationMessage::placeholder();
            let id = placeholder.id.clone();
            state.messages.push(placeholder);
            (id, !std::mem::replace(&mut state.initialized, true))
        };

        if needs_init {
            if let Err(e) = self.load_project().await {
                tracing::warn!(error = %e, "could not load project, continuing without context");
            }
        }

        let mut conversation = {
            let mut state = self.state.lock().await;
            match state.conversation.take() {
                Some(conversation) => conversation,
                None => self.open_conversation(std::mem::take(&mut state.grounding)),
            }
        };

        let mut refreshed = None;
        let mut reply = match conversation.send(text).await {
            Ok(turn) => {
                let (reply, snapshot) = self.complete_turn(&mut conversation, turn).await;
                refreshed = snapshot;
                reply
            }
            Err(e) => {
                record_error(&e);
                if e.is_timeout() {
                    ConversationMessage::assistant(TIMEOUT_REPLY).with_status(MessageStatus::TimedOut)
                } else {
                    ConversationMessage::assistant(ERROR_REPLY).with_status(MessageStatus::Failed {
                        error: e.to_string(),
                    })
                }
            }
        };
        reply.id = placeholder_id;

        let mut state = self.state.lock().await;
        if let Some(snapshot) = refreshed {
            state.snapshot = Some(snapshot);
        }
        state.indeterminate = conversation.is_indeterminate();
        state.conversation = Some(conversation);
        match state.messages.iter_mut().rev().find(|m| m.id == reply.id) {
            Some(slot) => *slot = reply.clone(),
            None => state.messages.push(reply.clone()),
        }
        drop(state);

        record_duration("duration_ms", start.elapsed());
        Ok(reply)
    }

    /// Dispatch the proposed calls and build the reply. Also returns the
    /// snapshot from the last successful `get_project_data`, if any.
    async fn complete_turn(
        &self,
        conversation: &mut Conversation,
        turn: TurnReply,
    ) -> (ConversationMessage, Option<ProjectSnapshot>) {
        if !turn.has_calls() {
            return (ConversationMessage::assistant(synthesize(&[], &[], &turn.text)), None);
        }

        tracing::Span::current().record("actions", turn.calls.len());
        let results = self.bus.dispatch_all(&turn.calls).await;

        let refreshed = turn
            .calls
            .iter()
            .zip(&results)
            .filter(|(call, result)| call.name == REFRESHING_ACTION && result.success)
            .filter_map(|(_, result)| result.snapshot().cloned())
            .last();
        conversation.record_results(&turn.calls, &results);

        let content = synthesize(&turn.calls, &results, &turn.text);
        let reply = ConversationMessage::assistant(content).with_actions(turn.calls, results);
        (reply, refreshed)
    }
}
