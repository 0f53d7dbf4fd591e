use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::assistant::prompts::{build_prompt, greeting, CONNECTION_ERROR_REPLY, EMPTY_REPLY_FALLBACK};
use crate::llm_client::LlmError;
use crate::profile::ProfileStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelState {
    /// Input enabled, nothing in flight.
    Idle,
    /// Input disabled, exactly one request in flight.
    AwaitingReply,
}

/// Why a submit was refused. The panel is untouched in both cases.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("Message cannot be empty")]
    EmptyInput,

    #[error("A reply is already pending")]
    ReplyPending,
}

/// One assistant-panel session: the transcript plus the idle/awaiting machine.
///
/// The transcript only ever grows. Each accepted submit is paired with exactly
/// one `complete`, which appends exactly one assistant message.
#[derive(Debug)]
pub struct AssistantPanel {
    profile: Arc<ProfileStore>,
    transcript: Vec<ChatMessage>,
    state: PanelState,
    /// Bumped on every transcript append and state toggle; clients scroll
    /// the transcript view to the bottom when it changes.
    revision: u64,
}

impl AssistantPanel {
    pub fn new(profile: Arc<ProfileStore>) -> Self {
        let opening = ChatMessage::assistant(greeting(&profile));
        Self {
            profile,
            transcript: vec![opening],
            state: PanelState::Idle,
            revision: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Accepts a user turn and returns the prompt to send.
    ///
    /// Rejected with no state change if the trimmed input is empty or a reply
    /// is still pending. Pending input is never queued.
    pub fn submit(&mut self, input: &str) -> Result<String, SubmitRejected> {
        if self.state == PanelState::AwaitingReply {
            return Err(SubmitRejected::ReplyPending);
        }
        let question = input.trim();
        if question.is_empty() {
            return Err(SubmitRejected::EmptyInput);
        }

        let prompt = build_prompt(&self.profile, question);
        self.append(ChatMessage::user(question));
        self.state = PanelState::AwaitingReply;
        self.revision += 1;
        Ok(prompt)
    }

    /// Settles the pending turn with the generation result.
    ///
    /// Returns the appended assistant message, or `None` if nothing was
    /// pending (the result is discarded).
    pub fn complete(&mut self, result: Result<Option<String>, LlmError>) -> Option<&ChatMessage> {
        if self.state != PanelState::AwaitingReply {
            return None;
        }

        let content = match result {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => EMPTY_REPLY_FALLBACK.to_string(),
            Err(_) => CONNECTION_ERROR_REPLY.to_string(),
        };
        self.append(ChatMessage::assistant(content));
        self.state = PanelState::Idle;
        self.revision += 1;
        self.transcript.last()
    }

    fn append(&mut self, message: ChatMessage) {
        self.transcript.push(message);
        self.revision += 1;
    }
}
