use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::assistant::panel::{AssistantPanel, ChatMessage, PanelState, SubmitRejected};
use crate::llm_client::Generator;
use crate::profile::ProfileStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Assistant session {0} not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Rejected(#[from] SubmitRejected),

    #[error("Assistant session {0} was closed before the reply arrived")]
    Closed(Uuid),

    #[error("Too many open assistant sessions (limit {limit})")]
    Full { limit: usize },
}

/// What clients see of a panel.
#[derive(Debug, Clone, Serialize)]
pub struct PanelSnapshot {
    pub session_id: Uuid,
    pub state: PanelState,
    pub revision: u64,
    pub messages: Vec<ChatMessage>,
}

struct Session {
    panel: AssistantPanel,
    /// Handle of the outstanding generation task, if any.
    in_flight: Option<AbortHandle>,
    last_active: Instant,
}

impl Session {
    fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    /// Idle past `ttl` with nothing in flight.
    fn is_abandoned(&self, now: Instant, ttl: Duration) -> bool {
        self.in_flight.is_none()
            && self.panel.state() != PanelState::AwaitingReply
            && now.saturating_duration_since(self.last_active) >= ttl
    }

    fn snapshot(&self, session_id: Uuid) -> PanelSnapshot {
        PanelSnapshot {
            session_id,
            state: self.panel.state(),
            revision: self.panel.revision(),
            messages: self.panel.messages().to_vec(),
        }
    }
}

type SessionMap = Arc<Mutex<HashMap<Uuid, Session>>>;

/// Open assistant panels, keyed by session id.
///
/// Opening the panel creates a session with a fresh transcript; closing it
/// discards the transcript and aborts any in-flight request. Panels whose
/// page went away without closing them are swept once they sit idle for
/// `idle_ttl`. The lock is never held across the generation call.
pub struct SessionStore {
    profile: Arc<ProfileStore>,
    generator: Arc<dyn Generator>,
    max_sessions: usize,
    idle_ttl: Duration,
    sessions: SessionMap,
}

impl SessionStore {
    pub fn new(
        profile: Arc<ProfileStore>,
        generator: Arc<dyn Generator>,
        max_sessions: usize,
        idle_ttl: Duration,
    ) -> Self {
        Self {
            profile,
            generator,
            max_sessions,
            idle_ttl,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn open(&self) -> Result<PanelSnapshot, SessionError> {
        let mut sessions = self.sessions.lock().await;

        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_abandoned(now, self.idle_ttl));
        let expired = before - sessions.len();
        if expired > 0 {
            info!("Expired {expired} idle assistant session(s)");
        }

        if sessions.len() >= self.max_sessions {
            warn!("Refusing new assistant session: {} open", sessions.len());
            return Err(SessionError::Full {
                limit: self.max_sessions,
            });
        }

        let session_id = Uuid::new_v4();
        let session = Session {
            panel: AssistantPanel::new(Arc::clone(&self.profile)),
            in_flight: None,
            last_active: now,
        };
        let snapshot = session.snapshot(session_id);
        sessions.insert(session_id, session);
        info!(%session_id, "Assistant session opened");
        Ok(snapshot)
    }

    pub async fn snapshot(&self, session_id: Uuid) -> Result<PanelSnapshot, SessionError> {
        self.sessions
            .lock()
            .await
            .get_mut(&session_id)
            .map(|s| {
                s.touch();
                s.snapshot(session_id)
            })
            .ok_or(SessionError::NotFound(session_id))
    }

    /// Runs one user turn to completion and returns the settled panel.
    ///
    /// The generation runs in its own task, which also settles the panel, so
    /// the turn finishes even if the caller stops waiting. Closing the session
    /// aborts that task.
    pub async fn submit(
        &self,
        session_id: Uuid,
        input: &str,
    ) -> Result<PanelSnapshot, SessionError> {
        let task = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions
                .get_mut(&session_id)
                .ok_or(SessionError::NotFound(session_id))?;
            session.touch();
            let prompt = session.panel.submit(input)?;
            debug!(%session_id, prompt_len = prompt.len(), "Dispatching assistant turn");

            let generator = Arc::clone(&self.generator);
            let sessions_ref = Arc::clone(&self.sessions);
            let task = tokio::spawn(async move {
                let result = generator.generate(&prompt).await;
                if let Err(e) = &result {
                    warn!(%session_id, "Assistant generation failed: {e}");
                }

                let mut sessions = sessions_ref.lock().await;
                let session = sessions.get_mut(&session_id)?;
                session.in_flight = None;
                session.touch();
                session.panel.complete(result);
                Some(session.snapshot(session_id))
            });
            session.in_flight = Some(task.abort_handle());
            task
        };

        match task.await {
            Ok(Some(snapshot)) => Ok(snapshot),
            Ok(None) => Err(SessionError::Closed(session_id)),
            Err(e) if e.is_cancelled() => Err(SessionError::Closed(session_id)),
            Err(e) => {
                // The task panicked; drop the session rather than leave it stuck awaiting.
                warn!(%session_id, "Assistant turn task failed: {e}");
                self.sessions.lock().await.remove(&session_id);
                Err(SessionError::Closed(session_id))
            }
        }
    }

    /// Removes the session, aborting its in-flight request if there is one.
    pub async fn close(&self, session_id: Uuid) -> Result<(), SessionError> {
        let session = self
            .sessions
            .lock()
            .await
            .remove(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;

        if let Some(handle) = session.in_flight {
            handle.abort();
            info!(%session_id, "Assistant session closed; in-flight request aborted");
        } else {
            info!(%session_id, "Assistant session closed");
        }
        Ok(())
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
