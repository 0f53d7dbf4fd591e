// Assistant panel: transcript state machine, prompt building and the
// per-visitor session store. All generation goes through llm_client.

pub mod handlers;
pub mod panel;
pub mod prompts;
pub mod sessions;

pub use sessions::{PanelSnapshot, SessionError, SessionStore};
