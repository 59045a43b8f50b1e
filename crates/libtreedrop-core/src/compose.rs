//! Chat compose surface: attachments, drops and submission.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::backend::{AttachmentRef, BackendError, ChatBackend, ChatRequest};
use crate::identity::IdentityIndex;
use crate::selection::SelectionSet;
use crate::transfer::{accept_drop, DataTransfer};
use crate::types::file::FileHandle;

/// Shown when a submission has files but no text
pub const ATTACHMENT_ONLY_TEXT: &str = "Analyzing attached files...";

/// Shown when the backend call fails
pub const APOLOGY_TEXT: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

/// First bot message of a fresh session
pub const GREETING_TEXT: &str =
    "I'm ready to help you analyze your files and directory structure. What would you like to know?";

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub text: String,
    pub is_user: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attached_files: Vec<FileHandle>,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn user(text: impl Into<String>, attached_files: Vec<FileHandle>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
            attached_files,
            timestamp: Utc::now(),
        }
    }

    fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
            attached_files: Vec::new(),
            timestamp: Utc::now(),
        }
    }
}

/// What a call to [`ComposeSession::submit`] did
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank input and nothing attached
    Skipped,
    /// Backend answered; `reply` is `None` when it sent no text
    Replied { reply: Option<String> },
    /// Backend call failed; the apology was appended
    Failed(BackendError),
}

/// One chat surface over the files of an ingestion
pub struct ComposeSession<B> {
    backend: B,
    known: IdentityIndex,
    selection: SelectionSet,
    messages: Vec<ChatMessage>,
    feedback: u8,
}

impl<B: ChatBackend> ComposeSession<B> {
    pub fn new(backend: B, known: IdentityIndex, feedback: u8) -> Self {
        Self {
            backend,
            known,
            selection: SelectionSet::new(),
            messages: vec![ChatMessage::bot(GREETING_TEXT)],
            feedback,
        }
    }

    /// Replace the files drops are resolved against
    pub fn set_known(&mut self, known: IdentityIndex) {
        self.known = known;
    }

    pub fn known(&self) -> &IdentityIndex {
        &self.known
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// For subscribing views and for tree-side toggles
    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn toggle(&mut self, file: &FileHandle) -> bool {
        self.selection.toggle(file)
    }

    /// Remove a chip
    pub fn remove(&mut self, file: &FileHandle) -> bool {
        self.selection.remove(file)
    }

    /// Add files chosen from the flat picker; already selected ones stay
    pub fn attach_picked(&mut self, files: &[FileHandle]) {
        for file in files {
            self.selection.insert(file);
        }
    }

    /// Handle a drop on the compose area. Unknown or malformed payloads are
    /// ignored.
    pub fn drop_payload(&mut self, transfer: &DataTransfer) -> Option<FileHandle> {
        accept_drop(transfer, &self.known, &mut self.selection)
    }

    pub async fn submit(&mut self, input: &str) -> SubmitOutcome {
        if input.trim().is_empty() && self.selection.is_empty() {
            return SubmitOutcome::Skipped;
        }

        let attached = self.selection.files();
        let text = if input.is_empty() { ATTACHMENT_ONLY_TEXT } else { input };
        self.messages.push(ChatMessage::user(text, attached.clone()));

        let request = ChatRequest {
            data: input.to_string(),
            files: attached
                .iter()
                .map(|f| AttachmentRef {
                    name: f.name().to_string(),
                })
                .collect(),
            feedback: self.feedback,
        };
        debug!(files = request.files.len(), "submitting chat request");

        match self.backend.send(&request).await {
            Ok(reply) => {
                self.selection.clear();
                if let Some(text) = &reply.response {
                    self.messages.push(ChatMessage::bot(text.clone()));
                }
                SubmitOutcome::Replied {
                    reply: reply.response,
                }
            }
            Err(e) => {
                warn!(error = %e, "chat request failed");
                self.messages.push(ChatMessage::bot(APOLOGY_TEXT));
                SubmitOutcome::Failed(e)
            }
        }
    }
}
