//! Scripted completion service for testing and development

use crate::core::error::CompletionError;
use crate::core::service::{CompletionRequest, CompletionService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Completion service replaying a fixed queue of replies
///
/// Every request is recorded. When the queue runs dry the service answers
/// with a `Transport` error.
#[derive(Clone, Default)]
pub struct ScriptedCompletionService {
    replies: Arc<Mutex<VecDeque<Result<String, CompletionError>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedCompletionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    /// Queue a failure
    pub fn fail(self, error: CompletionError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, entry: Result<String, CompletionError>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(entry);
        }
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Replies not yet consumed
    pub fn remaining(&self) -> usize {
        self.replies.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletionService {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let lock_error = |e: String| CompletionError::Transport {
            message: format!("Failed to acquire lock: {}", e),
        };

        self.requests
            .lock()
            .map_err(|e| lock_error(e.to_string()))?
            .push(request);

        self.replies
            .lock()
            .map_err(|e| lock_error(e.to_string()))?
            .pop_front()
            .unwrap_or_else(|| {
                Err(CompletionError::Transport {
                    message: "no scripted reply left".to_string(),
                })
            })
    }
}
