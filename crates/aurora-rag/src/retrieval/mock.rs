use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{KnowledgeSearch, SearchError};

/// Scripted knowledge base for tests.
///
/// Results are consumed front-to-back; when the script runs dry, every
/// further call is a miss. Clones share the same script and call log.
#[derive(Clone, Default)]
pub struct MockKnowledgeSearch {
    inner: Arc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<String>>,
}

enum Scripted {
    Hit(String),
    Miss,
    Error(String),
}

impl MockKnowledgeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful lookup returning `content`.
    pub fn push_hit(&self, content: &str) {
        self.push(Scripted::Hit(content.to_string()));
    }

    /// Queues a miss (zero rows).
    pub fn push_miss(&self) {
        self.push(Scripted::Miss);
    }

    /// Queues a failed lookup.
    pub fn push_error(&self, message: &str) {
        self.push(Scripted::Error(message.to_string()));
    }

    pub fn call_count(&self) -> usize {
        self.inner.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Questions passed to `search`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.inner
            .calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn push(&self, scripted: Scripted) {
        if let Ok(mut script) = self.inner.script.lock() {
            script.push_back(scripted);
        }
    }
}

impl KnowledgeSearch for MockKnowledgeSearch {
    async fn search(&self, question: &str) -> Result<Option<String>, SearchError> {
        if let Ok(mut calls) = self.inner.calls.lock() {
            calls.push(question.to_string());
        }

        let scripted = self
            .inner
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front());

        match scripted {
            Some(Scripted::Hit(content)) => Ok(Some(content)),
            Some(Scripted::Miss) | None => Ok(None),
            Some(Scripted::Error(message)) => Err(SearchError::Request { message }),
        }
    }
}
