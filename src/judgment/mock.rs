//! Scriptable judge for tests.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::JudgmentError;
use super::provider::JudgmentProvider;
use super::types::{JudgmentRequest, Recommendation};

#[derive(Debug, Clone)]
enum Script {
    Reply(Vec<Recommendation>),
    Fail(String),
}

/// Answers every request with a fixed reply (or error), optionally after a delay.
#[derive(Debug)]
pub struct MockJudge {
    script: Script,
    delay: Option<Duration>,
    requests: Mutex<Vec<JudgmentRequest>>,
}

impl MockJudge {
    pub fn replying(recommendations: Vec<Recommendation>) -> Self {
        Self {
            script: Script::Reply(recommendations),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Script::Fail(message.into()),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleeps this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<JudgmentRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl JudgmentProvider for MockJudge {
    async fn judge(
        &self,
        request: &JudgmentRequest,
    ) -> Result<Vec<Recommendation>, JudgmentError> {
        self.requests.lock().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.script {
            Script::Reply(recs) => Ok(recs.clone()),
            Script::Fail(message) => Err(JudgmentError::Provider(message.clone())),
        }
    }
}
