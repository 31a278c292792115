//! [`JudgmentProvider`] backed by a chat model through `genai`.
//!
//! Provider credentials are resolved by `genai` from the usual environment variables
//! (`OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, ...) based on the model name.

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};
use serde::Deserialize;
use tracing::debug;

use super::error::JudgmentError;
use super::provider::JudgmentProvider;
use super::types::{JudgmentRequest, Recommendation};

const SYSTEM_PROMPT: &str = "You screen newly published research papers for a reader. \
You receive the reader's interests and a list of candidate papers with their abstracts. \
Pick the papers the reader should read first, best first, and write a one or two sentence \
summary of each pick aimed at that reader. Copy titles exactly as given. \
Answer with a single JSON object of the form \
{\"recommendations\": [{\"title\": \"...\", \"summary\": \"...\"}]} and nothing else.";

#[derive(Debug, Deserialize)]
struct JudgmentReply {
    recommendations: Vec<Recommendation>,
}

pub struct GenaiJudge {
    client: Client,
    model: String,
}

impl std::fmt::Debug for GenaiJudge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiJudge")
            .field("model", &self.model)
            .finish()
    }
}

impl GenaiJudge {
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_client(Client::default(), model)
    }

    pub fn with_client(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl JudgmentProvider for GenaiJudge {
    async fn judge(
        &self,
        request: &JudgmentRequest,
    ) -> Result<Vec<Recommendation>, JudgmentError> {
        let chat_req = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_user_prompt(request)?),
        ]);

        debug!(
            model = %self.model,
            candidates = request.candidates.len(),
            top_k = request.top_k,
            "Sending judgment request"
        );

        let resp = self.client.exec_chat(&self.model, chat_req, None).await?;
        let text = resp.first_text().ok_or(JudgmentError::EmptyResponse)?;

        parse_recommendations(text)
    }
}

pub(crate) fn build_user_prompt(request: &JudgmentRequest) -> Result<String, JudgmentError> {
    let candidates = serde_json::to_string_pretty(&request.candidates).map_err(|e| {
        JudgmentError::MalformedResponse {
            reason: format!("failed to encode candidates: {}", e),
        }
    })?;

    Ok(format!(
        "Reader interests:\n{}\n\nCandidates ({} papers):\n{}\n\nRecommend at most {} papers.",
        request.preference.trim(),
        request.coarse_k,
        candidates,
        request.top_k
    ))
}

/// Parses the judge's reply, tolerating a fenced code block around the JSON.
pub(crate) fn parse_recommendations(text: &str) -> Result<Vec<Recommendation>, JudgmentError> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(JudgmentError::EmptyResponse);
    }

    let reply: JudgmentReply =
        serde_json::from_str(body).map_err(|e| JudgmentError::MalformedResponse {
            reason: e.to_string(),
        })?;

    Ok(reply.recommendations)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // drop an optional language tag on the opening fence line
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
