use thiserror::Error;

#[derive(Debug, Error)]
pub enum JudgmentError {
    #[error("judgment provider failed: {0}")]
    Provider(String),

    #[error("judgment timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("malformed judgment response: {reason}")]
    MalformedResponse { reason: String },

    #[error("judgment provider returned no content")]
    EmptyResponse,
}

impl From<genai::Error> for JudgmentError {
    fn from(err: genai::Error) -> Self {
        JudgmentError::Provider(err.to_string())
    }
}
