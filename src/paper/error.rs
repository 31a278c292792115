use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse feed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("paper #{index} has a blank title")]
    BlankTitle { index: usize },

    #[error("max_contributors must be at least 1")]
    InvalidContributorCap,
}
