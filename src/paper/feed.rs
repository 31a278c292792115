//! Loads the resolved listing emitted by the scraper.
//!
//! The feed is a JSON array of [`Paper`] records. Each paper's contributor list is capped at
//! `max_contributors` so that long author lists do not dominate the averaged metrics.

use std::path::Path;

use tracing::{debug, info};

use super::Paper;
use super::error::FeedError;
use crate::constants::DEFAULT_MAX_CONTRIBUTORS;

#[derive(Debug, Clone)]
pub struct FeedLoader {
    max_contributors: usize,
}

impl Default for FeedLoader {
    fn default() -> Self {
        Self {
            max_contributors: DEFAULT_MAX_CONTRIBUTORS,
        }
    }
}

impl FeedLoader {
    pub fn new(max_contributors: usize) -> Result<Self, FeedError> {
        if max_contributors == 0 {
            return Err(FeedError::InvalidContributorCap);
        }
        Ok(Self { max_contributors })
    }

    pub fn max_contributors(&self) -> usize {
        self.max_contributors
    }

    pub fn load_path(&self, path: &Path) -> Result<Vec<Paper>, FeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let papers = self.parse(&raw)?;
        info!(path = %path.display(), papers = papers.len(), "Feed loaded");
        Ok(papers)
    }

    pub fn parse(&self, raw: &str) -> Result<Vec<Paper>, FeedError> {
        let papers: Vec<Paper> = serde_json::from_str(raw)?;
        papers
            .into_iter()
            .enumerate()
            .map(|(index, paper)| self.normalise(index, paper))
            .collect()
    }

    fn normalise(&self, index: usize, mut paper: Paper) -> Result<Paper, FeedError> {
        if paper.title.trim().is_empty() {
            return Err(FeedError::BlankTitle { index });
        }

        if paper.contributors.len() > self.max_contributors {
            debug!(
                title = %paper.title,
                listed = paper.contributors.len(),
                kept = self.max_contributors,
                "Capping contributor list"
            );
            paper.contributors.truncate(self.max_contributors);
        }

        Ok(paper)
    }
}
