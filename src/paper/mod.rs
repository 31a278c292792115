//! Paper records as handed over by the listing scraper.
//!
//! Author metadata arrives fully resolved; nothing in this crate performs lookups.
//! A paper's identity is its [`PaperKey`] (the trimmed title), never object identity.

pub mod error;
pub mod feed;

pub use error::FeedError;
pub use feed::FeedLoader;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a paper within one run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaperKey(String);

impl PaperKey {
    /// Builds a key from a title (surrounding whitespace is ignored).
    pub fn from_title(title: &str) -> Self {
        Self(title.trim().to_string())
    }

    /// Returns the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaperKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A listed author with citation metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    #[serde(default)]
    pub affiliation: String,
    /// Free-text research interests (comma separated upstream).
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub citations: u64,
    #[serde(default)]
    pub h_index: u64,
    #[serde(default)]
    pub publications: u64,
}

impl Contributor {
    /// Placeholder for an author whose metadata could not be resolved.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// One listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Listing section (e.g. `cs.AI`).
    pub section: String,
    pub pdf_url: String,
    pub title: String,
    /// Ordered author list; index 0 is the lead author.
    pub contributors: Vec<Contributor>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Short annotation written by the judgment step. Absent until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Paper {
    /// Returns this paper's identity key.
    pub fn key(&self) -> PaperKey {
        PaperKey::from_title(&self.title)
    }

    /// Returns the lead author, if any.
    pub fn lead_contributor(&self) -> Option<&Contributor> {
        self.contributors.first()
    }

    /// Sets the summary unless one is already present.
    ///
    /// Returns `false` (and leaves the paper untouched) when a summary already exists.
    pub fn annotate(&mut self, summary: impl Into<String>) -> bool {
        if self.summary.is_some() {
            return false;
        }
        self.summary = Some(summary.into());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str) -> Paper {
        Paper {
            section: "cs.AI".to_string(),
            pdf_url: "https://arxiv.org/pdf/0000.00000".to_string(),
            title: title.to_string(),
            contributors: vec![Contributor::unresolved("Ada")],
            abstract_text: "An abstract.".to_string(),
            summary: None,
        }
    }

    #[test]
    fn test_key_trims_title() {
        assert_eq!(paper("  Sparse Mixtures \n").key(), PaperKey::from_title("Sparse Mixtures"));
        assert_eq!(paper(" x ").key().as_str(), "x");
    }

    #[test]
    fn test_annotate_sets_summary_once() {
        let mut p = paper("Title");
        assert!(p.annotate("first"));
        assert!(!p.annotate("second"));
        assert_eq!(p.summary.as_deref(), Some("first"));
    }

    #[test]
    fn test_lead_contributor() {
        let mut p = paper("Title");
        assert_eq!(p.lead_contributor().map(|c| c.name.as_str()), Some("Ada"));
        p.contributors.clear();
        assert!(p.lead_contributor().is_none());
    }

    #[test]
    fn test_abstract_field_serde_name() {
        let json = serde_json::to_value(paper("Title")).expect("serializes");
        assert!(json.get("abstract").is_some());
        assert!(json.get("summary").is_none());
    }
}
