//! Test fixtures for integration tests.

use sift::paper::{Contributor, Paper};

pub const DEFAULT_SECTION: &str = "cs.AI";

pub const DEFAULT_ABSTRACT: &str = "We study a problem and report results.";

#[derive(Default)]
pub struct PaperBuilder {
    title: Option<String>,
    section: Option<String>,
    abstract_text: Option<String>,
    contributors: Vec<Contributor>,
}

impl PaperBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn abstract_text(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = Some(text.into());
        self
    }

    /// Appends a contributor with the given metrics.
    pub fn author(mut self, name: &str, citations: u64, h_index: u64) -> Self {
        self.contributors.push(Contributor {
            name: name.to_string(),
            affiliation: "University".to_string(),
            interests: format!("{name} research interests"),
            citations,
            h_index,
            publications: h_index * 3,
        });
        self
    }

    pub fn interests(mut self, interests: &str) -> Self {
        if let Some(last) = self.contributors.last_mut() {
            last.interests = interests.to_string();
        }
        self
    }

    pub fn build(self) -> Paper {
        let title = self.title.unwrap_or_else(|| "Untitled".to_string());
        Paper {
            section: self.section.unwrap_or_else(|| DEFAULT_SECTION.to_string()),
            pdf_url: format!("https://arxiv.org/pdf/{}", title.to_lowercase().replace(' ', "-")),
            title,
            contributors: self.contributors,
            abstract_text: self
                .abstract_text
                .unwrap_or_else(|| DEFAULT_ABSTRACT.to_string()),
            summary: None,
        }
    }
}

/// `n` papers whose lead-author metrics strictly decrease with the index.
pub fn create_ranked_listing(n: usize) -> Vec<Paper> {
    (0..n)
        .map(|i| {
            let strength = (n - i) as u64;
            PaperBuilder::new(format!("Paper {i:02}"))
                .abstract_text(format!("Abstract number {i}"))
                .author(&format!("lead-{i}"), strength * 100, strength)
                .author(&format!("second-{i}"), strength * 10, strength)
                .build()
        })
        .collect()
}

/// Serializes papers into the feed format consumed by `FeedLoader`.
pub fn to_feed_json(papers: &[Paper]) -> String {
    serde_json::to_string_pretty(papers).expect("papers serialize")
}

pub fn titles(papers: &[Paper]) -> Vec<String> {
    papers.iter().map(|p| p.title.clone()).collect()
}
