use std::fmt;

use serde::{Deserialize, Serialize};

use crate::paper::Paper;

/// What the judge sees of one shortlisted paper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

impl From<&Paper> for Candidate {
    fn from(paper: &Paper) -> Self {
        Self {
            title: paper.title.clone(),
            abstract_text: paper.abstract_text.clone(),
        }
    }
}

/// One judgment call: pick up to `top_k` of the `coarse_k` candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgmentRequest {
    pub preference: String,
    pub candidates: Vec<Candidate>,
    pub coarse_k: usize,
    pub top_k: usize,
}

impl JudgmentRequest {
    pub fn new(preference: impl Into<String>, shortlist: &[Paper], top_k: usize) -> Self {
        Self {
            preference: preference.into(),
            candidates: shortlist.iter().map(Candidate::from).collect(),
            coarse_k: shortlist.len(),
            top_k,
        }
    }
}

/// A paper the judge picked, identified by title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
}

impl Recommendation {
    pub fn new(title: impl Into<String>, summary: Option<&str>) -> Self {
        Self {
            title: title.into(),
            summary: summary.map(str::to_string),
        }
    }
}

/// Why the reranker returned the coarse order instead of the judge's pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "detail")]
pub enum FallbackReason {
    /// Judgment switched off or no provider configured.
    Disabled,
    Timeout,
    ProviderFailed(String),
    /// The judge answered but none of its titles matched the shortlist.
    NoMatches,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Disabled => write!(f, "DISABLED"),
            FallbackReason::Timeout => write!(f, "TIMEOUT"),
            FallbackReason::ProviderFailed(reason) => write!(f, "PROVIDER_FAILED ({})", reason),
            FallbackReason::NoMatches => write!(f, "NO_MATCHES"),
        }
    }
}

/// Result of the judgment step. Never an error: failures degrade to [`RerankOutcome::Fallback`].
#[derive(Debug, Clone, PartialEq)]
pub enum RerankOutcome {
    /// Papers picked by the judge, in the judge's order, annotated.
    Judged { papers: Vec<Paper> },
    /// First `top_k` shortlist papers, unannotated.
    Fallback {
        papers: Vec<Paper>,
        reason: FallbackReason,
    },
}

impl RerankOutcome {
    pub fn papers(&self) -> &[Paper] {
        match self {
            RerankOutcome::Judged { papers } | RerankOutcome::Fallback { papers, .. } => papers,
        }
    }

    pub fn into_papers(self) -> Vec<Paper> {
        match self {
            RerankOutcome::Judged { papers } | RerankOutcome::Fallback { papers, .. } => papers,
        }
    }

    pub fn is_judged(&self) -> bool {
        matches!(self, RerankOutcome::Judged { .. })
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            RerankOutcome::Judged { .. } => None,
            RerankOutcome::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Short status string for logs.
    pub fn debug_status(&self) -> &'static str {
        match self {
            RerankOutcome::Judged { .. } => "JUDGED",
            RerankOutcome::Fallback { .. } => "FALLBACK",
        }
    }
}

impl fmt::Display for RerankOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RerankOutcome::Judged { papers } => write!(f, "JUDGED ({} papers)", papers.len()),
            RerankOutcome::Fallback { papers, reason } => {
                write!(f, "FALLBACK {} ({} papers)", reason, papers.len())
            }
        }
    }
}
