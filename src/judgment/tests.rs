use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::paper::{Contributor, Paper};

fn paper(title: &str) -> Paper {
    Paper {
        section: "cs.AI".to_string(),
        pdf_url: format!("https://arxiv.org/pdf/{}", title.len()),
        title: title.to_string(),
        contributors: vec![Contributor::unresolved("Lead")],
        abstract_text: format!("Abstract of {title}"),
        summary: None,
    }
}

fn shortlist() -> Vec<Paper> {
    ["Alpha", "Beta", "Gamma", "Delta"].into_iter().map(paper).collect()
}

fn titles(papers: &[Paper]) -> Vec<&str> {
    papers.iter().map(|p| p.title.as_str()).collect()
}

fn reranker(judge: MockJudge) -> (JudgmentReranker, Arc<MockJudge>) {
    let judge = Arc::new(judge);
    let reranker = JudgmentReranker::new(judge.clone(), Duration::from_secs(5));
    (reranker, judge)
}

mod fallback_tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_returns_prefix_without_calling() {
        let (reranker, judge) = reranker(MockJudge::replying(vec![Recommendation::new(
            "Gamma", None,
        )]));
        let reranker = reranker.with_enabled(false);

        let outcome = reranker.rerank(shortlist(), 2, "anything").await;

        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::Disabled));
        assert_eq!(titles(outcome.papers()), vec!["Alpha", "Beta"]);
        assert!(outcome.papers().iter().all(|p| p.summary.is_none()));
        assert_eq!(judge.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_provider_is_disabled() {
        let reranker = JudgmentReranker::disabled();
        assert!(!reranker.is_enabled());

        let outcome = reranker.rerank(shortlist(), 10, "anything").await;
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::Disabled));
        assert_eq!(outcome.papers().len(), 4);
    }

    #[tokio::test]
    async fn test_provider_error_falls_back() {
        let (reranker, judge) = reranker(MockJudge::failing("rate limited"));

        let outcome = reranker.rerank(shortlist(), 3, "anything").await;

        match outcome.fallback_reason() {
            Some(FallbackReason::ProviderFailed(msg)) => assert!(msg.contains("rate limited")),
            other => panic!("unexpected reason: {:?}", other),
        }
        assert_eq!(titles(outcome.papers()), vec!["Alpha", "Beta", "Gamma"]);
        assert!(outcome.papers().iter().all(|p| p.summary.is_none()));
        assert_eq!(judge.call_count(), 1);
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let judge = Arc::new(
            MockJudge::replying(vec![Recommendation::new("Beta", Some("late"))])
                .with_delay(Duration::from_secs(10)),
        );
        let reranker = JudgmentReranker::new(judge, Duration::from_millis(50));

        let outcome = reranker.rerank(shortlist(), 2, "anything").await;

        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::Timeout));
        assert_eq!(titles(outcome.papers()), vec!["Alpha", "Beta"]);
        assert!(outcome.papers().iter().all(|p| p.summary.is_none()));
    }

    #[tokio::test]
    async fn test_no_matches_falls_back() {
        let (reranker, _) = reranker(MockJudge::replying(vec![
            Recommendation::new("Omega", Some("not on the list")),
            Recommendation::new("Alpha Prime", None),
        ]));

        let outcome = reranker.rerank(shortlist(), 2, "anything").await;

        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::NoMatches));
        assert_eq!(titles(outcome.papers()), vec!["Alpha", "Beta"]);
    }

    #[tokio::test]
    async fn test_empty_reply_falls_back() {
        let (reranker, _) = reranker(MockJudge::replying(vec![]));
        let outcome = reranker.rerank(shortlist(), 1, "anything").await;
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::NoMatches));
        assert_eq!(titles(outcome.papers()), vec!["Alpha"]);
    }

    #[tokio::test]
    async fn test_empty_shortlist_skips_provider() {
        let (reranker, judge) = reranker(MockJudge::replying(vec![]));
        let outcome = reranker.rerank(vec![], 3, "anything").await;
        assert!(outcome.papers().is_empty());
        assert_eq!(judge.call_count(), 0);
    }
}

mod matching_tests {
    use super::*;

    #[tokio::test]
    async fn test_judge_order_and_summaries() {
        let (reranker, _) = reranker(MockJudge::replying(vec![
            Recommendation::new("Gamma", Some("g")),
            Recommendation::new("Alpha", Some("a")),
        ]));

        let outcome = reranker.rerank(shortlist(), 3, "anything").await;

        assert!(outcome.is_judged());
        assert_eq!(titles(outcome.papers()), vec!["Gamma", "Alpha"]);
        assert_eq!(outcome.papers()[0].summary.as_deref(), Some("g"));
        assert_eq!(outcome.papers()[1].summary.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_case_insensitive_trimmed_match() {
        let (reranker, _) = reranker(MockJudge::replying(vec![
            Recommendation::new("  bETA \n", Some("b")),
            Recommendation::new("DELTA", None),
        ]));

        let outcome = reranker.rerank(shortlist(), 5, "anything").await;

        assert_eq!(titles(outcome.papers()), vec!["Beta", "Delta"]);
        assert_eq!(outcome.papers()[1].summary, None);
    }

    #[tokio::test]
    async fn test_unmatched_dropped_silently() {
        let (reranker, _) = reranker(MockJudge::replying(vec![
            Recommendation::new("Nope", Some("x")),
            Recommendation::new("Delta", Some("d")),
        ]));

        let outcome = reranker.rerank(shortlist(), 5, "anything").await;
        assert!(outcome.is_judged());
        assert_eq!(titles(outcome.papers()), vec!["Delta"]);
    }

    #[tokio::test]
    async fn test_duplicate_recommendation_kept_once() {
        let (reranker, _) = reranker(MockJudge::replying(vec![
            Recommendation::new("Beta", Some("first")),
            Recommendation::new("beta", Some("second")),
            Recommendation::new("Alpha", None),
        ]));

        let outcome = reranker.rerank(shortlist(), 5, "anything").await;

        assert_eq!(titles(outcome.papers()), vec!["Beta", "Alpha"]);
        assert_eq!(outcome.papers()[0].summary.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_truncates_to_top_k() {
        let (reranker, _) = reranker(MockJudge::replying(
            ["Delta", "Gamma", "Beta", "Alpha"]
                .into_iter()
                .map(|t| Recommendation::new(t, Some("s")))
                .collect(),
        ));

        let outcome = reranker.rerank(shortlist(), 2, "anything").await;
        assert_eq!(titles(outcome.papers()), vec!["Delta", "Gamma"]);
    }

    #[tokio::test]
    async fn test_request_carries_shortlist() {
        let (reranker, judge) = reranker(MockJudge::replying(vec![Recommendation::new(
            "Alpha", None,
        )]));

        reranker.rerank(shortlist(), 2, "graph learning").await;

        let requests = judge.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].preference, "graph learning");
        assert_eq!(requests[0].coarse_k, 4);
        assert_eq!(requests[0].top_k, 2);
        assert_eq!(requests[0].candidates[2].title, "Gamma");
        assert_eq!(requests[0].candidates[2].abstract_text, "Abstract of Gamma");
    }
}

mod outcome_tests {
    use super::*;

    #[test]
    fn test_display() {
        let judged = RerankOutcome::Judged {
            papers: vec![paper("A")],
        };
        assert_eq!(judged.to_string(), "JUDGED (1 papers)");
        assert_eq!(judged.debug_status(), "JUDGED");

        let fallback = RerankOutcome::Fallback {
            papers: vec![],
            reason: FallbackReason::ProviderFailed("boom".to_string()),
        };
        assert_eq!(fallback.to_string(), "FALLBACK PROVIDER_FAILED (boom) (0 papers)");
        assert!(!fallback.is_judged());
    }

    #[test]
    fn test_into_papers() {
        let outcome = RerankOutcome::Fallback {
            papers: vec![paper("A"), paper("B")],
            reason: FallbackReason::Timeout,
        };
        assert_eq!(outcome.into_papers().len(), 2);
    }

    #[test]
    fn test_fallback_reason_serializes_tagged() {
        let json = serde_json::to_value(FallbackReason::ProviderFailed("x".into())).unwrap();
        assert_eq!(json["reason"], "provider_failed");
        assert_eq!(json["detail"], "x");
        let json = serde_json::to_value(FallbackReason::Disabled).unwrap();
        assert_eq!(json["reason"], "disabled");
    }
}
