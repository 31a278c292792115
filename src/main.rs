//! Sift command-line entrypoint.
//!
//! ```text
//! sift <feed.json> [--json]
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use mimalloc::MiMalloc;

use sift::config::Config;
use sift::embedding::{CachedEmbedder, SentenceEmbedder};
use sift::judgment::{GenaiJudge, JudgmentReranker};
use sift::paper::FeedLoader;
use sift::pipeline::{PaperRanker, RankedShortlist};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Shortlist a day's paper listing against your stated interests.
///
/// Settings come from `SIFT_*` environment variables; see the `config` module.
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// JSON feed of papers to rank
    #[arg(value_name = "FEED")]
    feed: PathBuf,

    /// Print the shortlist as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        namespace = %config.namespace,
        top_k = config.top_k,
        coarse_k = config.coarse_k,
        judgment = config.use_judgment,
        "Sift starting"
    );

    let papers = FeedLoader::new(config.max_contributors)?
        .load_path(&cli.feed)
        .with_context(|| format!("failed to load feed {}", cli.feed.display()))?;

    if config.embedder_path.is_none() {
        // validate() guarantees no semantic feature is weighted, so nothing is embedded
        tracing::info!("No SIFT_EMBEDDER_PATH configured, ranking on metric features only");
    }
    let embedder = Arc::new(CachedEmbedder::new(SentenceEmbedder::load(
        config.encoder_config(),
    )?));

    let reranker = if config.use_judgment {
        let judge = Arc::new(GenaiJudge::new(config.judge_model.clone()));
        JudgmentReranker::new(judge, config.judge_timeout)
    } else {
        JudgmentReranker::disabled()
    };

    let ranker = PaperRanker::new(
        embedder,
        config.weights.clone(),
        reranker,
        config.rank_settings(),
    )?;

    let shortlist = ranker.rank(papers).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&shortlist)?);
    } else {
        print_plain(&shortlist);
    }

    Ok(())
}

fn print_plain(shortlist: &RankedShortlist) {
    println!(
        "{} | {} | {} papers | judgment: {:?}",
        shortlist.namespace,
        shortlist.generated_at.format("%Y-%m-%d %H:%M UTC"),
        shortlist.len(),
        shortlist.judgment
    );
    for (i, paper) in shortlist.papers.iter().enumerate() {
        println!("\n{:>2}. {}", i + 1, paper.title.trim());
        println!("    {}", paper.pdf_url);
        if let Some(summary) = &paper.summary {
            println!("    {}", summary);
        }
    }
}
