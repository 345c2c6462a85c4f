//! SageForge CLI — the news simplifier operations, non-interactively.
//!
//! Commands:
//! - `search` — fetch and simplify news articles for a query
//! - `simplify` — simplify standalone financial text
//! - `trending` — print suggested search topics
//! - `sentiment` — per-company sentiment summary and article list

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use sageforge_core::client::{HttpBackend, NewsBackend};
use sageforge_core::config::BackendConfig;
use sageforge_core::model::{validate_custom_text, DateRange, Level, SearchQuery};
use sageforge_core::{companies, SentimentSummary};

#[derive(Parser)]
#[command(
    name = "sageforge",
    about = "SageForge CLI — financial news search, simplification, and sentiment"
)]
struct Cli {
    /// Backend base URL (overrides the config file).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and simplify news articles for a query.
    Search {
        /// Search query (company, topic, or ticker).
        query: String,

        /// Reading level for the simplified content.
        #[arg(long, value_enum, default_value_t = LevelArg::Basic)]
        level: LevelArg,

        /// Restrict results to a date range.
        #[arg(long, value_enum)]
        date_range: Option<RangeArg>,
    },
    /// Simplify standalone financial text (max 10,000 characters).
    Simplify {
        /// Text to simplify. Omit to read from a file.
        text: Option<String>,

        /// Read the text from a file instead.
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Reading level for the simplified content.
        #[arg(long, value_enum, default_value_t = LevelArg::Basic)]
        level: LevelArg,
    },
    /// Print suggested search topics.
    Trending,
    /// Per-company sentiment summary and article list.
    Sentiment {
        /// Company name or symbol (e.g. TSLA, "Tata Motors").
        company: String,

        /// Date range for the news feed.
        #[arg(long, value_enum, default_value_t = RangeArg::OneDay)]
        date_range: RangeArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    Basic,
    Detailed,
    Expert,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Basic => Level::Basic,
            LevelArg::Detailed => Level::Detailed,
            LevelArg::Expert => Level::Expert,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RangeArg {
    #[value(name = "1d")]
    OneDay,
    #[value(name = "3d")]
    ThreeDays,
    #[value(name = "1w")]
    OneWeek,
    #[value(name = "1m")]
    OneMonth,
}

impl From<RangeArg> for DateRange {
    fn from(arg: RangeArg) -> Self {
        match arg {
            RangeArg::OneDay => DateRange::OneDay,
            RangeArg::ThreeDays => DateRange::ThreeDays,
            RangeArg::OneWeek => DateRange::OneWeek,
            RangeArg::OneMonth => DateRange::OneMonth,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BackendConfig::load(path)?,
        None => {
            let default_path = dirs_config_path();
            BackendConfig::load(&default_path)?
        }
    };
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }

    let backend = HttpBackend::new(&config).context("failed to build the HTTP client")?;

    match cli.command {
        Commands::Search {
            query,
            level,
            date_range,
        } => run_search(&backend, &query, level.into(), date_range.map(Into::into)),
        Commands::Simplify { text, file, level } => {
            run_simplify(&backend, text, file, level.into())
        }
        Commands::Trending => run_trending(&backend),
        Commands::Sentiment {
            company,
            date_range,
        } => run_sentiment(&backend, &company, date_range.into()),
    }
}

fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sageforge")
        .join("config.toml")
}

fn run_search(
    backend: &dyn NewsBackend,
    query: &str,
    level: Level,
    date_range: Option<DateRange>,
) -> Result<()> {
    let query = SearchQuery::new(query, level, date_range)?;
    let resp = backend.search_news(&query)?;

    if resp.articles.is_empty() {
        println!("No articles found for \"{}\".", query.query);
        return Ok(());
    }

    println!(
        "{} articles for \"{}\" ({} level)",
        resp.articles.len(),
        query.query,
        level.label()
    );
    println!();

    for (i, article) in resp.articles.iter().enumerate() {
        println!("{}. {}", i + 1, article.original.title);
        println!(
            "   {} | {} | complexity {} | {} jargon terms | readability {:.0}",
            article.original.source,
            article.original.published_date(),
            article.analysis.complexity,
            article.analysis.jargon_count,
            article.analysis.readability_score,
        );
        if !article.simplified.summary.is_empty() {
            println!("   {}", article.simplified.summary);
        }
        println!();
    }

    Ok(())
}

fn run_simplify(
    backend: &dyn NewsBackend,
    text: Option<String>,
    file: Option<PathBuf>,
    level: Level,
) -> Result<()> {
    let raw = match (text, file) {
        (Some(t), None) => t,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => bail!("provide text as an argument or via --file"),
        (Some(_), Some(_)) => unreachable!("clap enforces the conflict"),
    };

    let text = validate_custom_text(&raw)?;
    let result = backend.simplify_text(text, level)?;

    println!("=== Simplified ({} level) ===", level.label());
    println!("{}", result.simplified_text);
    println!();
    println!(
        "Complexity: {} | Jargon terms: {} | Readability: {:.0}",
        result.complexity, result.jargon_count, result.readability_score
    );

    if !result.jargon_detected.is_empty() {
        println!();
        println!("--- Jargon explained ---");
        for item in &result.jargon_detected {
            println!("{:<24} {}", item.display_term(), item.explanation);
        }
    }

    if !result.insights.is_empty() {
        println!();
        println!("--- Key insights ---");
        for insight in &result.insights {
            println!("{}: {}", insight.title, insight.description);
        }
    }

    Ok(())
}

fn run_trending(backend: &dyn NewsBackend) -> Result<()> {
    let topics = backend.trending_topics()?;
    if topics.is_empty() {
        println!("No trending topics right now.");
        return Ok(());
    }
    for topic in topics {
        println!("{topic}");
    }
    Ok(())
}

fn run_sentiment(backend: &dyn NewsBackend, company: &str, date_range: DateRange) -> Result<()> {
    let symbol = companies::resolve(company);
    if symbol.is_empty() {
        bail!("company must not be empty");
    }

    let articles = backend.company_news(symbol, date_range)?;
    let Some(summary) = SentimentSummary::from_articles(&articles) else {
        println!(
            "No recent news for {symbol} in the last {}.",
            date_range.label()
        );
        return Ok(());
    };

    println!(
        "{symbol}: {} ({}% confidence, {} articles, last {})",
        summary.dominant.label(),
        summary.confidence_pct,
        summary.total,
        date_range.label()
    );
    println!(
        "positive {} / negative {} / neutral {}",
        summary.positive, summary.negative, summary.neutral
    );
    println!("{}", summary.reasoning());
    println!();

    for article in &articles {
        println!(
            "[{:>8}] {:>4}  {}  ({})",
            article.sentiment.label(),
            article.confidence_pct(),
            article.title,
            article.source.name
        );
    }

    Ok(())
}
