use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use jobs_consolidator::pipeline::compute_stats;
use jobs_consolidator::{Job, JsonSink, Settings, TagExtractor, TagSystem};

#[derive(Parser)]
#[command(name = "jobs_consolidator", about = "Tag, deduplicate and summarize scraped job postings")]
struct Cli {
    /// Settings file (TOML, JSON or YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every configured source and write consolidated output
    Run {
        /// Run sources on a bounded thread pool
        #[arg(long)]
        parallel: bool,
        /// Output directory (overrides settings)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the tags found in a piece of text
    Extract {
        text: String,
        #[arg(long)]
        max_tags: Option<usize>,
        /// Keep aliases as written instead of folding to canonical tags
        #[arg(long)]
        no_normalize: bool,
    },
    /// Print a JSON analysis of a tag list
    Analyze {
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Suggest catalog tags for a partial query
    Suggest {
        query: String,
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },
    /// List the canonical keywords the extractor looks for
    Keywords {
        #[arg(long, default_value = "2")]
        min_len: usize,
    },
    /// Statistics over a consolidated jobs file
    Stats {
        file: PathBuf,
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;

    match cli.command {
        Commands::Run { parallel, output } => {
            let mut settings = settings;
            settings.pipeline.parallel |= parallel;
            if let Some(dir) = output {
                settings.pipeline.output_dir = dir;
            }
            if settings.sources.is_empty() {
                println!("No sources configured. Add [[sources]] entries to the settings file.");
                return Ok(());
            }

            let pipeline = settings.build_pipeline()?;
            info!(sources = ?pipeline.source_names(), "starting run");
            let run = pipeline.run(&settings.global_filters)?;

            let sink = JsonSink::from_settings(&settings.pipeline);
            let jobs_path = sink.write_jobs(&run.jobs)?;
            let report_path = sink.write_report(&run.report)?;

            let report = &run.report;
            println!("Jobs consolidation");
            println!("==================\n");
            println!(
                "Sources:   {} registered, {} ok, {} failed",
                report.scrapers.total, report.scrapers.executed, report.scrapers.errors
            );
            println!("Jobs:      {} ({} duplicates dropped)", run.jobs.len(), report.duplicates);
            println!("Companies: {}", report.stats.unique_companies);
            println!("Tags:      {}", report.stats.unique_tags);
            for err in &report.errors {
                println!("  ! {}: {}", err.scraper, err.message);
            }
            println!("\nWrote {}", jobs_path.display());
            println!("Wrote {}", report_path.display());
        }
        Commands::Extract {
            text,
            max_tags,
            no_normalize,
        } => {
            let catalog = Arc::new(settings.tag_extraction.catalog()?);
            let extractor = TagExtractor::new(catalog)?;
            let mut options = settings.tag_extraction.options();
            if let Some(n) = max_tags {
                options.max_tags = n;
            }
            options.normalize &= !no_normalize;
            let tags = extractor.extract(&text, &options);
            if tags.is_empty() {
                println!("No tags found.");
            }
            for tag in tags {
                println!("{tag}");
            }
        }
        Commands::Analyze { tags } => {
            let system = TagSystem::new(Arc::new(settings.tag_extraction.catalog()?));
            let analysis = system.analyze_tags(&tags);
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Commands::Suggest { query, limit } => {
            let system = TagSystem::new(Arc::new(settings.tag_extraction.catalog()?));
            let suggestions = system.suggest_tags(&query, limit);
            if suggestions.is_empty() {
                println!("No suggestions for '{query}'.");
            }
            for s in suggestions {
                match s.matched_variation {
                    Some(alias) => println!("{:<24} via '{}' ({:.1})", s.tag, alias, s.relevance),
                    None => println!("{:<24} ({:.1})", s.tag, s.relevance),
                }
            }
        }
        Commands::Keywords { min_len } => {
            let catalog = settings.tag_extraction.catalog()?;
            let keywords = catalog.keywords_min_len(min_len);
            for keyword in &keywords {
                println!("{keyword}");
            }
            println!("\n{} keywords", keywords.len());
        }
        Commands::Stats { file, top } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let jobs: Vec<Job> = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", file.display()))?;
            let system = TagSystem::new(Arc::new(settings.tag_extraction.catalog()?));
            let stats = compute_stats(&jobs, &system, top.unwrap_or(settings.pipeline.top_tags));
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}
