use anyhow::Context;
use clap::Parser;
use genrematch::{sample, Analysis, AppConfig, Preset};
use std::fs;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Ontology-aware user similarity, clustering and recommendations
#[derive(Parser, Debug)]
#[command(name = "genrematch")]
#[command(about = "Cluster users by genre preferences and recommend similar users")]
#[command(long_about = None)]
struct Args {
    /// CSV file with one `user,label,label,...` row per user
    #[arg(short, long, required_unless_present = "write_sample")]
    input: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON ontology replacing the built-in one
    #[arg(long)]
    ontology: Option<PathBuf>,

    /// Similarity weight preset (desktop or compact)
    #[arg(long)]
    preset: Option<Preset>,

    /// Distance threshold for flat clusters
    #[arg(long)]
    threshold: Option<f64>,

    /// Minimum similarity for a similarity graph edge
    #[arg(long)]
    graph_threshold: Option<f64>,

    /// Neighbours reported per user
    #[arg(long)]
    top_k: Option<usize>,

    /// Recommend for this user (repeatable); all users when omitted
    #[arg(short, long = "user")]
    users: Vec<String>,

    /// Treat the first CSV row as a header
    #[arg(long)]
    has_headers: bool,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the bundled sample dataset to this path and exit
    #[arg(long)]
    write_sample: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(path) = &args.write_sample {
        sample::write(path).with_context(|| format!("writing sample to {}", path.display()))?;
        info!("Sample dataset written to {}", path.display());
        return Ok(());
    }

    info!("Starting genrematch v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(preset) = args.preset {
        config = config.with_preset(preset);
    }
    if let Some(threshold) = args.threshold {
        config.clustering.distance_threshold = threshold;
    }
    if let Some(graph_threshold) = args.graph_threshold {
        config.report.graph_threshold = graph_threshold;
    }
    if let Some(top_k) = args.top_k {
        config.recommend.top_k = top_k;
    }
    if args.ontology.is_some() {
        config.ontology_path = args.ontology.clone();
    }
    if args.has_headers {
        config.load.has_headers = true;
    }

    let analysis = Analysis::new(config)?;
    let input = args
        .input
        .as_ref()
        .context("--input is required")?;
    let report = analysis
        .run_path(input, &args.users)
        .with_context(|| format!("analyzing {}", input.display()))?;

    let json = report.to_json_pretty()?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
