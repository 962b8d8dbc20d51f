use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use geowiki_core::config::{expand_path, Config};
use geowiki_pipeline::{run, PipelinePaths};

/// Join gazetteer entities with page rankings and write them in rank order.
#[derive(Debug, Parser)]
#[command(name = "geowiki-rank", version)]
struct Args {
    /// Ranked page stream
    pages: String,
    /// Geo entity stream
    geo: String,
    /// Output file; the extension selects the format (txt)
    output: String,
    /// Print the run report as JSON on stdout
    #[arg(long)]
    summary_json: bool,
    /// Show a spinner during the match pass
    #[arg(long)]
    progress: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = Config::load().context("loading configuration")?;
    let mut settings = config.pipeline().context("reading [pipeline] settings")?;
    settings.progress |= args.progress;

    let paths = PipelinePaths { pages: expand_path(&args.pages), geo: expand_path(&args.geo), output: expand_path(&args.output) };
    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime
        .block_on(run(&paths, &settings))
        .with_context(|| format!("ranking {} against {}", paths.geo.display(), paths.pages.display()))?;

    info!(
        "Wrote {} ranked locations to '{}' (found {}, missing {})",
        report.written.written,
        paths.output.display(),
        report.matches.found,
        report.matches.missing
    );
    if args.summary_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
