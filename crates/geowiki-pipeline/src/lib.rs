//! Stage wiring for one join run: entity stream -> index build, page stream ->
//! match pass, rank, then ranked slots -> writer.
//!
//! Each reader and the writer is a single blocking worker joined to its
//! consumer by a bounded queue. The index build finishes before the page
//! stream is opened, and nothing reaches the destination path unless every
//! stage succeeds.
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use geowiki_core::config::PipelineSettings;
use geowiki_core::{Error, GeoEntity, RankedPage, Result};
use geowiki_io::{spawn_reader, spawn_writer, FormatRegistry, WriteSummary};
use geowiki_join::{rank, JoinIndex, MatchStats, Matcher};

#[derive(Debug, Clone)]
pub struct PipelinePaths {
    pub pages: PathBuf,
    pub geo: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub entities: usize,
    pub distinct_keys: usize,
    pub pages: u64,
    pub matches: MatchStats,
    pub written: WriteSummary,
}

pub async fn run(paths: &PipelinePaths, settings: &PipelineSettings) -> Result<RunReport> {
    run_with_registry(paths, settings, &FormatRegistry::default()).await
}

pub async fn run_with_registry(paths: &PipelinePaths, settings: &PipelineSettings, registry: &FormatRegistry) -> Result<RunReport> {
    settings.validate()?;
    let format = registry.resolve(&paths.output)?;

    info!("Reading Geo Entries from {}", paths.geo.display());
    let (geo_rx, geo_reader) = spawn_reader::<GeoEntity>(paths.geo.clone(), settings.entity_queue);
    let index = JoinIndex::build(geo_rx, settings.log_sample).await;
    join_stage("entity reader", geo_reader).await?;
    let entities = index.len();
    let distinct_keys = index.key_count();

    info!("Reading Ranked Pages from {}", paths.pages.display());
    let (page_rx, page_reader) = spawn_reader::<RankedPage>(paths.pages.clone(), settings.page_queue);
    let matcher = Matcher::new(index, settings.log_sample).with_progress(progress_bar(settings.progress));
    let (index, matches) = matcher.run(page_rx).await;
    let pages = join_stage("page reader", page_reader).await?;

    let mut slots = index.into_slots();
    rank(&mut slots);

    info!("Writing ranked locations to '{}'", paths.output.display());
    let (tx, rx) = mpsc::channel(settings.output_queue);
    let writer = spawn_writer(paths.output.clone(), format, rx);
    for slot in slots {
        // closed early only when the writer failed; its error surfaces below
        if tx.send(slot).await.is_err() {
            break;
        }
    }
    drop(tx);
    let written = join_stage("writer", writer).await?;

    Ok(RunReport { entities, distinct_keys, pages, matches, written })
}

async fn join_stage<T>(stage: &'static str, handle: JoinHandle<Result<T>>) -> Result<T> {
    handle.await.map_err(|e| Error::stage(stage, e))?
}

fn progress_bar(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {pos} pages matched ({per_sec})") {
        pb.set_style(style);
    }
    pb
}
