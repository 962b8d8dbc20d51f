use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tempfile::NamedTempFile;
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use geowiki_core::traits::RecordFormat;
use geowiki_core::{Error, RankedGeo, Result};

/// Returned by the writer once every record is consumed and the destination
/// is in place. `skipped` counts the unranked slots dropped on the way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub written: u64,
    pub skipped: u64,
}

/// Drain `rx` into `path` with `format` on a blocking worker.
pub fn spawn_writer(path: PathBuf, format: Arc<dyn RecordFormat>, rx: Receiver<RankedGeo>) -> JoinHandle<Result<WriteSummary>> {
    tokio::task::spawn_blocking(move || write_records(&path, format.as_ref(), rx))
}

/// Records go to a temporary file next to `path`, which replaces `path` only
/// after the queue closes and everything is flushed. Unranked records are
/// counted and skipped.
pub fn write_records(path: &Path, format: &dyn RecordFormat, mut rx: Receiver<RankedGeo>) -> Result<WriteSummary> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let tmp = NamedTempFile::new_in(&dir).map_err(|source| Error::Open { path: dir.clone(), source })?;
    info!("Writing {} output to '{}'", format.name(), path.display());

    let mut out = BufWriter::new(tmp);
    let mut summary = WriteSummary::default();
    while let Some(record) = rx.blocking_recv() {
        match record.page() {
            Some(page) => { format.write_record(&mut out, record.entity(), page)?; summary.written += 1; }
            None => {
                if summary.skipped == 0 { debug!(id = record.entity().id, "Skipping unranked slots"); }
                summary.skipped += 1;
            }
        }
    }

    let tmp = out.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    info!("Done writing {} records ({} skipped)", summary.written, summary.skipped);
    Ok(summary)
}
