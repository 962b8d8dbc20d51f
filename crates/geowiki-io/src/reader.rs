use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use geowiki_core::traits::RecordDecoder;
use geowiki_core::{Error, Result};

use crate::codec::BincodeDecoder;

/// Decode the count and then exactly that many records, sending each one on
/// `tx`. Blocks while the queue is full. Returns the number of records sent.
///
/// Must run on a blocking thread.
pub fn pump_records<T, D>(decoder: &mut D, tx: &Sender<T>) -> Result<u64>
where
    T: DeserializeOwned,
    D: RecordDecoder,
{
    let count = decoder.read_count()?;
    debug!(count, "decoded record count");
    for _ in 0..count {
        let record = decoder.read_record::<T>()?;
        if tx.blocking_send(record).is_err() {
            return Err(Error::stage("reader", "consumer closed the queue before the stream ended"));
        }
    }
    Ok(count)
}

/// Open `path` and stream its records into a bounded queue of `capacity` on a
/// blocking worker. The queue closes when the stream ends or decoding fails;
/// the handle carries the outcome.
pub fn spawn_reader<T>(path: PathBuf, capacity: usize) -> (Receiver<T>, JoinHandle<Result<u64>>)
where
    T: DeserializeOwned + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity);
    let handle = tokio::task::spawn_blocking(move || {
        let file = File::open(&path).map_err(|source| Error::Open { path: path.clone(), source })?;
        info!("Reading records from {}", path.display());
        let mut decoder = BincodeDecoder::new(BufReader::new(file), path.display().to_string());
        let sent = pump_records(&mut decoder, &tx)?;
        info!("Read {} records from {}", sent, path.display());
        Ok(sent)
    });
    (rx, handle)
}
