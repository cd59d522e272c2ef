//! Event files: the on-disk stream TensorBoard reads.
//!
//! An event file is a sequence of TFRecord-framed `tensorflow.Event`
//! messages. The first event carries only the file version; every later
//! event carries one `Summary`.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use prost::Message;
use tracing::{debug, info, warn};

use super::record::{RecordReader, RecordWriter};
use super::SummaryWriter;
use crate::clock::{unix_secs, Clock, SystemClock};
use crate::config::WriterConfig;
use crate::proto::tensorflow::{event, EVENT_FILE_VERSION};
use crate::proto::{Event, Summary};
use crate::Result;

/// File name prefix shared by all event files.
pub const EVENT_FILE_PREFIX: &str = "events.out.tfevents.";

/// Per-process sequence number keeping file names unique within a second.
static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(0);

/// Appends summaries to a new event file in a log directory.
#[derive(Debug)]
pub struct EventFileWriter {
    path: PathBuf,
    records: Option<RecordWriter<BufWriter<File>>>,
    flush_every_write: bool,
}

impl EventFileWriter {
    /// Create the log directory if needed and open a fresh event file in it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` for an invalid config and `Error::Io`
    /// if the directory or file cannot be created. An existing file is never
    /// overwritten: a name collision is reported as `Error::Io`.
    pub fn create(config: &WriterConfig) -> Result<Self> {
        config.validate()?;
        fs::create_dir_all(&config.logdir)?;

        let now = SystemClock.now();
        let file_id = NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed);
        let path = config.logdir.join(event_file_name(
            now.timestamp(),
            file_id,
            &config.filename_suffix,
        ));
        let file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        let mut writer = Self {
            path,
            records: Some(RecordWriter::new(BufWriter::new(file))),
            flush_every_write: config.flush_every_write,
        };
        writer.write_event(&Event {
            wall_time: unix_secs(now),
            step: 0,
            what: Some(event::What::FileVersion(EVENT_FILE_VERSION.to_string())),
        })?;
        info!(path = %writer.path.display(), "created event file");
        Ok(writer)
    }

    /// Path of the event file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and close the file. Further writes are skipped by callers that
    /// check [`SummaryWriter::is_active`].
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the final flush fails.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut records) = self.records.take() {
            records.flush()?;
            info!(path = %self.path.display(), "closed event file");
        }
        Ok(())
    }

    fn write_event(&mut self, event: &Event) -> Result<()> {
        let Some(records) = self.records.as_mut() else {
            return Err(closed_error(&self.path));
        };
        records.write_record(&event.encode_to_vec())?;
        if self.flush_every_write {
            records.flush()?;
        }
        Ok(())
    }
}

impl SummaryWriter for EventFileWriter {
    fn is_active(&self) -> bool {
        self.records.is_some()
    }

    fn write_summary(&mut self, summary: &Summary, step: i64) -> Result<()> {
        let event = Event {
            wall_time: SystemClock.now_secs(),
            step,
            what: Some(event::What::Summary(summary.clone())),
        };
        self.write_event(&event)?;
        debug!(path = %self.path.display(), step, values = summary.value.len(), "wrote summary");
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.records.as_mut() {
            Some(records) => records.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for EventFileWriter {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(path = %self.path.display(), error = %e, "failed to close event file");
        }
    }
}

fn closed_error(path: &Path) -> crate::Error {
    crate::Error::Io(std::io::Error::new(
        std::io::ErrorKind::BrokenPipe,
        format!("event file already closed: {}", path.display()),
    ))
}

fn event_file_name(timestamp: i64, file_id: u64, suffix: &str) -> String {
    let host = std::env::var("HOSTNAME")
        .ok()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "localhost".to_string());
    format!(
        "{EVENT_FILE_PREFIX}{timestamp:010}.{host}.{}.{file_id}{suffix}",
        std::process::id()
    )
}

/// Reads events back from an event file, verifying record checksums.
#[derive(Debug)]
pub struct EventFileReader {
    records: RecordReader<BufReader<File>>,
}

impl EventFileReader {
    /// Open an event file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self {
            records: RecordReader::new(BufReader::new(file)),
        })
    }

    /// Read the next event, or `None` at end of file.
    ///
    /// # Errors
    ///
    /// Returns framing errors from the record layer and `Error::Decode`
    /// for malformed events.
    pub fn read_event(&mut self) -> Result<Option<Event>> {
        match self.records.read_record()? {
            Some(bytes) => Ok(Some(Event::decode(bytes.as_slice())?)),
            None => Ok(None),
        }
    }

    /// Read all remaining events.
    ///
    /// # Errors
    ///
    /// See [`EventFileReader::read_event`].
    pub fn read_all(mut self) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        while let Some(event) = self.read_event()? {
            events.push(event);
        }
        Ok(events)
    }
}

/// Event files directly inside `logdir`, sorted by name.
///
/// # Errors
///
/// Returns `Error::Io` if the directory cannot be listed.
pub fn event_files(logdir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(logdir.as_ref())? {
        let path = entry?.path();
        let is_event_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(EVENT_FILE_PREFIX));
        if is_event_file && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
