//! Summary writers
//!
//! A [`SummaryWriter`] is the sink hparams summaries are appended to. It is
//! passed explicitly to the functions that write, rather than looked up from
//! ambient state, and it reports whether it is currently accepting writes.
//!
//! # Example
//!
//! ```rust,no_run
//! use trueno_hparams::writer::{EventFileWriter, SummaryWriter};
//! use trueno_hparams::WriterConfig;
//!
//! let mut writer = EventFileWriter::create(&WriterConfig::new("logs/hparam_tuning"))?;
//! assert!(writer.is_active());
//! writer.close()?;
//! assert!(!writer.is_active());
//! # Ok::<(), trueno_hparams::Error>(())
//! ```

mod event_file;
mod memory;
pub mod record;

pub use event_file::{event_files, EventFileReader, EventFileWriter, EVENT_FILE_PREFIX};
pub use memory::MemoryWriter;

use crate::proto::Summary;
use crate::Result;

/// Sink for summaries.
pub trait SummaryWriter {
    /// True if the writer currently accepts summaries.
    fn is_active(&self) -> bool;

    /// Append one summary recorded at `step`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying sink fails.
    fn write_summary(&mut self, summary: &Summary, step: i64) -> Result<()>;

    /// Flush buffered summaries.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying sink fails.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<W: SummaryWriter + ?Sized> SummaryWriter for &mut W {
    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn write_summary(&mut self, summary: &Summary, step: i64) -> Result<()> {
        (**self).write_summary(summary, step)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

impl<W: SummaryWriter + ?Sized> SummaryWriter for Box<W> {
    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn write_summary(&mut self, summary: &Summary, step: i64) -> Result<()> {
        (**self).write_summary(summary, step)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
