//! In-memory summary writer

use super::SummaryWriter;
use crate::proto::Summary;
use crate::Result;

/// Collects summaries in memory.
///
/// Useful for inspecting what would be written without touching disk, and
/// for driving callbacks in tests.
#[derive(Debug, Clone)]
pub struct MemoryWriter {
    summaries: Vec<(i64, Summary)>,
    active: bool,
}

impl Default for MemoryWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryWriter {
    /// Create an active, empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            summaries: Vec::new(),
            active: true,
        }
    }

    /// Stop accepting summaries.
    pub fn close(&mut self) {
        self.active = false;
    }

    /// Summaries written so far, with their steps.
    #[must_use]
    pub fn summaries(&self) -> &[(i64, Summary)] {
        &self.summaries
    }

    /// Number of summaries written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// True if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

impl SummaryWriter for MemoryWriter {
    fn is_active(&self) -> bool {
        self.active
    }

    fn write_summary(&mut self, summary: &Summary, step: i64) -> Result<()> {
        self.summaries.push((step, summary.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_writer_collects() {
        let mut writer = MemoryWriter::new();
        assert!(writer.is_active());
        writer.write_summary(&Summary::default(), 3).unwrap();
        assert_eq!(writer.len(), 1);
        assert_eq!(writer.summaries()[0].0, 3);
    }

    #[test]
    fn test_close_deactivates() {
        let mut writer = MemoryWriter::new();
        writer.close();
        assert!(!writer.is_active());
        assert!(writer.is_empty());
    }
}
