//! One-stop façade: feed bytes, readers or files, get a [`SequenceReport`].

use std::io::Read;
use std::path::Path;

use crate::accumulator::StreamAccumulator;
use crate::error::Result;
use crate::ingest::{self, IngestConfig};
use crate::report::SequenceReport;

/// Randomness tester for a single logical byte stream.
#[derive(Debug, Clone, Default)]
pub struct SequenceTester {
    acc: StreamAccumulator,
    config: IngestConfig,
}

impl SequenceTester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IngestConfig) -> Self {
        Self {
            acc: StreamAccumulator::new(),
            config,
        }
    }

    pub fn add(&mut self, bytes: &[u8]) {
        self.acc.add(bytes);
    }

    pub fn add_reader<R: Read>(&mut self, reader: R) -> Result<u64> {
        ingest::add_reader(&mut self.acc, reader, &self.config)
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<u64> {
        ingest::add_file(&mut self.acc, path, &self.config)
    }

    pub fn accumulator(&self) -> &StreamAccumulator {
        &self.acc
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Finalize into a report. Repeatable; the tester keeps accepting bytes.
    pub fn finish(&self) -> Result<SequenceReport> {
        let stats = self.acc.finish()?;
        Ok(SequenceReport::from_statistics(&stats))
    }
}
