//! Chunked ingestion from readers and files.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::accumulator::StreamAccumulator;
use crate::error::Result;

/// Default read size: 32 KiB.
pub const DEFAULT_CHUNK_SIZE: usize = 32 * 1024;

/// Ingestion settings. Chunk size only affects throughput, never results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub chunk_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl IngestConfig {
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Chunk size actually used; zero falls back to [`DEFAULT_CHUNK_SIZE`].
    pub fn effective_chunk_size(&self) -> usize {
        if self.chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            self.chunk_size
        }
    }
}

/// Stream everything from `reader` into `acc`, one chunk at a time.
///
/// Returns the number of bytes read.
pub fn add_reader<R: Read>(
    acc: &mut StreamAccumulator,
    mut reader: R,
    config: &IngestConfig,
) -> Result<u64> {
    let mut buf = vec![0u8; config.effective_chunk_size()];
    let mut read_total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        acc.add(&buf[..n]);
        read_total += n as u64;
    }
    Ok(read_total)
}

/// Open `path` and stream its contents into `acc`.
pub fn add_file(
    acc: &mut StreamAccumulator,
    path: impl AsRef<Path>,
    config: &IngestConfig,
) -> Result<u64> {
    let path = path.as_ref();
    log::debug!(
        "reading {} in {}-byte chunks",
        path.display(),
        config.effective_chunk_size()
    );
    let file = File::open(path)?;
    add_reader(acc, file, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Write};

    /// Reader that hands out at most `step` bytes per call and fails once with
    /// `Interrupted` before the first byte.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
        interrupted: bool,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(ErrorKind::Interrupted, "signal"));
            }
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    fn sample(n: usize) -> Vec<u8> {
        (0..n).map(|i| (i * 131 % 256) as u8 ^ (i >> 8) as u8).collect()
    }

    #[test]
    fn zero_chunk_size_uses_default() {
        assert_eq!(IngestConfig::with_chunk_size(0).effective_chunk_size(), DEFAULT_CHUNK_SIZE);
        assert_eq!(IngestConfig::with_chunk_size(7).effective_chunk_size(), 7);
        assert_eq!(IngestConfig::default().chunk_size, 32_768);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: IngestConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, IngestConfig::default());
        let cfg: IngestConfig = serde_json::from_str(r#"{"chunk_size": 4096}"#).unwrap();
        assert_eq!(cfg.chunk_size, 4096);
    }

    #[test]
    fn reader_matches_single_add() {
        let data = sample(100_003);
        let mut expected = StreamAccumulator::new();
        expected.add(&data);

        for chunk in [1, 5, 6, 7, 4096, DEFAULT_CHUNK_SIZE] {
            let mut acc = StreamAccumulator::new();
            let n = add_reader(
                &mut acc,
                Cursor::new(&data[..]),
                &IngestConfig::with_chunk_size(chunk),
            )
            .unwrap();
            assert_eq!(n, data.len() as u64);
            assert_eq!(acc, expected, "chunk size {chunk}");
        }
    }

    #[test]
    fn short_reads_and_interrupts_are_tolerated() {
        let data = sample(10_000);
        let mut acc = StreamAccumulator::new();
        let reader = Trickle {
            data: data.clone(),
            pos: 0,
            step: 13,
            interrupted: false,
        };
        let n = add_reader(&mut acc, reader, &IngestConfig::default()).unwrap();
        assert_eq!(n, 10_000);

        let mut expected = StreamAccumulator::new();
        expected.add(&data);
        assert_eq!(acc, expected);
    }

    #[test]
    fn add_file_reads_whole_file() {
        let data = sample(70_000);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();
        file.flush().unwrap();

        let mut acc = StreamAccumulator::new();
        let n = add_file(&mut acc, file.path(), &IngestConfig::default()).unwrap();
        assert_eq!(n, 70_000);
        assert_eq!(acc.total_bytes(), 70_000);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut acc = StreamAccumulator::new();
        let err = add_file(&mut acc, dir.path().join("absent.bin"), &IngestConfig::default())
            .unwrap_err();
        assert!(matches!(err, crate::AnalysisError::Io(_)));
        assert!(acc.is_empty());
    }
}
