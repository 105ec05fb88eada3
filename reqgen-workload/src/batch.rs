//! A generated request batch and its file writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use reqgen_types::RequestLine;

use crate::workload::WorkloadError;

/// An ordered batch of request lines, as produced by a workload.
///
/// Lines are kept in emission order; the file written from a batch is the
/// batch, verbatim. The fresh/reused split is tracked for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    lines: Vec<RequestLine>,
    reused: usize,
}

impl Batch {
    pub(crate) fn new(lines: Vec<RequestLine>, reused: usize) -> Self {
        Self { lines, reused }
    }

    /// The request lines, in emission order.
    pub fn lines(&self) -> &[RequestLine] {
        &self.lines
    }

    /// The number of lines in the batch.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The number of lines that were freshly generated.
    pub fn fresh(&self) -> usize {
        self.lines.len() - self.reused
    }

    /// The number of lines that are duplicates of earlier lines.
    pub fn reused(&self) -> usize {
        self.reused
    }

    /// Writes the batch to `path`, newline-terminated, in emission order.
    ///
    /// The file is created if absent and truncated if present. On error
    /// nothing is retried; the batch either reaches the file completely or
    /// the error is surfaced.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), WorkloadError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for line in &self.lines {
            writeln!(writer, "{line}")?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::workload::{PatternKind, Workload};

    use super::*;

    fn batch(lines: usize, seed: u64) -> Batch {
        Workload::builder("test")
            .lines(lines)
            .seed(seed)
            .pattern(PatternKind::Random { chars: 8 })
            .build()
            .unwrap()
            .generate()
    }

    #[test]
    fn writes_newline_terminated_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.txt");

        let batch = batch(20, 1);
        batch.write_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with('\n'));

        let read_back: Vec<RequestLine> = contents
            .lines()
            .map(|line| line.parse().unwrap())
            .collect();
        assert_eq!(read_back, batch.lines());
    }

    #[test]
    fn overwrite_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.txt");

        batch(100, 1).write_to(&path).unwrap();
        let second = batch(5, 2);
        second.write_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 5);
        let read_back: Vec<RequestLine> = contents
            .lines()
            .map(|line| line.parse().unwrap())
            .collect();
        assert_eq!(read_back, second.lines());
    }

    #[test]
    fn unwritable_path_surfaces_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("requests.txt");

        let result = batch(5, 1).write_to(&path);
        assert!(matches!(result, Err(WorkloadError::Io(_))));
    }
}
