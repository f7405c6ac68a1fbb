//! Summary of a directory walk.
//!
//! Each input file either produced an output or was skipped with a reason;
//! a skipped file never leaves a partial output behind.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Outcome of converting every matching file under a root directory.
#[derive(Clone, Debug, Default, Serialize)]
pub struct WalkReport {
    /// Target format name (`geojson` or `rbox`).
    pub target: String,
    /// Output files written, in processing order.
    pub converted: Vec<PathBuf>,
    /// Inputs that failed, in processing order.
    pub skipped: Vec<SkippedFile>,
}

/// An input file that could not be converted.
#[derive(Clone, Debug, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

impl WalkReport {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn record_converted(&mut self, output: PathBuf) {
        self.converted.push(output);
    }

    pub fn record_skipped(&mut self, path: PathBuf, reason: impl Into<String>) {
        self.skipped.push(SkippedFile {
            path,
            reason: reason.into(),
        });
    }

    pub fn converted_count(&self) -> usize {
        self.converted.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Total number of inputs seen.
    pub fn input_count(&self) -> usize {
        self.converted_count() + self.skipped_count()
    }
}

impl fmt::Display for WalkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Converted {} of {} file(s) to {}",
            self.converted_count(),
            self.input_count(),
            self.target
        )?;

        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Skipped ({}):", self.skipped_count())?;
            for skipped in &self.skipped {
                writeln!(f, "  - {}: {}", skipped.path.display(), skipped.reason)?;
            }
        }

        Ok(())
    }
}
