//! Parallel conversion of independent files.

use std::path::PathBuf;

use rayon::prelude::*;

use crate::error::Result;

use super::{default_output_path, ConvertOptions, ConvertResult, ConverterRegistry};

/// One file to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    /// Input document
    pub input: PathBuf,
    /// Output PDF
    pub output: PathBuf,
}

impl BatchJob {
    /// Create a job with an explicit output path.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Create a job writing next to the input, with a `.pdf` extension.
    pub fn beside(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output = default_output_path(&input);
        Self { input, output }
    }

    /// Create a job writing into `dir`, keeping the input's file stem.
    pub fn into_dir(input: impl Into<PathBuf>, dir: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let name = default_output_path(&input)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("output.pdf"));
        Self {
            output: dir.into().join(name),
            input,
        }
    }
}

/// Result of one job in a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// The job that ran
    pub job: BatchJob,
    /// Its result
    pub result: Result<ConvertResult>,
}

impl BatchOutcome {
    /// Check if the job succeeded.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Convert every job in parallel.
///
/// Each job reads its own document and writes its own file; a failure in
/// one job does not affect the others. Outcomes are returned in job order.
pub fn convert_batch(
    registry: &ConverterRegistry,
    jobs: Vec<BatchJob>,
    options: &ConvertOptions,
) -> Vec<BatchOutcome> {
    let outcomes: Vec<BatchOutcome> = jobs
        .into_par_iter()
        .map(|job| {
            let result = registry.convert(&job.input, &job.output, options);
            BatchOutcome { job, result }
        })
        .collect();

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    log::info!(
        "Batch finished: {} converted, {} failed",
        outcomes.len() - failed,
        failed
    );

    outcomes
}
