use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::detection::domain::detector_config::{ConfigError, DetectorConfig};
use crate::pipeline::mark_faces_use_case::MarkFacesUseCase;
use crate::pipeline::pipeline_logger::PipelineLogger;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("failed to read batch manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid batch manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("job {index} ({input}): {source}")]
    InvalidJob {
        index: usize,
        input: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// One input/output pair with its own detector tuning.
///
/// Tuning fields sit next to the paths in the manifest and default
/// individually when omitted.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub config: DetectorConfig,
}

/// Parses a JSON array of jobs and validates every job's tuning.
pub fn parse_manifest(path: &Path, json: &str) -> Result<Vec<BatchJob>, BatchError> {
    let jobs: Vec<BatchJob> = serde_json::from_str(json).map_err(|source| BatchError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    for (index, job) in jobs.iter().enumerate() {
        job.config
            .validate()
            .map_err(|source| BatchError::InvalidJob {
                index,
                input: job.input.clone(),
                source,
            })?;
    }
    Ok(jobs)
}

pub fn load_manifest(path: &Path) -> Result<Vec<BatchJob>, BatchError> {
    let json = fs::read_to_string(path).map_err(|source| BatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(path, &json)
}

/// Builds the single-image pipeline for one job's tuning.
pub type UseCaseFactory =
    Box<dyn Fn(&DetectorConfig) -> Result<MarkFacesUseCase, Box<dyn std::error::Error>>>;

/// Outcome of a batch: faces per finished job and the error of each failed one.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub completed: Vec<(PathBuf, usize)>,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs jobs sequentially, in manifest order.
///
/// A failing job is logged and recorded; the remaining jobs still run.
pub struct BatchMarkFacesUseCase {
    factory: UseCaseFactory,
}

impl BatchMarkFacesUseCase {
    pub fn new(factory: UseCaseFactory) -> Self {
        Self { factory }
    }

    pub fn execute(&self, jobs: &[BatchJob], logger: &mut dyn PipelineLogger) -> BatchReport {
        let mut report = BatchReport::default();
        let total = jobs.len();

        for (i, job) in jobs.iter().enumerate() {
            let result = match (self.factory)(&job.config) {
                Ok(mut use_case) => use_case.execute(&job.input, &job.output, logger),
                Err(e) => Err(e),
            };
            match result {
                Ok(faces) => report.completed.push((job.input.clone(), faces.len())),
                Err(e) => {
                    log::warn!("Skipping {}: {e}", job.input.display());
                    report.failed.push((job.input.clone(), e.to_string()));
                }
            }
            logger.progress(i + 1, total);
        }

        report
    }
}
