use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::FusionError;
use crate::io::{
    commit_all, stage, write_plain, write_structured, write_tabular, write_transcript,
    OutputFormat,
};
use crate::models::Report;

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct Stage3Config {
    /// Formats to emit, in order
    pub formats: Vec<OutputFormat>,
    /// Line width for the transcript format
    pub wrap_width: usize,
}

impl Default for Stage3Config {
    fn default() -> Self {
        Self {
            formats: vec![
                OutputFormat::Structured,
                OutputFormat::Tabular,
                OutputFormat::Transcript,
            ],
            wrap_width: 80,
        }
    }
}

/// An artifact written by Stage 3
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub format: OutputFormat,
    pub path: PathBuf,
}

/// Result of Stage 3 rendering
#[derive(Debug)]
pub struct Stage3Result {
    pub artifacts: Vec<Artifact>,
}

impl Stage3Result {
    pub fn path_for(&self, format: OutputFormat) -> Option<&Path> {
        self.artifacts
            .iter()
            .find(|a| a.format == format)
            .map(|a| a.path.as_path())
    }
}

/// Destination of one format for a run
pub fn artifact_path(output_dir: &Path, file_stem: &str, format: OutputFormat) -> PathBuf {
    output_dir.join(format!("{}_{}", file_stem, format.file_suffix()))
}

/// Execute Stage 3: emit the report in every requested format.
///
/// All artifacts are fully written to temporary files before any is moved into place.
/// On failure no artifact of this run is left in `output_dir`, and the report is
/// untouched so the caller can retry with another destination.
pub fn execute_stage3(
    report: &Report,
    output_dir: &Path,
    file_stem: &str,
    config: &Stage3Config,
) -> Result<Stage3Result, FusionError> {
    let mut formats: Vec<OutputFormat> = Vec::with_capacity(config.formats.len());
    for format in &config.formats {
        if !formats.contains(format) {
            formats.push(*format);
        }
    }

    let mut staged = Vec::with_capacity(formats.len());
    for &format in &formats {
        let path = artifact_path(output_dir, file_stem, format);
        info!("Writing {:?} output to {:?}", format, path);
        let artifact = match format {
            OutputFormat::Structured => stage(&path, |w| write_structured(report, w))?,
            OutputFormat::Tabular => stage(&path, |w| write_tabular(&report.segments, w))?,
            OutputFormat::Transcript => {
                stage(&path, |w| write_transcript(&report.segments, w, config.wrap_width))?
            }
            OutputFormat::Plain => stage(&path, |w| write_plain(&report.segments, w))?,
        };
        staged.push(artifact);
    }

    let paths = commit_all(staged)?;
    let artifacts = formats
        .into_iter()
        .zip(paths)
        .map(|(format, path)| Artifact { format, path })
        .collect();

    Ok(Stage3Result { artifacts })
}
