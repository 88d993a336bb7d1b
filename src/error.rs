use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which collaborator produced an offending interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalSource {
    DiarizationTurn,
    TranscriptionChunk,
}

impl fmt::Display for IntervalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalSource::DiarizationTurn => write!(f, "diarization turn"),
            IntervalSource::TranscriptionChunk => write!(f, "transcription chunk"),
        }
    }
}

/// Errors surfaced by the fusion engine.
///
/// Degraded inputs (unknown speaker, unknown bounds, empty corpus) are not errors and
/// never show up here.
#[derive(Debug, Error)]
pub enum FusionError {
    /// Upstream data corruption; aborts the run
    #[error("invalid interval in {source_kind} #{index}: start={start}, end={end}")]
    InvalidInterval {
        source_kind: IntervalSource,
        index: usize,
        start: f64,
        end: f64,
    },

    /// Emission target could not be created or written; nothing was left behind
    #[error("unwritable destination {path:?}: {source}")]
    UnwritableDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FusionError {
    pub fn unwritable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FusionError::UnwritableDestination {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by bad input data rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(self, FusionError::InvalidInterval { .. })
    }
}

/// Errors from the explicit setup step that builds the pipeline's immutable resources
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unsupported language preset: {0}")]
    UnsupportedLanguage(String),

    #[error("invalid keyword n-gram size {0} (expected 1 or 2)")]
    InvalidNgram(usize),

    #[error("mask character {0:?} would be rewritten by text cleanup")]
    InvalidMaskChar(char),

    #[error("failed to compile text pattern: {0}")]
    Pattern(#[from] regex::Error),
}
