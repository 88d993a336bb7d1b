pub mod config;
pub mod error;
pub mod io;
pub mod keywords;
pub mod models;
pub mod pipeline;
pub mod stages;
pub mod stats;
pub mod tagging;
pub mod text;

pub use config::{Language, PipelineConfig};
pub use error::{ConfigError, FusionError, IntervalSource};
pub use io::{parse_diarization_file, parse_transcription_file, OutputFormat};
pub use keywords::{KeywordRanker, Tokenizer};
pub use models::{DiarizationTurn, Report, Segment, TimeInterval, TranscriptionChunk, UNKNOWN_SPEAKER};
pub use pipeline::{Pipeline, RunInfo};
pub use stages::{analyze, execute_stage1, execute_stage3, fuse, Stage3Config};
pub use text::{NormalizerConfig, TextNormalizer};
