use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::error::{ConfigError, FusionError};
use crate::keywords::KeywordRanker;
use crate::models::{DiarizationTurn, Report, ReportMetadata, TranscriptionChunk};
use crate::stages::{analyze, execute_stage1, execute_stage3, fuse, Stage3Config, Stage3Result};
use crate::tagging::MentionTagger;
use crate::text::TextNormalizer;

/// Identity of one run, supplied to the pipeline so output stays reproducible
#[derive(Debug, Clone, PartialEq)]
pub struct RunInfo {
    pub recording_id: String,
    pub run_id: String,
    pub started_at: DateTime<Utc>,
}

impl RunInfo {
    /// Fresh run with a random id and the current time
    pub fn new(recording_id: impl Into<String>) -> Self {
        Self {
            recording_id: recording_id.into(),
            run_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
        }
    }

    /// `<recording_id>_<YYYYMMDD_HHMMSS>`, with path-unsafe characters replaced
    pub fn file_stem(&self) -> String {
        let id: String = self
            .recording_id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let id = if id.is_empty() { "recording".to_string() } else { id };
        format!("{}_{}", id, self.started_at.format("%Y%m%d_%H%M%S"))
    }
}

/// The fusion and enrichment pipeline.
///
/// Construction is the only setup step; afterwards the pipeline is immutable and can
/// process any number of recordings.
#[derive(Debug)]
pub struct Pipeline {
    language: String,
    normalizer: Arc<TextNormalizer>,
    ranker: KeywordRanker,
    tagger: MentionTagger,
    render: Stage3Config,
    workers: usize,
}

impl Pipeline {
    pub fn new(config: &PipelineConfig) -> Result<Self, ConfigError> {
        let language = config.language()?;
        let normalizer = TextNormalizer::new(&config.normalizer_config()?)?;

        Ok(Self {
            language: language.code().to_string(),
            normalizer: Arc::new(normalizer),
            ranker: config.keyword_ranker()?,
            tagger: config.mention_tagger(),
            render: config.render_config(),
            workers: config.workers(),
        })
    }

    /// Fuse, normalize and analyze one recording into a report
    pub async fn run(
        &self,
        turns: &[DiarizationTurn],
        chunks: &[TranscriptionChunk],
        run: &RunInfo,
    ) -> Result<Report, FusionError> {
        info!(
            "Processing recording {} (run {}): {} turns, {} chunks",
            run.recording_id,
            run.run_id,
            turns.len(),
            chunks.len()
        );

        info!("Stage 0: Fusing intervals...");
        let fusion = fuse(turns, chunks)?;

        info!("Stage 1: Normalizing text...");
        let normalized =
            execute_stage1(Arc::clone(&self.normalizer), fusion.segments, self.workers).await;

        info!("Stage 2: Analyzing...");
        let analysis = analyze(&normalized.segments, &self.ranker, &self.tagger);

        Ok(Report {
            metadata: ReportMetadata {
                recording_id: run.recording_id.clone(),
                run_id: run.run_id.clone(),
                generated_at: run.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                language: self.language.clone(),
                source_turns: turns.len(),
                source_chunks: chunks.len(),
                keyword_method: analysis.keyword_method,
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            statistics: analysis.summary,
            speaker_statistics: analysis.speaker_statistics,
            keywords: analysis.keywords,
            mentions: analysis.mentions,
            segments: normalized.segments,
        })
    }

    /// Write the report in every configured format
    pub fn emit(
        &self,
        report: &Report,
        output_dir: &Path,
        run: &RunInfo,
    ) -> Result<Stage3Result, FusionError> {
        info!("Stage 3: Rendering output...");
        execute_stage3(report, output_dir, &run.file_stem(), &self.render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::OutputFormat;
    use crate::models::{KeywordMethod, UNKNOWN_SPEAKER};
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn run_info() -> RunInfo {
        RunInfo {
            recording_id: "call/42".to_string(),
            run_id: "00000000-0000-4000-8000-000000000000".to_string(),
            started_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap(),
        }
    }

    fn inputs() -> (Vec<DiarizationTurn>, Vec<TranscriptionChunk>) {
        (
            vec![
                DiarizationTurn::new(0.0, 5.0, "A"),
                DiarizationTurn::new(5.0, 10.0, "B"),
            ],
            vec![
                TranscriptionChunk::timed(0.0, 4.0, "hello there"),
                TranscriptionChunk::timed(6.0, 9.0, "check the engine"),
            ],
        )
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(run_info().file_stem(), "call_42_20240301_123005");
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = PipelineConfig {
            language: "fr".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            Pipeline::new(&config),
            Err(ConfigError::UnsupportedLanguage(_))
        ));
    }

    #[tokio::test]
    async fn test_run_end_to_end() {
        let pipeline = Pipeline::new(&PipelineConfig::default()).unwrap();
        let (turns, chunks) = inputs();

        let report = pipeline.run(&turns, &chunks, &run_info()).await.unwrap();

        let speakers: Vec<&str> = report.segments.iter().map(|s| s.speaker_id.as_str()).collect();
        assert_eq!(speakers, vec!["A", "B"]);
        // Largest known segment end, not the end of the last diarization turn
        assert_eq!(report.statistics.total_duration, 9.0);
        assert_eq!(report.speaker_statistics[0].total_talk_time, 4.0);
        assert_eq!(report.speaker_statistics[1].total_talk_time, 3.0);
        assert_eq!(report.metadata.keyword_method, KeywordMethod::Tfidf);
        assert_eq!(report.metadata.generated_at, "2024-03-01T12:30:05Z");
    }

    #[tokio::test]
    async fn test_run_with_unknown_speaker_and_bounds() {
        let pipeline = Pipeline::new(&PipelineConfig::default()).unwrap();
        let turns = vec![DiarizationTurn::new(0.0, 2.0, "A")];
        let chunks = vec![
            TranscriptionChunk::timed(5.0, 6.0, "later"),
            TranscriptionChunk::new(None, Some(1.0), "um"),
        ];

        let report = pipeline.run(&turns, &chunks, &run_info()).await.unwrap();

        assert!(report.segments.iter().all(|s| s.speaker_id == UNKNOWN_SPEAKER));
        assert_eq!(report.statistics.unknown_bounds_segments, 1);
        assert_eq!(report.statistics.total_duration, 6.0);
        assert_eq!(report.metadata.keyword_method, KeywordMethod::TermFrequency);
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_interval() {
        let pipeline = Pipeline::new(&PipelineConfig::default()).unwrap();
        let chunks = vec![TranscriptionChunk::timed(3.0, 1.0, "backwards")];

        let err = pipeline.run(&[], &chunks, &run_info()).await.unwrap_err();
        assert!(err.is_input_error());
    }

    #[tokio::test]
    async fn test_repeated_runs_emit_identical_artifacts() {
        let config = PipelineConfig {
            output_formats: vec![
                OutputFormat::Structured,
                OutputFormat::Tabular,
                OutputFormat::Transcript,
                OutputFormat::Plain,
            ],
            ..Default::default()
        };
        let pipeline = Pipeline::new(&config).unwrap();
        let (turns, chunks) = inputs();
        let run = run_info();

        let first_dir = TempDir::new().unwrap();
        let second_dir = TempDir::new().unwrap();
        let first = pipeline.run(&turns, &chunks, &run).await.unwrap();
        let second = pipeline.run(&turns, &chunks, &run).await.unwrap();
        let a = pipeline.emit(&first, first_dir.path(), &run).unwrap();
        let b = pipeline.emit(&second, second_dir.path(), &run).unwrap();

        assert_eq!(a.artifacts.len(), 4);
        for artifact in &a.artifacts {
            let other = b.path_for(artifact.format).unwrap();
            assert_eq!(
                std::fs::read(&artifact.path).unwrap(),
                std::fs::read(other).unwrap()
            );
        }
        assert!(a
            .path_for(OutputFormat::Tabular)
            .unwrap()
            .ends_with("call_42_20240301_123005_segments.csv"));
    }
}
