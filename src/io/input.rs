use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{DiarizationTurn, TranscriptionChunk};

/// Diarization output, either a bare list of turns or wrapped in `segments`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DiarizationFile {
    Turns(Vec<DiarizationTurn>),
    Wrapped { segments: Vec<DiarizationTurn> },
}

/// Recognizer output in the shapes the pipeline accepts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranscriptionFile {
    Chunks(Vec<TranscriptionChunk>),
    Segments {
        segments: Vec<TranscriptionChunk>,
        #[serde(default)]
        language: Option<String>,
    },
    Timestamped {
        chunks: Vec<TimestampedChunk>,
        #[serde(default)]
        language: Option<String>,
    },
    Text {
        text: String,
        #[serde(default)]
        language: Option<String>,
    },
}

/// Chunk carrying its bounds as a `[start, end]` pair
#[derive(Debug, Deserialize)]
struct TimestampedChunk {
    #[serde(default)]
    timestamp: Option<(Option<f64>, Option<f64>)>,
    text: String,
}

/// Parse a diarization JSON file
pub fn parse_diarization_file(path: &Path) -> Result<Vec<DiarizationTurn>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_diarization_json(&content)
}

/// Parse diarization JSON into turns
pub fn parse_diarization_json(json: &str) -> Result<Vec<DiarizationTurn>> {
    let file: DiarizationFile =
        serde_json::from_str(json).context("Failed to parse diarization JSON")?;
    Ok(match file {
        DiarizationFile::Turns(turns) => turns,
        DiarizationFile::Wrapped { segments } => segments,
    })
}

/// Parse a transcription JSON file
pub fn parse_transcription_file(path: &Path) -> Result<Vec<TranscriptionChunk>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_transcription_json(&content)
}

/// Parse transcription JSON into chunks; a file-level language fills in chunks without one
pub fn parse_transcription_json(json: &str) -> Result<Vec<TranscriptionChunk>> {
    let file: TranscriptionFile =
        serde_json::from_str(json).context("Failed to parse transcription JSON")?;

    let (mut chunks, language) = match file {
        TranscriptionFile::Chunks(chunks) => (chunks, None),
        TranscriptionFile::Segments { segments, language } => (segments, language),
        TranscriptionFile::Timestamped { chunks, language } => {
            let chunks = chunks
                .into_iter()
                .map(|chunk| {
                    let (start, end) = chunk.timestamp.unwrap_or((None, None));
                    TranscriptionChunk::new(start, end, chunk.text)
                })
                .collect();
            (chunks, language)
        }
        TranscriptionFile::Text { text, language } => {
            (vec![TranscriptionChunk::new(None, None, text)], language)
        }
    };

    for chunk in &mut chunks {
        chunk.text = chunk.text.trim().to_string();
        if chunk.language.is_none() {
            chunk.language = language.clone();
        }
    }

    Ok(chunks)
}
