use tracing::{debug, info};

use crate::error::{FusionError, IntervalSource};
use crate::models::{DiarizationTurn, Segment, TimeInterval, TranscriptionChunk, UNKNOWN_SPEAKER};

/// Result of Stage 0 fusion
#[derive(Debug)]
pub struct FusionResult {
    /// One segment per input chunk, in input order
    pub segments: Vec<Segment>,
    /// Segments with no overlapping turn
    pub unknown_speaker_count: usize,
    /// Segments whose chunk was missing a bound
    pub unknown_bounds_count: usize,
}

/// Execute Stage 0: align transcription chunks with diarization turns.
///
/// Every chunk with known bounds gets the speaker of the turn it overlaps most; on a tie
/// the turn that starts first wins. Chunks with no overlapping turn, or with a missing
/// bound, get [`UNKNOWN_SPEAKER`]. Each chunk is decided on its own.
pub fn fuse(
    turns: &[DiarizationTurn],
    chunks: &[TranscriptionChunk],
) -> Result<FusionResult, FusionError> {
    validate(turns.iter().map(DiarizationTurn::interval), IntervalSource::DiarizationTurn)?;
    validate(chunks.iter().map(TranscriptionChunk::interval), IntervalSource::TranscriptionChunk)?;

    // Stable sort keeps input order among turns that start together
    let mut by_start: Vec<&DiarizationTurn> = turns.iter().collect();
    by_start.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut unknown_speaker_count = 0;
    let mut unknown_bounds_count = 0;

    let segments: Vec<Segment> = chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            let interval = chunk.interval();
            if !interval.is_known() {
                unknown_bounds_count += 1;
            }

            let speaker = match best_turn(&interval, &by_start) {
                Some(turn) => turn.speaker_id.as_str(),
                None => {
                    debug!("Chunk {} has no overlapping turn", index);
                    unknown_speaker_count += 1;
                    UNKNOWN_SPEAKER
                }
            };

            Segment::new(index, interval, speaker, chunk.text.trim())
        })
        .collect();

    info!(
        "Stage 0: fused {} chunks with {} turns ({} unknown speaker, {} unknown bounds)",
        chunks.len(),
        turns.len(),
        unknown_speaker_count,
        unknown_bounds_count
    );

    Ok(FusionResult {
        segments,
        unknown_speaker_count,
        unknown_bounds_count,
    })
}

/// Turn with maximal positive overlap; `turns` must be sorted by start
fn best_turn<'a>(interval: &TimeInterval, turns: &[&'a DiarizationTurn]) -> Option<&'a DiarizationTurn> {
    let (_, chunk_end) = interval.bounds()?;
    let mut best: Option<(f64, &DiarizationTurn)> = None;

    for &turn in turns {
        if turn.start >= chunk_end {
            break;
        }
        let overlap = interval.overlap_with(turn.start, turn.end);
        // Strictly greater: an equal overlap never displaces an earlier-starting turn
        if overlap > 0.0 && best.is_none_or(|(best_overlap, _)| overlap > best_overlap) {
            best = Some((overlap, turn));
        }
    }

    best.map(|(_, turn)| turn)
}

fn validate(
    intervals: impl Iterator<Item = TimeInterval>,
    source_kind: IntervalSource,
) -> Result<(), FusionError> {
    for (index, interval) in intervals.enumerate() {
        if interval.validate().is_err() {
            return Err(FusionError::InvalidInterval {
                source_kind,
                index,
                start: interval.start.unwrap_or(f64::NAN),
                end: interval.end.unwrap_or(f64::NAN),
            });
        }
    }
    Ok(())
}
