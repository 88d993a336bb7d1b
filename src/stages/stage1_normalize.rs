use std::sync::Arc;

use tracing::info;

use crate::models::Segment;
use crate::text::TextNormalizer;

/// Result of Stage 1 normalization
#[derive(Debug)]
pub struct NormalizationResult {
    /// Segments in their original order, text rewritten
    pub segments: Vec<Segment>,
    /// Segments whose text differs from the original
    pub segments_changed: usize,
}

/// Normalize every segment in place on the current thread
pub fn normalize_segments(normalizer: &TextNormalizer, segments: &mut [Segment]) {
    for segment in segments.iter_mut() {
        normalizer.normalize_segment(segment);
    }
}

/// Execute Stage 1: normalize segment text on up to `workers` blocking tasks.
///
/// The list is split into contiguous batches and the batches are awaited in order, so
/// the returned segments are in the same order as the input no matter which worker
/// finishes first.
pub async fn execute_stage1(
    normalizer: Arc<TextNormalizer>,
    segments: Vec<Segment>,
    workers: usize,
) -> NormalizationResult {
    let workers = workers.max(1);
    let total = segments.len();

    let segments = if workers == 1 || total < 2 {
        let mut segments = segments;
        normalize_segments(&normalizer, &mut segments);
        segments
    } else {
        let batch_size = total.div_ceil(workers);
        let mut handles = Vec::with_capacity(workers);
        let mut remaining = segments.into_iter().peekable();

        while remaining.peek().is_some() {
            let mut batch: Vec<Segment> = remaining.by_ref().take(batch_size).collect();
            let normalizer = Arc::clone(&normalizer);
            handles.push(tokio::task::spawn_blocking(move || {
                normalize_segments(&normalizer, &mut batch);
                batch
            }));
        }

        let mut normalized = Vec::with_capacity(total);
        for handle in handles {
            match handle.await {
                Ok(batch) => normalized.extend(batch),
                // Blocking tasks cannot be aborted once running, so this is a worker panic
                Err(err) => std::panic::resume_unwind(err.into_panic()),
            }
        }
        normalized
    };

    let segments_changed = segments
        .iter()
        .filter(|s| s.text != s.original_text)
        .count();

    info!(
        "Stage 1: normalized {} segments ({} changed)",
        segments.len(),
        segments_changed
    );

    NormalizationResult {
        segments,
        segments_changed,
    }
}
