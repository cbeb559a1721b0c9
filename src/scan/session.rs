//! Scan session state: one meaningful extraction per picker session,
//! stale in-flight results discarded by generation.

use tokio::sync::mpsc;
use tokio::task;

use super::extract;
use super::SampledColor;
use crate::bitmap::Bitmap;

/// Completion message from a background extraction.
#[derive(Debug)]
pub struct ExtractionResult {
    pub generation: u64,
    pub palette: Vec<SampledColor>,
}

/// State container for one photo-picker session.
///
/// Extraction is CPU-bound and runs on the blocking pool; callers keep the
/// receiver returned by [`ScanSession::new`] and feed completions back
/// through [`ScanSession::apply`]. Submitting a new image bumps the
/// generation, so a result from an older submission can never overwrite
/// newer state. All mutation happens inside the session.
pub struct ScanSession {
    generation: u64,
    palette: Vec<SampledColor>,
    in_flight: bool,
    max_colors: usize,
    tx: mpsc::UnboundedSender<ExtractionResult>,
}

impl ScanSession {
    pub fn new(max_colors: usize) -> (Self, mpsc::UnboundedReceiver<ExtractionResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                generation: 0,
                palette: Vec::new(),
                in_flight: false,
                max_colors,
                tx,
            },
            rx,
        )
    }

    /// Kick off extraction of `bitmap` on the blocking pool, superseding
    /// any extraction still in flight.
    pub fn submit(&mut self, bitmap: Bitmap) {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = true;

        let generation = self.generation;
        let max_colors = self.max_colors;
        let tx = self.tx.clone();
        task::spawn_blocking(move || {
            let palette = extract::dominant_colors(&bitmap, max_colors);
            // Receiver may be gone if the session owner shut down mid-scan.
            let _ = tx.send(ExtractionResult {
                generation,
                palette,
            });
        });
    }

    /// Apply a completed extraction. Returns true when the session state
    /// changed; stale generations are ignored.
    pub fn apply(&mut self, result: ExtractionResult) -> bool {
        if result.generation != self.generation {
            return false;
        }
        self.palette = result.palette;
        self.in_flight = false;
        true
    }

    /// Clear the palette and invalidate any in-flight extraction.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.palette.clear();
        self.in_flight = false;
    }

    pub fn palette(&self) -> &[SampledColor] {
        &self.palette
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
