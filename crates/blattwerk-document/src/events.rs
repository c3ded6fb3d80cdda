// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion events — the structured reporting contract between the pipeline
// and whatever presents progress (console, JSON lines, a UI).

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use blattwerk_core::{ColorMode, JobId, PixelSize};
use serde::{Deserialize, Serialize};

use crate::image::NormalizedImage;

/// Per-image outcome of a successful normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageReport {
    /// 1-based position in the job.
    pub index: usize,
    pub total: usize,
    pub source: String,
    pub original_size: PixelSize,
    pub size: PixelSize,
    pub mode_before: ColorMode,
    pub mode_after: ColorMode,
    /// Raw EXIF orientation value that was resolved.
    pub orientation: u16,
    /// Counter-clockwise rotation applied.
    pub rotation_degrees: u16,
}

impl ImageReport {
    pub fn new(index: usize, total: usize, image: &NormalizedImage) -> Self {
        Self {
            index,
            total,
            source: image.origin().to_owned(),
            original_size: image.original_size(),
            size: image.size(),
            mode_before: image.original_mode(),
            mode_after: image.mode(),
            orientation: image.orientation().value(),
            rotation_degrees: image.rotation().degrees(),
        }
    }
}

/// Everything the pipeline reports while running a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ConversionEvent {
    JobStarted {
        job_id: JobId,
        total: usize,
    },
    ImageNormalized(ImageReport),
    ImageFailed {
        index: usize,
        total: usize,
        source: String,
        reason: String,
    },
    JobCompleted {
        pages: usize,
        output_bytes: u64,
        destination: PathBuf,
    },
    JobFailed {
        reason: String,
        index: Option<usize>,
    },
}

/// Receives events from the pipeline. Events arrive in order, on the thread
/// running the job.
pub trait ConversionObserver: Send + Sync {
    fn on_event(&self, event: &ConversionEvent);
}

impl<F> ConversionObserver for F
where
    F: Fn(&ConversionEvent) + Send + Sync,
{
    fn on_event(&self, event: &ConversionEvent) {
        self(event)
    }
}

/// Discards every event. The default when no observer is configured.
pub struct NoopObserver;

impl ConversionObserver for NoopObserver {
    fn on_event(&self, _event: &ConversionEvent) {}
}

/// Keeps every event in memory, for tests and for callers that report after
/// the fact.
#[derive(Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<ConversionEvent>>,
}

impl CollectingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of the events received so far.
    pub fn events(&self) -> Vec<ConversionEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ConversionObserver for CollectingObserver {
    fn on_event(&self, event: &ConversionEvent) {
        match self.events.lock() {
            Ok(mut guard) => guard.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
