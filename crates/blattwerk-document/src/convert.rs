// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion pipeline — run a whole job: normalize each source in order, then
// assemble the pages into one PDF.
//
// Job lifecycle: Pending → Normalizing(1..=N) → Assembling → Done, with
// Failed reachable from any Normalizing or Assembling state. The first failure
// ends the job; nothing is retried or skipped, and no output is written.

use std::sync::Arc;

use blattwerk_core::error::{BlattwerkError, Result};
use blattwerk_core::{AppConfig, CancelToken, ConversionJob, JobState, OutputDocument};
use tracing::{error, info, instrument, warn};

use crate::events::{ConversionEvent, ConversionObserver, ImageReport, NoopObserver};
use crate::image::ImageNormalizer;
use crate::pdf::writer::PageAssembler;

/// Sequential image-to-PDF conversion with event reporting.
pub struct ConversionPipeline {
    normalizer: ImageNormalizer,
    assembler: PageAssembler,
    observer: Arc<dyn ConversionObserver>,
    cancel: CancelToken,
    state: JobState,
}

impl Default for ConversionPipeline {
    fn default() -> Self {
        Self::new(PageAssembler::default())
    }
}

impl ConversionPipeline {
    pub fn new(assembler: PageAssembler) -> Self {
        Self {
            normalizer: ImageNormalizer::new(),
            assembler,
            observer: Arc::new(NoopObserver),
            cancel: CancelToken::new(),
            state: JobState::Pending,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(PageAssembler::from_config(config))
    }

    /// Deliver events to `observer` instead of discarding them.
    pub fn with_observer(mut self, observer: Arc<dyn ConversionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Check `token` before each image; once cancelled, the job stops before
    /// the next image is read.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// State reached by the most recent run.
    pub fn state(&self) -> &JobState {
        &self.state
    }

    /// Run `job` to completion or to its first failure.
    #[instrument(skip_all, fields(job = %job.id, images = job.len()))]
    pub fn run(&mut self, job: &ConversionJob) -> Result<OutputDocument> {
        self.state = JobState::Pending;

        match self.execute(job) {
            Ok(document) => Ok(document),
            Err(err) => {
                let index = err.failing_index();
                error!(error = %err, ?index, "Conversion failed");
                self.state = JobState::Failed {
                    reason: err.to_string(),
                    index,
                };
                self.emit(ConversionEvent::JobFailed {
                    reason: err.to_string(),
                    index,
                });
                Err(err)
            }
        }
    }

    fn execute(&mut self, job: &ConversionJob) -> Result<OutputDocument> {
        let total = job.len();
        if job.is_empty() {
            return Err(BlattwerkError::EmptyJob);
        }

        info!(total, destination = %job.destination().display(), "Processing images");
        self.emit(ConversionEvent::JobStarted {
            job_id: job.id,
            total,
        });

        let mut normalized = Vec::with_capacity(total);
        for (offset, source) in job.sources().iter().enumerate() {
            let index = offset + 1;
            if self.cancel.is_cancelled() {
                warn!(next_index = index, "Cancellation requested");
                return Err(BlattwerkError::Cancelled { next_index: index });
            }

            self.state = JobState::Normalizing(index);
            match self.normalizer.normalize(source) {
                Ok(image) => {
                    self.emit(ConversionEvent::ImageNormalized(ImageReport::new(
                        index, total, &image,
                    )));
                    normalized.push(image);
                }
                Err(err) => {
                    let err = err.at_index(index);
                    self.emit(ConversionEvent::ImageFailed {
                        index,
                        total,
                        source: source.display_name(),
                        reason: err.to_string(),
                    });
                    return Err(err);
                }
            }
        }

        self.state = JobState::Assembling;
        let document = self.assembler.assemble(normalized, job.destination())?;

        self.state = JobState::Done;
        self.emit(ConversionEvent::JobCompleted {
            pages: document.page_count(),
            output_bytes: document.byte_size,
            destination: document.path.clone(),
        });

        Ok(document)
    }

    fn emit(&self, event: ConversionEvent) {
        self.observer.on_event(&event);
    }
}
