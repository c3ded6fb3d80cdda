// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Blattwerk.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Blattwerk operations.
#[derive(Debug, Error)]
pub enum BlattwerkError {
    // -- Job errors --
    #[error("image{} '{origin}' could not be read: {reason}", position(.index))]
    UnreadableImage {
        /// 1-based position in the job, filled in by the pipeline.
        index: Option<usize>,
        origin: String,
        reason: String,
    },

    #[error("no images were given to convert")]
    EmptyJob,

    #[error("could not write '{}': {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("conversion cancelled before image #{next_index}")]
    Cancelled { next_index: usize },

    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    // -- Output verification --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("output verification failed: expected {expected} pages, found {actual}")]
    VerificationFailed { expected: usize, actual: usize },

    #[error("output verification failed: page {page} embeds {actual}, expected {expected}")]
    PageImageMismatch {
        page: usize,
        expected: String,
        actual: String,
    },

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BlattwerkError {
    /// 1-based index of the source that caused the failure, if any.
    pub fn failing_index(&self) -> Option<usize> {
        match self {
            Self::UnreadableImage { index, .. } => *index,
            Self::Cancelled { next_index } => Some(*next_index),
            _ => None,
        }
    }

    /// Attach the job position to an `UnreadableImage` error. Other variants
    /// are returned unchanged.
    pub fn at_index(self, position: usize) -> Self {
        match self {
            Self::UnreadableImage { origin, reason, .. } => Self::UnreadableImage {
                index: Some(position),
                origin,
                reason,
            },
            other => other,
        }
    }
}

fn position(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" #{i}"),
        None => String::new(),
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BlattwerkError>;
