// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Blattwerk image-to-PDF binder.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BlattwerkError, Result};

/// Unique identifier for a conversion job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One input image: where it lives and how large it claims to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceImage {
    origin: PathBuf,
    byte_size: u64,
}

impl SourceImage {
    /// Describe a source with a caller-declared byte size.
    pub fn new(origin: impl Into<PathBuf>, byte_size: u64) -> Self {
        Self {
            origin: origin.into(),
            byte_size,
        }
    }

    /// Describe a source, taking the byte size from file metadata.
    pub fn from_path(origin: impl Into<PathBuf>) -> Result<Self> {
        let origin = origin.into();
        let byte_size = std::fs::metadata(&origin)?.len();
        Ok(Self { origin, byte_size })
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }

    /// Short identifier used in events and logs (the file name).
    pub fn display_name(&self) -> String {
        self.origin
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.origin.display().to_string())
    }
}

/// An ordered, non-empty list of sources bound for one output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionJob {
    pub id: JobId,
    sources: Vec<SourceImage>,
    destination: PathBuf,
}

impl ConversionJob {
    /// Build a job. Fails with [`BlattwerkError::EmptyJob`] when `sources` is
    /// empty.
    pub fn new(sources: Vec<SourceImage>, destination: impl Into<PathBuf>) -> Result<Self> {
        if sources.is_empty() {
            return Err(BlattwerkError::EmptyJob);
        }
        Ok(Self {
            id: JobId::new(),
            sources,
            destination: destination.into(),
        })
    }

    pub fn sources(&self) -> &[SourceImage] {
        &self.sources
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Always false for a constructed job; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Colour representation of a decoded raster, named the way image tools
/// usually print it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    L8,
    La8,
    Rgb8,
    Rgba8,
    L16,
    La16,
    Rgb16,
    Rgba16,
    Rgb32F,
    Rgba32F,
    Other,
}

impl ColorMode {
    /// The only mode pages are written in.
    pub const OUTPUT: ColorMode = ColorMode::Rgb8;

    /// Short label for reporting ("L", "RGB", "RGBA;16", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Self::L8 => "L",
            Self::La8 => "LA",
            Self::Rgb8 => "RGB",
            Self::Rgba8 => "RGBA",
            Self::L16 => "L;16",
            Self::La16 => "LA;16",
            Self::Rgb16 => "RGB;16",
            Self::Rgba16 => "RGBA;16",
            Self::Rgb32F => "RGB;32F",
            Self::Rgba32F => "RGBA;32F",
            Self::Other => "other",
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(
            self,
            Self::La8 | Self::Rgba8 | Self::La16 | Self::Rgba16 | Self::Rgba32F
        )
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pixel dimensions of a raster or a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The same size with width and height exchanged.
    pub fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

impl std::fmt::Display for PixelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The finished PDF, as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub path: PathBuf,
    /// Pixel size of each page, in job order.
    pub pages: Vec<PixelSize>,
    /// Size of the written file in bytes.
    pub byte_size: u64,
}

impl OutputDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Lifecycle of one conversion job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    Pending,
    /// Normalizing the image at this 1-based position.
    Normalizing(usize),
    Assembling,
    Done,
    Failed {
        reason: String,
        index: Option<usize>,
    },
}

/// Cooperative cancellation flag, checked between images.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_job_is_rejected() {
        let err = ConversionJob::new(Vec::new(), "out.pdf").unwrap_err();
        assert!(matches!(err, BlattwerkError::EmptyJob));
    }

    #[test]
    fn job_keeps_source_order() {
        let sources = vec![
            SourceImage::new("c.jpg", 3),
            SourceImage::new("a.jpg", 1),
            SourceImage::new("b.jpg", 2),
        ];
        let job = ConversionJob::new(sources, "out.pdf").unwrap();
        let names: Vec<String> = job.sources().iter().map(|s| s.display_name()).collect();
        assert_eq!(names, ["c.jpg", "a.jpg", "b.jpg"]);
        assert_eq!(job.len(), 3);
    }

    #[test]
    fn source_from_path_reads_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, [0u8; 42]).unwrap();
        let source = SourceImage::from_path(&path).unwrap();
        assert_eq!(source.byte_size(), 42);
        assert_eq!(source.display_name(), "photo.jpg");
    }

    #[test]
    fn source_from_missing_path_is_io_error() {
        let err = SourceImage::from_path("/definitely/not/here.jpg").unwrap_err();
        assert!(matches!(err, BlattwerkError::Io(_)));
    }

    #[test]
    fn pixel_size_swaps() {
        assert_eq!(PixelSize::new(3024, 4032).swapped(), PixelSize::new(4032, 3024));
    }

    #[test]
    fn cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn color_mode_labels() {
        assert_eq!(ColorMode::L8.to_string(), "L");
        assert_eq!(ColorMode::OUTPUT.to_string(), "RGB");
        assert!(ColorMode::Rgba8.has_alpha());
        assert!(!ColorMode::Rgb16.has_alpha());
    }
}
