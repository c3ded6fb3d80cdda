// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page assembler — bind normalized images into one multi-page PDF using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::io::Write;
use std::path::Path;

use blattwerk_core::error::{BlattwerkError, Result};
use blattwerk_core::{AppConfig, OutputDocument, PixelSize};
use printpdf::{
    ImageCompression, ImageOptimizationOptions, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions,
    PdfWarnMsg, Pt, RawImage, RawImageData, RawImageFormat, XObjectTransform,
};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::image::NormalizedImage;

/// Resolution used when none is configured (pixels per inch).
pub const DEFAULT_DPI: f32 = 100.0;

const MM_PER_INCH: f32 = 25.4;

/// Serialises an ordered sequence of normalized images into one PDF, one
/// image per page, each page exactly the size of its image.
#[derive(Debug, Clone)]
pub struct PageAssembler {
    /// Pixels per inch used to map raster size to page size.
    dpi: f32,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: String,
}

impl Default for PageAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_DPI)
    }
}

impl PageAssembler {
    /// Create an assembler with the given resolution. Non-positive or
    /// non-finite values fall back to [`DEFAULT_DPI`].
    pub fn new(dpi: f32) -> Self {
        let dpi = if dpi.is_finite() && dpi > 0.0 {
            dpi
        } else {
            DEFAULT_DPI
        };
        Self {
            dpi,
            title: "Blattwerk Document".into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let mut assembler = Self::new(config.dpi);
        assembler.set_title(config.document_title.clone());
        assembler
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Page dimensions for a raster of `size` pixels.
    pub fn page_dimensions(&self, size: PixelSize) -> (Mm, Mm) {
        let to_mm = |px: u32| Mm(px as f32 / self.dpi * MM_PER_INCH);
        (to_mm(size.width), to_mm(size.height))
    }

    /// Build the PDF in memory. The first image is the first page; the rest
    /// follow in order.
    #[instrument(skip_all, fields(images = images.len()))]
    pub fn render(&self, images: Vec<NormalizedImage>) -> Result<Vec<u8>> {
        self.build(images).map(|(bytes, _)| bytes)
    }

    /// Build the PDF and write it to `destination` in a single atomic step.
    ///
    /// Bytes go to a temporary file next to the destination which is then
    /// renamed into place, so a failure never leaves a partial file behind.
    #[instrument(skip_all, fields(images = images.len(), destination = %destination.display()))]
    pub fn assemble(
        &self,
        images: Vec<NormalizedImage>,
        destination: &Path,
    ) -> Result<OutputDocument> {
        let (bytes, pages) = self.build(images)?;
        let byte_size = write_atomically(destination, &bytes)?;

        info!(
            pages = pages.len(),
            byte_size,
            "Wrote PDF to {}",
            destination.display()
        );

        Ok(OutputDocument {
            path: destination.to_path_buf(),
            pages,
            byte_size,
        })
    }

    fn build(&self, images: Vec<NormalizedImage>) -> Result<(Vec<u8>, Vec<PixelSize>)> {
        if images.is_empty() {
            return Err(BlattwerkError::EmptyJob);
        }

        info!(pages = images.len(), dpi = self.dpi, title = %self.title, "Creating image PDF");

        let mut doc = PdfDocument::new(&self.title);
        let mut pages: Vec<PdfPage> = Vec::with_capacity(images.len());
        let mut sizes: Vec<PixelSize> = Vec::with_capacity(images.len());

        // Each raster is moved into its XObject, so pixel buffers are released
        // page by page rather than held alongside the document.
        for image in images {
            let size = image.size();
            let raw = RawImage {
                pixels: RawImageData::U8(image.into_rgb().into_raw()),
                width: size.width as usize,
                height: size.height as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            // At the page's own DPI the image covers the page exactly.
            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(0.0)),
                    translate_y: Some(Pt(0.0)),
                    scale_x: None,
                    scale_y: None,
                    dpi: Some(self.dpi),
                    rotate: None,
                },
            }];

            let (page_w, page_h) = self.page_dimensions(size);
            pages.push(PdfPage::new(page_w, page_h, ops));
            sizes.push(size);
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&save_options(), &mut warnings);

        debug!(
            output_bytes = output.len(),
            warnings = warnings.len(),
            "PDF serialised"
        );

        Ok((output, sizes))
    }
}

/// Save options that embed each raster exactly as given.
///
/// printpdf's default image optimization caps rasters at 2 MB (downscaling
/// larger ones) and rewrites grey-looking RGB images as DeviceGray. Pixels
/// here must reach the page unchanged, so only lossless Flate is applied.
fn save_options() -> PdfSaveOptions {
    PdfSaveOptions {
        image_optimization: Some(ImageOptimizationOptions {
            quality: None,
            max_image_size: None,
            dither_greyscale: Some(false),
            convert_to_greyscale: Some(false),
            auto_optimize: Some(false),
            format: Some(ImageCompression::Flate),
        }),
        ..PdfSaveOptions::default()
    }
}

/// Write `bytes` to `destination` via a sibling temporary file and return the
/// final file size.
fn write_atomically(destination: &Path, bytes: &[u8]) -> Result<u64> {
    let fail = |source: std::io::Error| BlattwerkError::WriteFailure {
        path: destination.to_path_buf(),
        source,
    };

    let parent = match destination.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(fail)?;
    tmp.write_all(bytes).map_err(fail)?;
    tmp.as_file().sync_all().map_err(fail)?;
    // On failure the PersistError still owns the temp file and removes it on drop.
    tmp.persist(destination).map_err(|err| fail(err.error))?;

    let byte_size = std::fs::metadata(destination).map_err(fail)?.len();
    Ok(byte_size)
}
