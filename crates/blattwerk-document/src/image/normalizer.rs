// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image normalizer — decode one source, rotate it upright according to its
// EXIF orientation, and coerce it to 8-bit RGB so it can be placed on a PDF
// page as-is.

use blattwerk_core::error::{BlattwerkError, Result};
use blattwerk_core::{ColorMode, PixelSize, SourceImage};
use image::{ColorType, DynamicImage, RgbImage};
use tracing::{debug, info, instrument, warn};

use super::orientation::{OrientationTag, Rotation, read_orientation};

/// An upright, three-channel raster ready for page assembly.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    origin: String,
    pixels: RgbImage,
    orientation: OrientationTag,
    rotation: Rotation,
    original_mode: ColorMode,
    original_size: PixelSize,
}

impl NormalizedImage {
    /// Identifier of the source this image came from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Final pixel dimensions (after rotation).
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.pixels.width(), self.pixels.height())
    }

    /// Pixel dimensions as decoded, before rotation.
    pub fn original_size(&self) -> PixelSize {
        self.original_size
    }

    pub fn orientation(&self) -> OrientationTag {
        self.orientation
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Colour mode of the decoded source, before coercion.
    pub fn original_mode(&self) -> ColorMode {
        self.original_mode
    }

    /// Colour mode of the normalized raster. Always [`ColorMode::OUTPUT`].
    pub fn mode(&self) -> ColorMode {
        ColorMode::OUTPUT
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn into_rgb(self) -> RgbImage {
        self.pixels
    }
}

/// Turns sources into [`NormalizedImage`]s, one at a time.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageNormalizer;

impl ImageNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Read and normalize a source from the filesystem.
    #[instrument(skip_all, fields(source = %source.origin().display()))]
    pub fn normalize(&self, source: &SourceImage) -> Result<NormalizedImage> {
        let origin = source.display_name();
        let data = std::fs::read(source.origin())
            .map_err(|err| unreadable(&origin, format!("failed to read file: {err}")))?;

        if data.len() as u64 != source.byte_size() {
            debug!(
                declared = source.byte_size(),
                actual = data.len(),
                "source size changed since it was selected"
            );
        }

        self.normalize_bytes(origin, &data)
    }

    /// Normalize an encoded image already in memory.
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub fn normalize_bytes(
        &self,
        origin: impl Into<String> + std::fmt::Debug,
        data: &[u8],
    ) -> Result<NormalizedImage> {
        let origin = origin.into();
        if data.is_empty() {
            return Err(unreadable(&origin, "file is empty"));
        }

        let decoded = image::load_from_memory(data)
            .map_err(|err| unreadable(&origin, format!("failed to decode image: {err}")))?;

        let original_size = PixelSize::new(decoded.width(), decoded.height());
        let original_mode = color_mode_of(decoded.color());
        debug!(size = %original_size, mode = %original_mode, "Image decoded");

        let orientation = read_orientation(data);
        if orientation.is_mirrored() {
            warn!(
                tag = orientation.value(),
                "mirrored EXIF orientation is not supported, leaving image as stored"
            );
        }
        let rotation = orientation.rotation();
        if original_mode.has_alpha() {
            debug!(mode = %original_mode, "discarding alpha channel");
        }

        let pixels = coerce_to_rgb(rotation.apply(decoded));

        info!(
            tag = orientation.value(),
            rotation = rotation.degrees(),
            from_mode = %original_mode,
            width = pixels.width(),
            height = pixels.height(),
            "Image normalized"
        );

        Ok(NormalizedImage {
            origin,
            pixels,
            orientation,
            rotation,
            original_mode,
            original_size,
        })
    }
}

/// Drop alpha, expand gray, and narrow deep channels to 8-bit RGB. An image
/// that is already `Rgb8` is moved through without copying.
fn coerce_to_rgb(image: DynamicImage) -> RgbImage {
    match image {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    }
}

fn color_mode_of(color: ColorType) -> ColorMode {
    match color {
        ColorType::L8 => ColorMode::L8,
        ColorType::La8 => ColorMode::La8,
        ColorType::Rgb8 => ColorMode::Rgb8,
        ColorType::Rgba8 => ColorMode::Rgba8,
        ColorType::L16 => ColorMode::L16,
        ColorType::La16 => ColorMode::La16,
        ColorType::Rgb16 => ColorMode::Rgb16,
        ColorType::Rgba16 => ColorMode::Rgba16,
        ColorType::Rgb32F => ColorMode::Rgb32F,
        ColorType::Rgba32F => ColorMode::Rgba32F,
        _ => ColorMode::Other,
    }
}

fn unreadable(origin: &str, reason: impl Into<String>) -> BlattwerkError {
    BlattwerkError::UnreadableImage {
        index: None,
        origin: origin.to_owned(),
        reason: reason.into(),
    }
}
