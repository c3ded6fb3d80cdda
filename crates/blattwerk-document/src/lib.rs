// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// blattwerk-document — Image normalization and PDF assembly for Blattwerk.
//
// Resolves each JPEG's EXIF orientation, rotates it upright, coerces it to
// RGB, and binds the results into one multi-page PDF in input order.

pub mod convert;
pub mod events;
pub mod image;
pub mod pdf;

#[cfg(test)]
mod test_support;

// Re-export the primary structs so callers can use `blattwerk_document::PageAssembler` etc.
pub use crate::convert::ConversionPipeline;
pub use crate::events::{
    CollectingObserver, ConversionEvent, ConversionObserver, ImageReport, NoopObserver,
};
pub use crate::image::{ImageNormalizer, NormalizedImage, OrientationTag, Rotation};
pub use crate::pdf::reader::{PageBox, PageImage, PdfReader};
pub use crate::pdf::writer::PageAssembler;
