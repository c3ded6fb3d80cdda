// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// EXIF orientation — resolve tag 0x0112 from a JPEG's metadata and map it to
// the lossless rotation that makes the picture upright.

use std::io::Cursor;

use exif::{Exif, In, Reader, Tag};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw value of the EXIF `Orientation` field.
///
/// Any `u16` is representable; values outside 1..=8 are carried through so
/// they can be reported, and are treated like 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrientationTag(u16);

impl OrientationTag {
    /// "Top-left": stored pixels are already upright.
    pub const IDENTITY: OrientationTag = OrientationTag(1);

    pub fn new(value: u16) -> Self {
        Self(value)
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// Mirrored orientations (2, 4, 5, 7). These are valid EXIF values but
    /// are not corrected.
    pub fn is_mirrored(self) -> bool {
        matches!(self.0, 2 | 4 | 5 | 7)
    }

    /// Corrective rotation for this tag.
    pub fn rotation(self) -> Rotation {
        match self.0 {
            1 => Rotation::None,
            3 => Rotation::Ccw180,
            6 => Rotation::Ccw270,
            8 => Rotation::Ccw90,
            _ => Rotation::None,
        }
    }
}

impl Default for OrientationTag {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A lossless quarter-turn rotation, measured counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    None,
    Ccw90,
    Ccw180,
    Ccw270,
}

impl Rotation {
    /// Counter-clockwise angle in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            Self::None => 0,
            Self::Ccw90 => 90,
            Self::Ccw180 => 180,
            Self::Ccw270 => 270,
        }
    }

    /// Rotate `image`. The `image` crate's quarter turns are clockwise, so
    /// 90° counter-clockwise is its `rotate270`.
    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        match self {
            Self::None => image,
            Self::Ccw90 => image.rotate270(),
            Self::Ccw180 => image.rotate180(),
            Self::Ccw270 => image.rotate90(),
        }
    }
}

/// Resolve the orientation tag from parsed EXIF metadata.
///
/// Total: missing metadata, a missing field, or a value that does not fit a
/// SHORT all resolve to [`OrientationTag::IDENTITY`].
pub fn resolve_tag(metadata: Option<&Exif>) -> OrientationTag {
    let Some(exif) = metadata else {
        return OrientationTag::IDENTITY;
    };

    let value = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0));

    match value.map(u16::try_from) {
        Some(Ok(raw)) => OrientationTag(raw),
        Some(Err(_)) | None => OrientationTag::IDENTITY,
    }
}

/// Parse EXIF from the raw container bytes (JPEG, TIFF, ...) and resolve the
/// orientation tag. Unparsable metadata is not an error.
pub fn read_orientation(bytes: &[u8]) -> OrientationTag {
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => resolve_tag(Some(&exif)),
        Err(err) => {
            debug!(%err, "no usable EXIF metadata, assuming upright");
            resolve_tag(None)
        }
    }
}
