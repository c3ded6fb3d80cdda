// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — EXIF orientation resolution and per-image normalization.

pub mod normalizer;
pub mod orientation;

pub use normalizer::{ImageNormalizer, NormalizedImage};
pub use orientation::{OrientationTag, Rotation, read_orientation, resolve_tag};
