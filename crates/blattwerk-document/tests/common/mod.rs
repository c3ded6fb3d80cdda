// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared fixtures for the integration tests: synthetic JPEG files on disk,
// optionally carrying an EXIF orientation tag.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;

use blattwerk_core::SourceImage;
use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};

/// A colour image whose top quarter is red and the rest blue, so rotations
/// are distinguishable.
pub fn marked_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |_, y| {
        if y < height / 4 {
            Rgb([230, 20, 20])
        } else {
            Rgb([20, 20, 230])
        }
    }))
}

pub fn gray_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([128])))
}

pub fn encode_jpeg(image: &DynamicImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .expect("JPEG encoding");
    buffer
}

/// Insert an APP1 segment carrying `payload` right after SOI.
pub fn splice_app1(jpeg: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Add a big-endian EXIF block whose IFD0 holds only `Orientation`.
pub fn with_orientation(jpeg: &[u8], tag: u16) -> Vec<u8> {
    let mut payload = b"Exif\0\0MM\x00\x2a".to_vec();
    payload.extend_from_slice(&8u32.to_be_bytes());
    payload.extend_from_slice(&1u16.to_be_bytes());
    payload.extend_from_slice(&0x0112u16.to_be_bytes());
    payload.extend_from_slice(&3u16.to_be_bytes());
    payload.extend_from_slice(&1u32.to_be_bytes());
    payload.extend_from_slice(&tag.to_be_bytes());
    payload.extend_from_slice(&[0, 0]);
    payload.extend_from_slice(&0u32.to_be_bytes());
    splice_app1(jpeg, &payload)
}

/// Write `bytes` to `dir/name` and describe it as a source.
pub fn source(dir: &Path, name: &str, bytes: &[u8]) -> SourceImage {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write fixture");
    SourceImage::from_path(path).expect("fixture metadata")
}

/// A JPEG source of `width` x `height` pixels, tagged when `tag` is given.
pub fn jpeg_source(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    tag: Option<u16>,
) -> SourceImage {
    let jpeg = encode_jpeg(&marked_image(width, height));
    let bytes = match tag {
        Some(tag) => with_orientation(&jpeg, tag),
        None => jpeg,
    };
    source(dir, name, &bytes)
}

/// Expected page size in points for `px` pixels at `dpi`.
pub fn points(px: u32, dpi: f32) -> f32 {
    px as f32 * 72.0 / dpi
}
