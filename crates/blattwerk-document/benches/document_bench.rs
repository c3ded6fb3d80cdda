// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the blattwerk-document crate: normalizing an
// EXIF-tagged JPEG and assembling a short document from normalized pages.

use std::io::Cursor;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use blattwerk_document::{ImageNormalizer, PageAssembler};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A 320x240 JPEG with a gradient, tagged with the given EXIF orientation.
fn tagged_jpeg(tag: u16) -> Vec<u8> {
    let (width, height) = (320u32, 240u32);
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 128])
    });
    let mut jpeg = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
        .expect("JPEG encoding");

    // Minimal big-endian TIFF with a single Orientation entry.
    let mut payload = b"Exif\0\0MM\x00\x2a".to_vec();
    payload.extend_from_slice(&8u32.to_be_bytes());
    payload.extend_from_slice(&1u16.to_be_bytes());
    payload.extend_from_slice(&0x0112u16.to_be_bytes());
    payload.extend_from_slice(&3u16.to_be_bytes());
    payload.extend_from_slice(&1u32.to_be_bytes());
    payload.extend_from_slice(&tag.to_be_bytes());
    payload.extend_from_slice(&[0, 0]);
    payload.extend_from_slice(&0u32.to_be_bytes());

    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Decode, rotate (tag 6) and coerce one 320x240 JPEG.
fn bench_normalize(c: &mut Criterion) {
    let jpeg = tagged_jpeg(6);
    let normalizer = ImageNormalizer::new();

    c.bench_function("normalize_bytes (320x240, tag 6)", |b| {
        b.iter(|| {
            let image = normalizer
                .normalize_bytes("bench.jpg", black_box(&jpeg))
                .expect("normalize");
            black_box(image);
        });
    });
}

/// Render a four-page document in memory from pre-normalized images.
fn bench_render(c: &mut Criterion) {
    let normalizer = ImageNormalizer::new();
    let pages: Vec<_> = [1u16, 3, 6, 8]
        .iter()
        .map(|tag| {
            normalizer
                .normalize_bytes(format!("page-{tag}.jpg"), &tagged_jpeg(*tag))
                .expect("normalize")
        })
        .collect();
    let assembler = PageAssembler::default();

    c.bench_function("render (4 pages)", |b| {
        b.iter(|| {
            let bytes = assembler.render(black_box(pages.clone())).expect("render");
            black_box(bytes);
        });
    });
}

criterion_group!(benches, bench_normalize, bench_render);
criterion_main!(benches);
