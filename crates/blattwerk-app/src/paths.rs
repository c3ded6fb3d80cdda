// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Input and output path handling for the command line.

use std::path::{Path, PathBuf};

use blattwerk_core::error::{BlattwerkError, Result};
use blattwerk_core::{AppConfig, SourceImage};

/// Turn the selected paths into sources, in the order given.
///
/// Every path must carry an accepted extension and be readable as a file;
/// the first one that isn't ends the selection.
pub fn collect_sources(paths: &[PathBuf], config: &AppConfig) -> Result<Vec<SourceImage>> {
    paths
        .iter()
        .enumerate()
        .map(|(offset, path)| {
            if !has_accepted_extension(path, config) {
                return Err(BlattwerkError::UnsupportedInput(format!(
                    "'{}' is not a JPEG file",
                    path.display()
                )));
            }
            SourceImage::from_path(path).map_err(|err| BlattwerkError::UnreadableImage {
                index: Some(offset + 1),
                origin: file_name(path),
                reason: err.to_string(),
            })
        })
        .collect()
}

fn has_accepted_extension(path: &Path, config: &AppConfig) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| config.accepts_extension(ext))
}

/// Append `.pdf` unless the path already ends with it (any case).
pub fn ensure_pdf_extension(path: PathBuf) -> PathBuf {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        return path;
    }
    let mut raw = path.into_os_string();
    raw.push(".pdf");
    PathBuf::from(raw)
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Byte count as megabytes with one decimal, e.g. `2.4 MB`.
pub fn megabytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
}
