// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the console.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::BlattwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// User must do something (pick other files, choose another folder).
    ActionRequired,
    /// Cannot be fixed by retrying: the input itself is bad.
    Permanent,
    /// The user stopped the conversion.
    Cancelled,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level.
    pub severity: Severity,
}

/// Convert a `BlattwerkError` into a `HumanError`.
pub fn humanize_error(err: &BlattwerkError) -> HumanError {
    match err {
        BlattwerkError::UnreadableImage { index, origin, .. } => HumanError {
            message: match index {
                Some(i) => format!("Picture number {i} ({origin}) couldn't be opened."),
                None => format!("The picture {origin} couldn't be opened."),
            },
            suggestion: "The file may be damaged or not really a JPEG. Open it in an image viewer to check, or leave it out and try again.".into(),
            severity: Severity::Permanent,
        },

        BlattwerkError::EmptyJob => HumanError {
            message: "No pictures were selected.".into(),
            suggestion: "Choose one or more .jpg or .jpeg files, then try again.".into(),
            severity: Severity::ActionRequired,
        },

        BlattwerkError::WriteFailure { path, source } => {
            let suggestion = if source.kind() == std::io::ErrorKind::PermissionDenied {
                "You don't have permission to save there. Choose a different folder.".into()
            } else if source.kind() == std::io::ErrorKind::NotFound {
                "That folder doesn't exist. Choose a different location.".into()
            } else {
                "Check there is enough free space, or choose a different location.".into()
            };
            HumanError {
                message: format!("The PDF couldn't be saved to {}.", path.display()),
                suggestion,
                severity: Severity::ActionRequired,
            }
        }

        BlattwerkError::Cancelled { .. } => HumanError {
            message: "The conversion was stopped.".into(),
            suggestion: "No PDF was written. Start again when you're ready.".into(),
            severity: Severity::Cancelled,
        },

        BlattwerkError::UnsupportedInput(detail) => HumanError {
            message: "Only JPEG pictures can be converted.".into(),
            suggestion: format!("Pick files ending in .jpg or .jpeg. ({detail})"),
            severity: Severity::ActionRequired,
        },

        BlattwerkError::PdfError(_)
        | BlattwerkError::VerificationFailed { .. }
        | BlattwerkError::PageImageMismatch { .. } => HumanError {
            message: "The saved PDF doesn't look right.".into(),
            suggestion: "Try the conversion again. If this keeps happening, please report it.".into(),
            severity: Severity::Permanent,
        },

        BlattwerkError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "A file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the files again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "Blattwerk doesn't have permission to read that file.".into(),
                    suggestion: "Check the file permissions, or copy the file somewhere else first.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your disk may be full.".into(),
                    severity: Severity::Permanent,
                }
            }
        }

        BlattwerkError::Serialization(_) => HumanError {
            message: "The settings file couldn't be read.".into(),
            suggestion: "Delete config.json from the Blattwerk data folder to go back to the defaults.".into(),
            severity: Severity::ActionRequired,
        },
    }
}
