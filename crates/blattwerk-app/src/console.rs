// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Console presentation of conversion events, either as readable lines or as
// one JSON object per line.

use blattwerk_document::{ConversionEvent, ConversionObserver, ImageReport};

use crate::paths::megabytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Prints every event to stdout as it arrives.
pub struct ConsoleObserver {
    format: OutputFormat,
}

impl ConsoleObserver {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl ConversionObserver for ConsoleObserver {
    fn on_event(&self, event: &ConversionEvent) {
        if let Some(line) = render(event, self.format) {
            println!("{line}");
        }
    }
}

/// Format one event. `None` when the event has no console line of its own
/// (a failed job is reported by the caller with a friendlier message).
pub fn render(event: &ConversionEvent, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Json => match serde_json::to_string(event) {
            Ok(json) => Some(json),
            Err(err) => {
                tracing::warn!(error = %err, "could not serialise event");
                None
            }
        },
        OutputFormat::Text => render_text(event),
    }
}

fn render_text(event: &ConversionEvent) -> Option<String> {
    match event {
        ConversionEvent::JobStarted { total, .. } => {
            Some(format!("Processing {total} image(s)..."))
        }
        ConversionEvent::ImageNormalized(report) => Some(describe_image(report)),
        ConversionEvent::ImageFailed {
            index,
            total,
            source,
            reason,
        } => Some(format!("  [{index}/{total}] {source}: failed, {reason}")),
        ConversionEvent::JobCompleted {
            pages,
            output_bytes,
            ..
        } => Some(format!(
            "Created PDF with {pages} page(s), {}",
            megabytes(*output_bytes)
        )),
        ConversionEvent::JobFailed { .. } => None,
    }
}

fn describe_image(report: &ImageReport) -> String {
    let rotation = match report.rotation_degrees {
        0 => "no rotation".to_string(),
        degrees => format!("rotated {degrees}°"),
    };
    let mode = if report.mode_before == report.mode_after {
        report.mode_after.to_string()
    } else {
        format!("{} -> {}", report.mode_before, report.mode_after)
    };
    format!(
        "  [{}/{}] {}: {} (orientation {}, {rotation}) -> {}, {mode}",
        report.index,
        report.total,
        report.source,
        report.original_size,
        report.orientation,
        report.size,
    )
}
