// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native dialogs, used when files or the destination are not given on the
// command line.

use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

/// Ask for one or more JPEG files. `None` when the user cancels.
pub fn pick_jpeg_files() -> Option<Vec<PathBuf>> {
    FileDialog::new()
        .set_title("Select JPEG files to convert")
        .add_filter("JPEG files", &["jpg", "jpeg", "JPG", "JPEG"])
        .add_filter("All files", &["*"])
        .pick_files()
        .filter(|files| !files.is_empty())
}

/// Ask where to save the PDF. `None` when the user cancels.
pub fn pick_output_file() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Save PDF as")
        .set_file_name("document.pdf")
        .add_filter("PDF files", &["pdf"])
        .save_file()
}

pub fn show_info(title: &str, description: &str) {
    show(MessageLevel::Info, title, description);
}

pub fn show_error(title: &str, description: &str) {
    show(MessageLevel::Error, title, description);
}

fn show(level: MessageLevel, title: &str, description: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}
