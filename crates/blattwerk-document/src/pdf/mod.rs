// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — assembling image pages and reading the result back.

pub mod reader;
pub mod writer;

pub use reader::{PageBox, PageImage, PdfReader};
pub use writer::PageAssembler;
