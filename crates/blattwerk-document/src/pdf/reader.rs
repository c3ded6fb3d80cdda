// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open a written document with `lopdf` and inspect its page tree,
// used to verify assembled output.

use std::path::Path;

use blattwerk_core::PixelSize;
use blattwerk_core::error::{BlattwerkError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, info, instrument};

/// Guard against malformed page trees with a /Parent cycle.
const MAX_TREE_DEPTH: usize = 32;

/// Size of one page's MediaBox in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub width_pt: f32,
    pub height_pt: f32,
}

/// The image XObject a page draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub size: PixelSize,
    /// Colour space name without the leading slash, e.g. `DeviceRGB`.
    pub color_space: String,
    pub bits_per_component: u8,
}

/// Read-only view over an existing PDF.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            BlattwerkError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            BlattwerkError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// MediaBox size of every page, in page order.
    pub fn page_boxes(&self) -> Result<Vec<PageBox>> {
        // get_pages is keyed by 1-indexed page number, so iteration is in order.
        self.document
            .get_pages()
            .into_iter()
            .map(|(number, page_id)| {
                self.media_box(page_id).ok_or_else(|| {
                    BlattwerkError::PdfError(format!("page {number} has no usable MediaBox"))
                })
            })
            .collect()
    }

    /// The first image drawn on every page, in page order.
    pub fn page_images(&self) -> Result<Vec<PageImage>> {
        self.document
            .get_pages()
            .into_iter()
            .map(|(number, page_id)| {
                self.drawn_image(page_id).ok_or_else(|| {
                    BlattwerkError::PdfError(format!("page {number} draws no image"))
                })
            })
            .collect()
    }

    /// Check that page `n` embeds an 8-bit RGB image of exactly `expected[n]`
    /// pixels, and that there are no other pages.
    pub fn verify_pages(&self, expected: &[PixelSize]) -> Result<()> {
        self.verify_page_count(expected.len())?;
        for (offset, (image, want)) in self.page_images()?.iter().zip(expected).enumerate() {
            if image.size != *want
                || image.color_space != "DeviceRGB"
                || image.bits_per_component != 8
            {
                return Err(BlattwerkError::PageImageMismatch {
                    page: offset + 1,
                    expected: format!("{want} DeviceRGB/8"),
                    actual: format!(
                        "{} {}/{}",
                        image.size, image.color_space, image.bits_per_component
                    ),
                });
            }
        }
        debug!(pages = expected.len(), "Page images verified");
        Ok(())
    }

    /// Check that the document has exactly `expected` pages.
    pub fn verify_page_count(&self, expected: usize) -> Result<()> {
        let actual = self.page_count();
        if actual == expected {
            Ok(())
        } else {
            Err(BlattwerkError::VerificationFailed { expected, actual })
        }
    }

    // -- Helpers --------------------------------------------------------------

    /// MediaBox of a page, following /Parent for inherited values.
    fn media_box(&self, page_id: ObjectId) -> Option<PageBox> {
        let mut node = page_id;
        for _ in 0..MAX_TREE_DEPTH {
            let dict = self.document.get_dictionary(node).ok()?;
            if let Ok(value) = dict.get(b"MediaBox") {
                return self.parse_box(value);
            }
            node = dict.get(b"Parent").ok()?.as_reference().ok()?;
        }
        None
    }

    /// Image XObject named by the first `Do` operator in the page content.
    fn drawn_image(&self, page_id: ObjectId) -> Option<PageImage> {
        let content = self.document.get_and_decode_page_content(page_id).ok()?;
        let name = content
            .operations
            .iter()
            .find(|op| op.operator == "Do")?
            .operands
            .first()?
            .as_name()
            .ok()?;

        let (inline, referenced) = self.document.get_page_resources(page_id).ok()?;
        let mut resources: Vec<&Dictionary> = inline.into_iter().collect();
        resources.extend(
            referenced
                .iter()
                .filter_map(|id| self.document.get_dictionary(*id).ok()),
        );

        resources.into_iter().find_map(|dict| {
            let xobjects = self.document.get_dict_in_dict(dict, b"XObject").ok()?;
            let stream = self.resolve(xobjects.get(name).ok()?)?.as_stream().ok()?;
            image_info(&stream.dict)
        })
    }

    fn parse_box(&self, value: &Object) -> Option<PageBox> {
        let value = self.resolve(value)?;
        let coords: Vec<f32> = value
            .as_array()
            .ok()?
            .iter()
            .filter_map(|item| self.resolve(item)?.as_float().ok())
            .collect();
        let [x0, y0, x1, y1] = coords.as_slice() else {
            return None;
        };
        Some(PageBox {
            width_pt: (x1 - x0).abs(),
            height_pt: (y1 - y0).abs(),
        })
    }

    fn resolve<'a>(&'a self, object: &'a Object) -> Option<&'a Object> {
        match object {
            Object::Reference(id) => self.document.get_object(*id).ok(),
            other => Some(other),
        }
    }
}

fn image_info(dict: &Dictionary) -> Option<PageImage> {
    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }
    let integer = |key: &[u8]| dict.get(key).ok()?.as_i64().ok();
    let color_space = match dict.get(b"ColorSpace").ok()? {
        Object::Name(name) => name.as_slice(),
        Object::Array(items) => items.first()?.as_name().ok()?,
        _ => return None,
    };
    Some(PageImage {
        size: PixelSize::new(
            u32::try_from(integer(b"Width")?).ok()?,
            u32::try_from(integer(b"Height")?).ok()?,
        ),
        color_space: String::from_utf8_lossy(color_space).into_owned(),
        bits_per_component: u8::try_from(integer(b"BitsPerComponent")?).ok()?,
    })
}
