use std::path::Path;

use lopdf::{Document, Object, ObjectId};

use crate::error::ExtractError;
use crate::page_range::{PageSpan, Selection};

type Result<T> = std::result::Result<T, ExtractError>;

pub struct PdfDocument {
    pub doc: Document,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = Document::load(path).map_err(ExtractError::UnreadablePdf)?;
        Ok(PdfDocument { doc })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(data).map_err(ExtractError::UnreadablePdf)?;
        Ok(PdfDocument { doc })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        self.doc.get_pages().into_iter().collect()
    }

    /// Get metadata from the document info dictionary
    pub fn info(&self) -> PdfInfo {
        let mut info = PdfInfo {
            page_count: self.page_count(),
            ..Default::default()
        };

        if let Ok(Object::Reference(info_ref)) = self.doc.trailer.get(b"Info") {
            if let Ok(Object::Dictionary(dict)) = self.doc.get_object(*info_ref) {
                let text = |key: &[u8]| match dict.get(key) {
                    Ok(Object::String(bytes, _)) => decode_pdf_string(bytes),
                    _ => None,
                };
                info.title = text(b"Title");
                info.author = text(b"Author");
                info.producer = text(b"Producer");
            }
        }

        info
    }

    /// Copy the selected pages into a new document.
    ///
    /// Pages keep their source order. Objects only reachable from dropped
    /// pages are pruned from the copy.
    pub fn extract_pages(&self, selection: &Selection) -> Result<Document> {
        let page_ids = self.page_ids();
        let total = page_ids.len() as u32;

        let mut keep = Vec::with_capacity(selection.len());
        for index in selection.indices() {
            match page_ids.get(index as usize) {
                Some(&(num, _)) => keep.push(num),
                None => {
                    return Err(ExtractError::PagesOutOfRange {
                        pages: vec![PageSpan::single(index + 1)],
                        total,
                    })
                }
            }
        }

        let pages_to_delete: Vec<u32> = page_ids
            .iter()
            .map(|&(num, _)| num)
            .filter(|num| keep.binary_search(num).is_err())
            .collect();

        let mut new_doc = self.doc.clone();
        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
            new_doc.prune_objects();
        }

        log::debug!(
            "copied {} of {} page(s), dropped {}",
            selection.len(),
            total,
            pages_to_delete.len()
        );

        Ok(new_doc)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PdfInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub producer: Option<String>,
    pub page_count: u32,
}

fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE_u8, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).ok()
    } else {
        // PDFDocEncoding, treated as Latin-1
        Some(bytes.iter().map(|&b| b as char).collect())
    }
}
