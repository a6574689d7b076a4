use thiserror::Error;

use crate::page_range::PageSpan;

/// Everything that can go wrong while turning a request into a new PDF.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not read PDF: {0}")]
    UnreadablePdf(#[source] lopdf::Error),

    #[error("invalid page range {start}-{end} (document has {total} page(s))")]
    InvalidRange { start: u32, end: u32, total: u32 },

    #[error("invalid page selector '{token}'")]
    Parse { token: String },

    #[error("page range '{token}' runs backwards")]
    ReversedRange { token: String },

    #[error(
        "invalid page number(s) {} (document has {total} page(s))",
        join_pages(.pages)
    )]
    PagesOutOfRange { pages: Vec<PageSpan>, total: u32 },

    #[error("no pages selected")]
    EmptySelection,

    #[error("failed to write PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// True for errors caused by the request itself rather than by the host.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, ExtractError::Pdf(_) | ExtractError::Io(_))
    }
}

fn join_pages(pages: &[PageSpan]) -> String {
    pages
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
