use std::collections::BTreeSet;
use std::fmt;

use crate::error::ExtractError;

type Result<T> = std::result::Result<T, ExtractError>;

/// A resolved, validated set of pages to copy.
///
/// Page numbers are 1-based, unique, in ascending order and within the
/// bounds of the document they were resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pages: Vec<u32>,
}

impl Selection {
    /// 1-based page numbers, ascending.
    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    /// 0-based page indices, ascending.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.iter().map(|&p| p - 1)
    }

    pub fn first(&self) -> u32 {
        self.pages[0]
    }

    pub fn last(&self) -> u32 {
        self.pages[self.pages.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }
}

/// An inclusive, 1-based `start..=end` page range as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Self {
        PageRange { start, end }
    }

    /// Check the range against a document of `total_pages` pages.
    pub fn resolve(&self, total_pages: u32) -> Result<Selection> {
        if self.start < 1 || self.end > total_pages || self.start > self.end {
            return Err(ExtractError::InvalidRange {
                start: self.start,
                end: self.end,
                total: total_pages,
            });
        }

        Ok(Selection {
            pages: (self.start..=self.end).collect(),
        })
    }
}

/// One entry of a page list: a single page or an inclusive `a-b` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageSpan {
    pub start: u32,
    pub end: u32,
}

impl PageSpan {
    pub fn new(start: u32, end: u32) -> Self {
        PageSpan { start, end }
    }

    pub fn single(page: u32) -> Self {
        PageSpan::new(page, page)
    }
}

impl fmt::Display for PageSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Parse a comma-separated page list like "1,3,5-7,9" into spans, in input
/// order. Nothing is expanded and bounds are not checked here; see
/// [`resolve_pages`].
pub fn parse_page_list(s: &str) -> Result<Vec<PageSpan>> {
    if s.trim().is_empty() {
        return Err(ExtractError::EmptySelection);
    }

    s.split(',')
        .map(|part| {
            let token = part.trim();
            match token.split_once('-') {
                Some((start, end)) => {
                    let start = parse_page_number(start, token)?;
                    let end = parse_page_number(end, token)?;
                    if start > end {
                        return Err(ExtractError::ReversedRange {
                            token: token.to_string(),
                        });
                    }
                    Ok(PageSpan::new(start, end))
                }
                None => parse_page_number(token, token).map(PageSpan::single),
            }
        })
        .collect()
}

fn parse_page_number(s: &str, token: &str) -> Result<u32> {
    let s = s.trim();
    // u32::from_str accepts a leading '+'
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExtractError::Parse {
            token: token.to_string(),
        });
    }
    s.parse::<u32>().map_err(|_| ExtractError::Parse {
        token: token.to_string(),
    })
}

/// Validate requested spans against the document and collapse them into a
/// selection.
///
/// Bounds are checked per span before anything is expanded, so the work
/// done is limited by `total_pages` rather than by the numbers typed in.
/// Any out-of-range page rejects the whole request; the offending pages are
/// reported as merged spans.
pub fn resolve_pages(spans: &[PageSpan], total_pages: u32) -> Result<Selection> {
    let mut invalid = Vec::new();
    for span in spans {
        if span.start < 1 {
            invalid.push(PageSpan::single(0));
        }
        if span.end > total_pages {
            invalid.push(PageSpan::new(
                span.start.max(total_pages.saturating_add(1)),
                span.end,
            ));
        }
    }

    if !invalid.is_empty() {
        return Err(ExtractError::PagesOutOfRange {
            pages: merge_spans(invalid),
            total: total_pages,
        });
    }

    let pages: BTreeSet<u32> = spans.iter().flat_map(|s| s.start..=s.end).collect();
    if pages.is_empty() {
        return Err(ExtractError::EmptySelection);
    }

    Ok(Selection {
        pages: pages.into_iter().collect(),
    })
}

fn merge_spans(mut spans: Vec<PageSpan>) -> Vec<PageSpan> {
    spans.sort();
    let mut merged: Vec<PageSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end.saturating_add(1) => {
                last.end = last.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Parse and validate a page list in one step.
pub fn select_pages(s: &str, total_pages: u32) -> Result<Selection> {
    let spans = parse_page_list(s)?;
    resolve_pages(&spans, total_pages)
}
