use crate::page_range::select_pages;
use crate::pdf::{self, PdfDocument};
use anyhow::{Context, Result};
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, pages: &str, output: Q) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let doc = PdfDocument::open(input)
        .with_context(|| format!("Failed to open PDF: {}", input.display()))?;
    let selection = select_pages(pages, doc.page_count())?;

    log::info!(
        "extracting pages {:?} of {} from {}",
        selection.pages(),
        doc.page_count(),
        input.display()
    );

    let mut new_doc = doc.extract_pages(&selection)?;
    pdf::save(&mut new_doc, output)
        .with_context(|| format!("Failed to save PDF: {}", output.display()))?;

    println!(
        "Extracted {} page(s) to {}",
        selection.len(),
        output.display()
    );

    Ok(())
}
