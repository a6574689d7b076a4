use crate::pdf::PdfDocument;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let doc = PdfDocument::open(path)
        .with_context(|| format!("Failed to open PDF: {}", path.display()))?;
    let info = doc.info();

    println!("File: {}", path.display());
    println!("Pages: {}", info.page_count);

    if let Some(title) = &info.title {
        println!("Title: {}", title);
    }
    if let Some(author) = &info.author {
        println!("Author: {}", author);
    }
    if let Some(producer) = &info.producer {
        println!("Producer: {}", producer);
    }

    Ok(())
}
