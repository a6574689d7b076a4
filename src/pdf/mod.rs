pub mod document;
pub mod output;

#[cfg(test)]
pub mod fixture;

pub use document::PdfDocument;
pub use output::{render, save};
