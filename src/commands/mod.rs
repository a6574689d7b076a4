pub mod extract;
pub mod info;
pub mod pick;

use std::path::{Path, PathBuf};

/// `<dir>/<stem>_extracted_pages.pdf` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    input.with_file_name(format!("{}_extracted_pages.pdf", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("books/PediatricGastro.pdf")),
            PathBuf::from("books/PediatricGastro_extracted_pages.pdf")
        );
    }
}
