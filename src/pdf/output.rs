use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use lopdf::Document;
use tempfile::NamedTempFile;

use crate::error::ExtractError;

type Result<T> = std::result::Result<T, ExtractError>;

/// Write `doc` to `path`.
///
/// The PDF is written to a temporary file next to `path` and renamed into
/// place once complete, so a failed write never leaves a partial file
/// behind.
pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".pagepick-")
        .suffix(".pdf")
        .tempfile_in(dir)?;
    write_pdf(doc, &mut tmp)?;
    tmp.persist(path).map_err(|e| ExtractError::Io(e.error))?;
    Ok(())
}

/// Serialise `doc` into memory by way of a scoped temporary file.
///
/// The temporary file is removed when this returns, on success or failure.
pub fn render(doc: &mut Document) -> Result<Vec<u8>> {
    render_in(&std::env::temp_dir(), |tmp| write_pdf(doc, tmp))
}

/// Run `write` against a fresh temporary file in `dir` and read back what it
/// wrote. The file is gone once this returns, whatever `write` did.
fn render_in<F>(dir: &Path, write: F) -> Result<Vec<u8>>
where
    F: FnOnce(&mut NamedTempFile) -> Result<()>,
{
    let mut tmp = tempfile::Builder::new()
        .prefix(".pagepick-")
        .suffix(".pdf")
        .tempfile_in(dir)?;
    write(&mut tmp)?;
    let bytes = fs::read(tmp.path())?;
    log::debug!("rendered {} byte(s) via {}", bytes.len(), tmp.path().display());
    Ok(bytes)
}

fn write_pdf(doc: &mut Document, tmp: &mut NamedTempFile) -> Result<()> {
    let mut writer = BufWriter::new(tmp.as_file_mut());
    doc.save_to(&mut writer)?;
    writer.flush()?;
    Ok(())
}
