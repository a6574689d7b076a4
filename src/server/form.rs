use std::collections::HashMap;

use actix_multipart::{Multipart, MultipartError};
use futures_util::TryStreamExt;

use super::ServerError;

/// Limit for the plain text fields of the form.
const MAX_FIELD_SIZE: usize = 1024;

const TEXT_FIELDS: [&str; 3] = ["start_page", "end_page", "pages"];

/// A fully buffered upload: the PDF plus the text fields sent with it.
#[derive(Debug)]
pub struct UploadForm {
    pub pdf: Vec<u8>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn page_number(&self, name: &str) -> Result<u32, ServerError> {
        let value = self
            .text(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ServerError::MissingField(name.to_string()))?;

        value.parse().map_err(|_| ServerError::InvalidNumber {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

pub async fn read_form(mut payload: Multipart, max_upload: usize) -> Result<UploadForm, ServerError> {
    let mut pdf: Option<Vec<u8>> = None;
    let mut fields = HashMap::new();

    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let name = field.name().to_string();
        let limit = if name == "file" { max_upload } else { MAX_FIELD_SIZE };

        let mut data: Vec<u8> = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(malformed)? {
            if data.len() + chunk.len() > limit {
                return Err(if name == "file" {
                    ServerError::PayloadTooLarge { limit }
                } else {
                    ServerError::FieldTooLong(name)
                });
            }
            data.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "file" => {
                if !is_pdf(&data) {
                    return Err(ServerError::NotPdf);
                }
                pdf = Some(data);
            }
            n if TEXT_FIELDS.contains(&n) => {
                let value = String::from_utf8(data)
                    .map_err(|_| ServerError::InvalidEncoding(name.clone()))?;
                fields.insert(name, value);
            }
            _ => {
                log::debug!("ignoring unknown multipart field '{}'", name);
            }
        }
    }

    let pdf = pdf.ok_or(ServerError::MissingFile)?;
    Ok(UploadForm { pdf, fields })
}

fn malformed(e: MultipartError) -> ServerError {
    ServerError::Multipart(e.to_string())
}

fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF-")
}
