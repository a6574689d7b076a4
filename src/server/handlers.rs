use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::Serialize;

use super::form::read_form;
use super::{ServerConfig, ServerError};
use crate::error::ExtractError;
use crate::page_range::{select_pages, PageRange, Selection};
use crate::pdf::{self, PdfDocument};

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub page_count: u32,
    pub title: Option<String>,
}

pub async fn info_handler(
    config: web::Data<ServerConfig>,
    payload: Multipart,
) -> Result<HttpResponse, ServerError> {
    let form = read_form(payload, config.max_upload_bytes).await?;
    let info = web::block(move || PdfDocument::from_bytes(&form.pdf).map(|doc| doc.info())).await??;

    log::info!("upload with {} page(s)", info.page_count);

    Ok(HttpResponse::Ok().json(InfoResponse {
        page_count: info.page_count,
        title: info.title,
    }))
}

pub async fn extract_range_handler(
    config: web::Data<ServerConfig>,
    payload: Multipart,
) -> Result<HttpResponse, ServerError> {
    let form = read_form(payload, config.max_upload_bytes).await?;
    let range = PageRange::new(form.page_number("start_page")?, form.page_number("end_page")?);

    log::info!("extracting page range {}-{}", range.start, range.end);

    let bytes = extract(form.pdf, move |total| range.resolve(total)).await?;
    let filename = format!("extracted_pages_{}_to_{}.pdf", range.start, range.end);
    Ok(download(bytes, &filename))
}

pub async fn extract_pages_handler(
    config: web::Data<ServerConfig>,
    payload: Multipart,
) -> Result<HttpResponse, ServerError> {
    let form = read_form(payload, config.max_upload_bytes).await?;
    let pages = form.text("pages").unwrap_or_default().to_string();

    log::info!("extracting pages {:?}", pages);

    let bytes = extract(form.pdf, move |total| select_pages(&pages, total)).await?;
    Ok(download(bytes, "extracted_specific_pages.pdf"))
}

/// Open the upload, resolve the selection against its page count and render
/// the copy, all on the blocking pool.
async fn extract<F>(data: Vec<u8>, select: F) -> Result<Vec<u8>, ServerError>
where
    F: FnOnce(u32) -> Result<Selection, ExtractError> + Send + 'static,
{
    let bytes = web::block(move || -> Result<Vec<u8>, ExtractError> {
        let doc = PdfDocument::from_bytes(&data)?;
        let selection = select(doc.page_count())?;
        let mut new_doc = doc.extract_pages(&selection)?;
        pdf::render(&mut new_doc)
    })
    .await??;

    log::info!("extraction produced {} byte(s)", bytes.len());
    Ok(bytes)
}

fn download(bytes: Vec<u8>, filename: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use actix_web::http::StatusCode;
    use actix_web::web::Bytes;
    use actix_web::{test, App};

    use super::*;
    use crate::pdf::fixture::{page_labels_from_bytes, sample_pdf, sample_pdf_with_title};
    use crate::server::routes;

    const BOUNDARY: &str = "pagepick-test-boundary";

    fn multipart_body(file: Option<&[u8]>, fields: &[(&str, &str)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            write!(
                body,
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .unwrap();
        }
        if let Some(file) = file {
            write!(
                body,
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"upload.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .unwrap();
            body.extend_from_slice(file);
            body.extend_from_slice(b"\r\n");
        }
        write!(body, "--{BOUNDARY}--\r\n").unwrap();
        body
    }

    struct Reply {
        status: StatusCode,
        disposition: Option<String>,
        body: Bytes,
    }

    impl Reply {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.body).into_owned()
        }
    }

    async fn post_with(config: ServerConfig, uri: &str, body: Vec<u8>) -> Reply {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .configure(routes),
        )
        .await;
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = test::read_body(resp).await;
        Reply {
            status,
            disposition,
            body,
        }
    }

    async fn post(uri: &str, body: Vec<u8>) -> Reply {
        post_with(ServerConfig::default(), uri, body).await
    }

    #[actix_web::test]
    async fn test_index_page() {
        let app = test::init_service(App::new().configure(routes)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("app.js"));
    }

    #[actix_web::test]
    async fn test_info_reports_page_count() {
        let pdf = sample_pdf_with_title(20, "Handbook");
        let reply = post("/api/info", multipart_body(Some(&pdf), &[])).await;
        assert_eq!(reply.status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&reply.body).unwrap();
        assert_eq!(json["page_count"], 20);
        assert_eq!(json["title"], "Handbook");
    }

    #[actix_web::test]
    async fn test_extract_range() {
        let pdf = sample_pdf(10);
        let body = multipart_body(Some(&pdf), &[("start_page", "2"), ("end_page", "4")]);
        let reply = post("/api/extract/range", body).await;

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(
            reply.disposition.as_deref(),
            Some("attachment; filename=\"extracted_pages_2_to_4.pdf\"")
        );
        assert_eq!(page_labels_from_bytes(&reply.body), vec![2, 3, 4]);
    }

    #[actix_web::test]
    async fn test_extract_full_range() {
        let pdf = sample_pdf(6);
        let body = multipart_body(Some(&pdf), &[("start_page", "1"), ("end_page", "6")]);
        let reply = post("/api/extract/range", body).await;
        assert_eq!(page_labels_from_bytes(&reply.body), vec![1, 2, 3, 4, 5, 6]);
    }

    #[actix_web::test]
    async fn test_extract_range_out_of_bounds() {
        let pdf = sample_pdf(10);
        for (start, end) in [("0", "3"), ("1", "11"), ("5", "4")] {
            let body = multipart_body(Some(&pdf), &[("start_page", start), ("end_page", end)]);
            let reply = post("/api/extract/range", body).await;
            assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY, "{start}-{end}");
            assert!(reply.text().contains("invalid page range"), "{}", reply.text());
            assert_eq!(reply.disposition, None);
        }
    }

    #[actix_web::test]
    async fn test_extract_range_requires_numbers() {
        let pdf = sample_pdf(3);
        let body = multipart_body(Some(&pdf), &[("start_page", "first"), ("end_page", "2")]);
        let reply = post("/api/extract/range", body).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert!(reply.text().contains("start_page"));
    }

    #[actix_web::test]
    async fn test_extract_pages() {
        let pdf = sample_pdf(20);
        let reply = post(
            "/api/extract/pages",
            multipart_body(Some(&pdf), &[("pages", "4-6,10")]),
        )
        .await;

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(
            reply.disposition.as_deref(),
            Some("attachment; filename=\"extracted_specific_pages.pdf\"")
        );
        assert_eq!(page_labels_from_bytes(&reply.body), vec![4, 5, 6, 10]);
    }

    #[actix_web::test]
    async fn test_extract_pages_in_source_order() {
        let pdf = sample_pdf(10);
        let reply = post(
            "/api/extract/pages",
            multipart_body(Some(&pdf), &[("pages", "3,1,2")]),
        )
        .await;
        assert_eq!(page_labels_from_bytes(&reply.body), vec![1, 2, 3]);
    }

    #[actix_web::test]
    async fn test_extract_pages_errors() {
        let pdf = sample_pdf(20);
        for (pages, needle) in [
            ("1,x", "'x'"),
            ("0", "0"),
            ("3,21", "21"),
            ("9-7", "9-7"),
            ("1-4294967295", "21-4294967295"),
            ("", "no pages selected"),
        ] {
            let reply = post(
                "/api/extract/pages",
                multipart_body(Some(&pdf), &[("pages", pages)]),
            )
            .await;
            assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY, "{pages}");
            assert!(reply.text().contains(needle), "{pages}: {}", reply.text());
        }
    }

    #[actix_web::test]
    async fn test_missing_file() {
        let reply = post("/api/extract/pages", multipart_body(None, &[("pages", "1")])).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.text(), "A PDF file is required.");
    }

    #[actix_web::test]
    async fn test_rejects_non_pdf() {
        let reply = post("/api/info", multipart_body(Some(b"GIF89a..."), &[])).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.text(), "The uploaded file is not a PDF.");
    }

    #[actix_web::test]
    async fn test_unreadable_pdf() {
        let reply = post(
            "/api/extract/pages",
            multipart_body(Some(b"%PDF-1.4 truncated"), &[("pages", "1")]),
        )
        .await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert!(reply.text().starts_with("could not read PDF"));
    }

    #[actix_web::test]
    async fn test_upload_limit() {
        let config = ServerConfig {
            max_upload_bytes: 64,
            ..ServerConfig::default()
        };
        let pdf = sample_pdf(2);
        let reply = post_with(config, "/api/info", multipart_body(Some(&pdf), &[])).await;
        assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
