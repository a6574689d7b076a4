//! The interactive extractor: an HTML form backed by a small stateless
//! HTTP API. The browser keeps the uploaded PDF and sends it along with
//! every request, so nothing survives between requests on the server.

mod error;
mod form;
mod handlers;

use actix_web::{middleware, web, App, HttpResponse, HttpServer};

pub use error::ServerError;

const INDEX_HTML: &str = include_str!("../../static/index.html");
const APP_JS: &str = include_str!("../../static/app.js");
const APP_CSS: &str = include_str!("../../static/app.css");

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub max_upload_bytes: usize,
    /// `None` keeps actix's default of one worker per core.
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1:8080".to_string(),
            max_upload_bytes: 256 * 1024 * 1024,
            workers: None,
        }
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/app.js", web::get().to(app_js))
        .route("/app.css", web::get().to(app_css))
        .route("/api/info", web::post().to(handlers::info_handler))
        .route(
            "/api/extract/range",
            web::post().to(handlers::extract_range_handler),
        )
        .route(
            "/api/extract/pages",
            web::post().to(handlers::extract_pages_handler),
        );
}

pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let bind = config.bind.clone();
    let workers = config.workers;
    let data = web::Data::new(config);

    log::info!("pagepick listening on http://{}", bind);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(middleware::Logger::default())
            .wrap(security_headers())
            .configure(routes)
            .default_service(web::to(|| async {
                HttpResponse::NotFound().body("404 - page not found")
            }))
    });
    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    server.bind(bind)?.run().await
}

fn security_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("Referrer-Policy", "no-referrer"))
        .add((
            "Content-Security-Policy",
            "default-src 'self'; script-src 'self'; style-src 'self';",
        ))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

async fn app_js() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/javascript; charset=utf-8")
        .body(APP_JS)
}

async fn app_css() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(APP_CSS)
}
