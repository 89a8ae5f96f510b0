//! HTTP handlers: lookup form, JSON API, report downloads and health.

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{get, post, web, HttpResponse, Responder};
use domain_recon_core::{export, validate_domain, ApiResponse, ReconError, ReconReport, ReconService};
use serde::{Deserialize, Serialize};

use crate::config::WebConfig;
use crate::error::ApiError;

/// Embedded single-page form; the server treats it as an opaque asset.
const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub domain: String,
    pub nameserver: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub domain: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// Run the recon pipeline and write both export files before responding.
#[post("/api/lookup")]
pub async fn lookup(
    config: web::Data<WebConfig>,
    request: web::Json<LookupRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let report = ReconService::run(&request.domain, request.nameserver.as_deref()).await?;

    let out_dir = config.output_dir.clone();
    let report = web::block(move || -> Result<ReconReport, ReconError> {
        export::write_all(&report, &out_dir)?;
        Ok(report)
    })
    .await
    .map_err(|e| ReconError::ExportError(format!("Export task failed: {e}")))??;

    Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
}

/// Serve a previously written export file as an attachment.
#[get("/api/download/{format}")]
pub async fn download(
    config: web::Data<WebConfig>,
    format: web::Path<String>,
    query: web::Query<DownloadQuery>,
) -> Result<HttpResponse, ApiError> {
    // Same gate as the lookup path. Export files are named after the
    // normalized domain, and anything path-like never reaches the
    // filesystem join below.
    let domain = validate_domain(&query.domain)?;

    let (path, content_type) = match format.as_str() {
        "csv" => (
            export::csv_path(&config.output_dir, &domain),
            "text/csv; charset=utf-8",
        ),
        "json" => (
            export::json_path(&config.output_dir, &domain),
            "application/json",
        ),
        other => {
            return Err(ReconError::ValidationError(format!(
                "Unknown download format: {other}"
            ))
            .into())
        }
    };

    let body = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::NotFound(format!(
                "No exported {format} report for {domain}; run a lookup first"
            ))
        } else {
            ReconError::ExportError(format!("Failed to read {}: {e}", path.display())).into()
        }
    })?;

    let filename = path.file_name().map_or_else(
        || format!("report.{format}"),
        |name| name.to_string_lossy().into_owned(),
    );

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(body))
}

#[get("/api/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}
