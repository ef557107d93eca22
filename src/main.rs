use actix_web::web::Query;
use actix_web::{get, middleware, post, web, App, HttpResponse, HttpServer, Responder};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

mod bugfix;
mod features;
mod integrations;
mod store;
mod types;

use crate::integrations::IntegrationSystem;
use crate::store::{default_csv_path, DocumentStore, StoreError, TABLE_CACHE_CAPACITY};

/// Where the document listing reads from, resolved once at startup.
#[derive(Clone)]
struct DocsSource {
    csv_path: PathBuf,
}

#[get("/health")]
async fn health() -> impl Responder {
    web::Json(serde_json::json!({ "status": "ok" }))
}

/* ------------------------ /documents ------------------------ */

#[derive(Debug, serde::Deserialize)]
struct DocumentsQ {
    limit: Option<i64>,
}

#[get("/documents")]
async fn list_documents(
    q: Query<DocumentsQ>,
    docs: web::Data<DocumentStore>,
    source: web::Data<DocsSource>,
) -> actix_web::Result<impl Responder> {
    let limit = q.limit.unwrap_or(100);
    match docs.load(&source.csv_path) {
        Ok(table) => Ok(HttpResponse::Ok().json(table.head(limit))),
        Err(e @ StoreError::MissingUrlColumn { .. }) => {
            error!(error=%e, "document file rejected");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
        Err(e) => {
            error!(error=?e, "document load failed");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "load_failed"
            })))
        }
    }
}

/* ------------------------ /integrations ------------------------ */

#[get("/integrations")]
async fn list_integrations() -> impl Responder {
    let all: Vec<_> = integrations::ALL
        .iter()
        .map(|system| system.mock_response())
        .collect();
    web::Json(all)
}

#[get("/integrations/{system}")]
async fn get_integration(path: web::Path<String>) -> impl Responder {
    match IntegrationSystem::from_name(&path) {
        Some(system) => HttpResponse::Ok().json(system.mock_response()),
        None => HttpResponse::NotFound().json(serde_json::json!({
            "error": "integration not defined"
        })),
    }
}

/* ------------------------ /bugs/draft-fix ------------------------ */

#[post("/bugs/draft-fix")]
async fn draft_bug_fix(payload: web::Json<HashMap<String, String>>) -> impl Responder {
    web::Json(bugfix::draft_fix(&payload))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Logging
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .finish()
        .try_init();

    // Config
    let addr = std::env::var("API_BIND").unwrap_or_else(|_| "127.0.0.1:5001".into());
    let source = DocsSource {
        csv_path: default_csv_path(),
    };

    let docs = web::Data::new(DocumentStore::new(TABLE_CACHE_CAPACITY));
    let source = web::Data::new(source);

    info!(csv = %source.csv_path.display(), "serving documents from CSV");
    info!("🌐 demo api listening on {}", addr);
    HttpServer::new(move || {
        App::new()
            .app_data(docs.clone())
            .app_data(source.clone())
            .wrap(middleware::Logger::default())
            .service(health)
            .service(list_documents)
            .service(list_integrations)
            .service(get_integration)
            .service(draft_bug_fix)
    })
    .bind(addr)?
    .workers(2)
    .run()
    .await
}
