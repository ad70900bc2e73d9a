// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::career_analysis::CareerAnalyzer;
use crate::core::ConfigManager;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::fs::{FileServer, NamedFile};
use rocket::http::{Header, Status};
use rocket::response::status::Custom;
use rocket::serde::json::{Json, Value};
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use std::sync::Arc;
use tracing::{error, info, warn};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/analyze", data = "<body>")]
pub async fn analyze(
    body: String,
    analyzer: &State<CareerAnalyzer>,
) -> Result<Json<Value>, Custom<Json<ErrorBody>>> {
    handlers::analyze_handler(body, analyzer).await
}

#[get("/health")]
pub async fn health(analyzer: &State<CareerAnalyzer>) -> Json<HealthResponse> {
    handlers::health_handler(analyzer).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

#[get("/")]
pub async fn index(config: &State<ServerConfig>) -> Option<NamedFile> {
    handlers::serve_page(&config.pages_dir, handlers::INDEX_PAGE).await
}

#[get("/dashboard")]
pub async fn dashboard(config: &State<ServerConfig>) -> Option<NamedFile> {
    handlers::serve_page(&config.pages_dir, handlers::DASHBOARD_PAGE).await
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorBody> {
    Json(ErrorBody::new("Invalid request format"))
}

#[rocket::catch(404)]
pub fn not_found(request: &Request<'_>) -> Json<ErrorBody> {
    Json(ErrorBody::new(format!("Not found: {}", request.uri())))
}

#[rocket::catch(413)]
pub fn payload_too_large() -> Json<ErrorBody> {
    Json(ErrorBody::new("Request body is too large"))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<ErrorBody> {
    Json(ErrorBody::new("Request body could not be processed"))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorBody> {
    Json(ErrorBody::new("Internal server error"))
}

/// Assemble the application without launching it.
pub fn build_rocket(
    figment: Figment,
    analyzer: CareerAnalyzer,
    server_config: ServerConfig,
) -> Rocket<Build> {
    let static_dir = server_config.static_dir.clone();

    let rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(analyzer)
        .manage(server_config)
        .register(
            "/",
            catchers![
                bad_request,
                not_found,
                payload_too_large,
                unprocessable,
                internal_error
            ],
        )
        .mount("/", routes![index, dashboard])
        .mount("/api", routes![analyze, health, options]);

    if static_dir.is_dir() {
        rocket.mount("/static", FileServer::from(&static_dir))
    } else {
        warn!(
            "Static directory {} not found, /static is not served",
            static_dir.display()
        );
        rocket
    }
}

// Main server start function
pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let client = Arc::new(config.create_inference_client());
    let analyzer = CareerAnalyzer::new(client);

    let server_config = ServerConfig {
        pages_dir: config.environment.pages_path.clone(),
        static_dir: config.environment.static_path.clone(),
    };

    let figment = rocket::Config::figment()
        .merge(("address", config.environment.address.clone()))
        .merge(("port", config.environment.port))
        .merge(("log_level", "critical"));

    info!("Starting FutureMe career analysis server");
    info!("Pages: {}", server_config.pages_dir.display());
    info!("Static assets: {}", server_config.static_dir.display());
    info!(
        "Server: http://{}:{}",
        config.environment.address, config.environment.port
    );

    if let Err(e) = build_rocket(figment, analyzer, server_config)
        .launch()
        .await
    {
        error!("Server failed: {}", e);
        anyhow::bail!("Server failed: {}", e);
    }

    Ok(())
}
