// src/web/handlers/system_handlers.rs
use crate::career_analysis::CareerAnalyzer;
use crate::web::types::HealthResponse;

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn health_handler(analyzer: &State<CareerAnalyzer>) -> Json<HealthResponse> {
    let credential_configured = analyzer.credential_configured();
    info!(
        "Health check (credential configured: {})",
        credential_configured
    );

    Json(HealthResponse {
        status: "OK",
        model: analyzer.model().to_string(),
        credential_configured,
    })
}
