// src/web/handlers/analysis_handlers.rs

use crate::career_analysis::CareerAnalyzer;
use crate::web::types::ErrorBody;

use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::{Json, Value};
use rocket::State;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

pub async fn analyze_handler(
    body: String,
    analyzer: &State<CareerAnalyzer>,
) -> Result<Json<Value>, Custom<Json<ErrorBody>>> {
    let request_id = Uuid::new_v4();
    let span = info_span!("analyze", %request_id);

    async move {
        info!("Received career analysis request ({} bytes)", body.len());

        match analyzer.analyze_body(&body).await {
            Ok(suggestions) => {
                info!("Career analysis completed");
                Ok(Json(suggestions))
            }
            Err(e) => {
                error!(error_code = e.error_code(), "Career analysis failed: {}", e);
                Err(Custom(Status::InternalServerError, Json(ErrorBody::from(&e))))
            }
        }
    }
    .instrument(span)
    .await
}
