// src/api/handlers/health.rs
use actix_web::{
    web::{self, Data},
    HttpResponse, Scope,
};

use crate::core::services::health::HealthService;

pub fn scope() -> Scope {
    web::scope("/health").service(web::resource("").route(web::get().to(health)))
}

async fn health(service: Data<HealthService>) -> HttpResponse {
    let metrics = service.get_metrics();
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "uptime": metrics.uptime,
        "sessionsStarted": metrics.sessions_started,
        "submissions": metrics.submissions,
    }))
}
