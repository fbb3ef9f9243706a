use actix_web::{HttpResponse, Result, web};
use chrono::Utc;
use serde_json::json;

pub async fn root() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "message": "Backend Sistema de Cardápio funcionando!",
        "timestamp": Utc::now().to_rfc3339(),
        "status": "OK"
    })))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Serviço no ar")
    )
)]
pub async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "OK",
        "service": "cardapio-backend",
        "timestamp": Utc::now().to_rfc3339()
    })))
}

pub fn health_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/api/health", web::get().to(health));
}
