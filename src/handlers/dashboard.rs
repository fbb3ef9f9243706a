use crate::middlewares::auth::get_user_id;
use crate::models::*;
use crate::services::{AuthService, DashboardService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "dashboard",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Estatísticas do dia", body = StatsResponse),
        (status = 401, description = "Não autorizado", body = ErrorResponse),
        (status = 403, description = "Apenas administradores", body = ErrorResponse)
    )
)]
pub async fn stats(
    dashboard_service: web::Data<DashboardService>,
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id(&req).unwrap_or(0);
    if let Err(e) = auth_service.require_admin(user_id).await {
        return Ok(e.error_response());
    }

    match dashboard_service.stats().await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/dashboard/vendas",
    tag = "dashboard",
    params(
        ("data_inicio" = Option<String>, Query, description = "Data inicial (YYYY-MM-DD)"),
        ("data_fim" = Option<String>, Query, description = "Data final (YYYY-MM-DD)")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Relatório de vendas", body = VendasResponse),
        (status = 401, description = "Não autorizado", body = ErrorResponse),
        (status = 403, description = "Apenas administradores", body = ErrorResponse)
    )
)]
pub async fn vendas(
    dashboard_service: web::Data<DashboardService>,
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
    query: web::Query<VendasQuery>,
) -> Result<HttpResponse> {
    let user_id = get_user_id(&req).unwrap_or(0);
    if let Err(e) = auth_service.require_admin(user_id).await {
        return Ok(e.error_response());
    }

    match dashboard_service.vendas(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn dashboard_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dashboard")
            .route("/stats", web::get().to(stats))
            .route("/vendas", web::get().to(vendas)),
    );
}
