use crate::middlewares::auth::get_user_id;
use crate::models::*;
use crate::services::{AuthService, PedidoService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/pedidos",
    tag = "pedidos",
    request_body = CriarPedidoRequest,
    responses(
        (status = 201, description = "Pedido criado com sucesso", body = PedidoResponse),
        (status = 400, description = "Dados inválidos", body = ErrorResponse)
    )
)]
pub async fn criar_pedido(
    pedido_service: web::Data<PedidoService>,
    request: web::Json<CriarPedidoRequest>,
) -> Result<HttpResponse> {
    match pedido_service.criar_pedido(request.into_inner()).await {
        Ok(pedido) => Ok(HttpResponse::Created().json(json!({
            "message": "Pedido criado com sucesso",
            "pedido": pedido
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/pedidos",
    tag = "pedidos",
    params(
        ("status" = Option<String>, Query, description = "Status do pedido, ou todos"),
        ("data_inicio" = Option<String>, Query, description = "Data inicial (YYYY-MM-DD)"),
        ("data_fim" = Option<String>, Query, description = "Data final (YYYY-MM-DD)"),
        ("page" = Option<u32>, Query, description = "Página"),
        ("limit" = Option<u32>, Query, description = "Itens por página")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Lista de pedidos", body = ListaPedidosResponse),
        (status = 401, description = "Não autorizado", body = ErrorResponse),
        (status = 403, description = "Apenas administradores", body = ErrorResponse)
    )
)]
pub async fn listar_pedidos(
    pedido_service: web::Data<PedidoService>,
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
    query: web::Query<ListarPedidosQuery>,
) -> Result<HttpResponse> {
    let user_id = get_user_id(&req).unwrap_or(0);
    if let Err(e) = auth_service.require_admin(user_id).await {
        return Ok(e.error_response());
    }

    match pedido_service.listar_pedidos(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/pedidos/{id}",
    tag = "pedidos",
    params(
        ("id" = i64, Path, description = "Id do pedido")
    ),
    responses(
        (status = 200, description = "Detalhe do pedido", body = PedidoResponse),
        (status = 404, description = "Pedido não encontrado", body = ErrorResponse)
    )
)]
pub async fn obter_pedido(
    pedido_service: web::Data<PedidoService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match pedido_service.obter_pedido(path.into_inner()).await {
        Ok(pedido) => Ok(HttpResponse::Ok().json(pedido)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/pedidos/{id}/status",
    tag = "pedidos",
    params(
        ("id" = i64, Path, description = "Id do pedido")
    ),
    request_body = AtualizarStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Status atualizado", body = StatusPedidoResumo),
        (status = 400, description = "Status inválido", body = ErrorResponse),
        (status = 404, description = "Pedido não encontrado", body = ErrorResponse)
    )
)]
pub async fn atualizar_status(
    pedido_service: web::Data<PedidoService>,
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<AtualizarStatusRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id(&req).unwrap_or(0);
    if let Err(e) = auth_service.require_admin(user_id).await {
        return Ok(e.error_response());
    }

    match pedido_service
        .atualizar_status(path.into_inner(), &request)
        .await
    {
        Ok(resumo) => Ok(HttpResponse::Ok().json(json!({
            "message": "Status do pedido atualizado com sucesso",
            "pedido": resumo
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn pedidos_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pedidos")
            .route("", web::post().to(criar_pedido))
            .route("", web::get().to(listar_pedidos))
            .route("/{id}", web::get().to(obter_pedido))
            .route("/{id}/status", web::put().to(atualizar_status)),
    );
}
