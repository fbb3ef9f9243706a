use crate::middlewares::auth::get_user_id;
use crate::models::*;
use crate::services::{AuthService, CardapioService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/cardapio",
    tag = "cardapio",
    params(
        ("categoria_id" = Option<i64>, Query, description = "Filtra por categoria"),
        ("disponivel" = Option<bool>, Query, description = "Filtra por disponibilidade")
    ),
    responses(
        (status = 200, description = "Itens do cardápio", body = ItensCardapioResponse)
    )
)]
pub async fn listar_itens(
    cardapio_service: web::Data<CardapioService>,
    query: web::Query<CardapioQuery>,
) -> Result<HttpResponse> {
    match cardapio_service.listar_itens(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/cardapio/categorias",
    tag = "cardapio",
    responses(
        (status = 200, description = "Categorias ativas", body = [CategoriaResponse])
    )
)]
pub async fn listar_categorias(
    cardapio_service: web::Data<CardapioService>,
) -> Result<HttpResponse> {
    match cardapio_service.listar_categorias().await {
        Ok(categorias) => Ok(HttpResponse::Ok().json(categorias)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/cardapio/{id}",
    tag = "cardapio",
    params(
        ("id" = i64, Path, description = "Id do item")
    ),
    responses(
        (status = 200, description = "Item do cardápio", body = ItemCardapioResponse),
        (status = 404, description = "Item não encontrado", body = ErrorResponse)
    )
)]
pub async fn obter_item(
    cardapio_service: web::Data<CardapioService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match cardapio_service.obter_item(path.into_inner()).await {
        Ok(item) => Ok(HttpResponse::Ok().json(item)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cardapio",
    tag = "cardapio",
    request_body = CriarItemRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Item criado com sucesso", body = ItemCardapioResponse),
        (status = 400, description = "Dados inválidos", body = ErrorResponse),
        (status = 401, description = "Não autorizado", body = ErrorResponse),
        (status = 403, description = "Apenas administradores", body = ErrorResponse)
    )
)]
pub async fn criar_item(
    cardapio_service: web::Data<CardapioService>,
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
    request: web::Json<CriarItemRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id(&req).unwrap_or(0);
    if let Err(e) = auth_service.require_admin(user_id).await {
        return Ok(e.error_response());
    }

    match cardapio_service.criar_item(request.into_inner()).await {
        Ok(item) => Ok(HttpResponse::Created().json(json!({
            "message": "Item criado com sucesso",
            "item": item
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/cardapio/{id}",
    tag = "cardapio",
    params(
        ("id" = i64, Path, description = "Id do item")
    ),
    request_body = AtualizarItemRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Item atualizado com sucesso", body = ItemCardapioResponse),
        (status = 404, description = "Item não encontrado", body = ErrorResponse)
    )
)]
pub async fn atualizar_item(
    cardapio_service: web::Data<CardapioService>,
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<AtualizarItemRequest>,
) -> Result<HttpResponse> {
    let user_id = get_user_id(&req).unwrap_or(0);
    if let Err(e) = auth_service.require_admin(user_id).await {
        return Ok(e.error_response());
    }

    match cardapio_service
        .atualizar_item(path.into_inner(), request.into_inner())
        .await
    {
        Ok(item) => Ok(HttpResponse::Ok().json(json!({
            "message": "Item atualizado com sucesso",
            "item": item
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/cardapio/{id}",
    tag = "cardapio",
    params(
        ("id" = i64, Path, description = "Id do item")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Item deletado com sucesso", body = MessageResponse),
        (status = 404, description = "Item não encontrado", body = ErrorResponse)
    )
)]
pub async fn deletar_item(
    cardapio_service: web::Data<CardapioService>,
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user_id = get_user_id(&req).unwrap_or(0);
    if let Err(e) = auth_service.require_admin(user_id).await {
        return Ok(e.error_response());
    }

    match cardapio_service.deletar_item(path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn cardapio_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cardapio")
            .route("", web::get().to(listar_itens))
            .route("", web::post().to(criar_item))
            .route("/categorias", web::get().to(listar_categorias))
            .route("/{id}", web::get().to(obter_item))
            .route("/{id}", web::put().to(atualizar_item))
            .route("/{id}", web::delete().to(deletar_item)),
    );
}
