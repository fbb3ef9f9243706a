use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::auth::register,
        handlers::auth::me,
        handlers::cardapio::listar_itens,
        handlers::cardapio::listar_categorias,
        handlers::cardapio::obter_item,
        handlers::cardapio::criar_item,
        handlers::cardapio::atualizar_item,
        handlers::cardapio::deletar_item,
        handlers::pedidos::criar_pedido,
        handlers::pedidos::listar_pedidos,
        handlers::pedidos::obter_pedido,
        handlers::pedidos::atualizar_status,
        handlers::dashboard::stats,
        handlers::dashboard::vendas,
        handlers::health::health,
    ),
    components(
        schemas(
            LoginRequest,
            RegisterRequest,
            UsuarioResponse,
            AuthResponse,
            TipoUsuario,
            CriarItemRequest,
            AtualizarItemRequest,
            CategoriaResponse,
            CategoriaResumo,
            ItemCardapioResponse,
            ItensCardapioResponse,
            CriarPedidoRequest,
            ItemPedidoRequest,
            ItemPedidoResponse,
            ProdutoResumo,
            PedidoResponse,
            ListaPedidosResponse,
            AtualizarStatusRequest,
            StatusPedidoResumo,
            StatusPedido,
            TipoEntrega,
            StatsResponse,
            StatusQuantidade,
            VendaPorDia,
            ProdutoMaisVendido,
            VendasResponse,
            Paginacao,
            ErrorResponse,
            ErrorDetail,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Autenticação e registro"),
        (name = "cardapio", description = "Categorias e itens do cardápio"),
        (name = "pedidos", description = "Criação e acompanhamento de pedidos"),
        (name = "dashboard", description = "Estatísticas e relatório de vendas"),
        (name = "health", description = "Liveness"),
    ),
    info(
        title = "Cardápio Backend API",
        version = "1.0.0",
        description = "API REST do sistema de cardápio e pedidos"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
