use crate::error::AppError;
use crate::utils::JwtService;
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

// Rotas públicas; tudo que não casar aqui exige bearer token.
// O método faz parte da regra: GET /api/cardapio é público, POST não é.
struct PublicRoutes {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
    get_exact: Vec<&'static str>,
    get_prefixes: Vec<&'static str>,
    post_exact: Vec<&'static str>,
}

impl PublicRoutes {
    fn new() -> Self {
        Self {
            // Qualquer método
            exact_paths: vec![
                "/",
                "/api/health",
                "/swagger-ui",
                "/swagger-ui/",
                "/api-docs/openapi.json",
            ],
            prefix_paths: vec!["/swagger-ui/", "/api-docs/"],
            // Consulta do cardápio e acompanhamento de pedido são abertos
            get_exact: vec!["/api/cardapio", "/api/cardapio/categorias"],
            get_prefixes: vec!["/api/cardapio/", "/api/pedidos/"],
            // Login, registro e criação de pedido pelo cliente
            post_exact: vec!["/api/auth/login", "/api/auth/register", "/api/pedidos"],
        }
    }

    fn is_public(&self, method: &Method, path: &str) -> bool {
        if self.exact_paths.contains(&path) {
            return true;
        }
        if self.prefix_paths.iter().any(|&prefix| path.starts_with(prefix)) {
            return true;
        }

        if *method == Method::GET {
            self.get_exact.contains(&path)
                || self.get_prefixes.iter().any(|&prefix| path.starts_with(prefix))
        } else if *method == Method::POST {
            self.post_exact.contains(&path)
        } else {
            false
        }
    }
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            public_routes: PublicRoutes::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    public_routes: PublicRoutes,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Preflights de CORS passam direto
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        if self.public_routes.is_public(req.method(), req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let auth_header = req.headers().get("Authorization");

        let token = if let Some(auth_value) = auth_header {
            if let Ok(auth_str) = auth_value.to_str() {
                auth_str.strip_prefix("Bearer ")
            } else {
                None
            }
        } else {
            None
        };

        if let Some(token) = token {
            match self.jwt_service.verify_token(token) {
                Ok(claims) => {
                    // id do usuário fica disponível para os handlers
                    req.extensions_mut()
                        .insert(claims.sub.parse::<i64>().unwrap_or(0));
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                Err(_) => {
                    let error = AppError::AuthError("Token inválido".to_string());
                    Box::pin(async move { Err(error.into()) })
                }
            }
        } else {
            let error = AppError::AuthError("Token de acesso requerido".to_string());
            Box::pin(async move { Err(error.into()) })
        }
    }
}

/// Lê o id de usuário colocado nas extensões pelo middleware.
pub fn get_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
    req.extensions().get::<i64>().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotas_de_consulta_sao_publicas() {
        let routes = PublicRoutes::new();
        assert!(routes.is_public(&Method::GET, "/api/cardapio"));
        assert!(routes.is_public(&Method::GET, "/api/cardapio/categorias"));
        assert!(routes.is_public(&Method::GET, "/api/cardapio/7"));
        assert!(routes.is_public(&Method::GET, "/api/pedidos/15"));
        assert!(routes.is_public(&Method::GET, "/api/health"));
        assert!(routes.is_public(&Method::GET, "/"));
    }

    #[test]
    fn test_auth_e_criacao_de_pedido_sao_publicos() {
        let routes = PublicRoutes::new();
        assert!(routes.is_public(&Method::POST, "/api/auth/login"));
        assert!(routes.is_public(&Method::POST, "/api/auth/register"));
        assert!(routes.is_public(&Method::POST, "/api/pedidos"));
    }

    #[test]
    fn test_rotas_administrativas_exigem_token() {
        let routes = PublicRoutes::new();
        assert!(!routes.is_public(&Method::GET, "/api/pedidos"));
        assert!(!routes.is_public(&Method::PUT, "/api/pedidos/15/status"));
        assert!(!routes.is_public(&Method::POST, "/api/cardapio"));
        assert!(!routes.is_public(&Method::PUT, "/api/cardapio/7"));
        assert!(!routes.is_public(&Method::DELETE, "/api/cardapio/7"));
        assert!(!routes.is_public(&Method::GET, "/api/dashboard/stats"));
        assert!(!routes.is_public(&Method::GET, "/api/dashboard/vendas"));
        assert!(!routes.is_public(&Method::GET, "/api/auth/me"));
    }

    #[test]
    fn test_swagger_e_publico() {
        let routes = PublicRoutes::new();
        assert!(routes.is_public(&Method::GET, "/swagger-ui/index.html"));
        assert!(routes.is_public(&Method::GET, "/api-docs/openapi.json"));
    }
}
