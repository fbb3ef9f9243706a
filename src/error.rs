use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Dados inválidos")]
    ValidationError(Vec<String>),

    #[error("{0}")]
    AuthError(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Acesso negado. Apenas administradores.")]
    Forbidden,

    #[error("{0}")]
    Conflict(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Erro de validação com uma única mensagem de detalhe.
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(vec![msg.into()])
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::ValidationError(details) => {
                log::warn!("Validation error: {details:?}");
                HttpResponse::BadRequest().json(json!({
                    "error": "Dados inválidos",
                    "details": details.iter().map(|msg| json!({ "msg": msg })).collect::<Vec<_>>()
                }))
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                HttpResponse::Unauthorized().json(json!({ "error": msg }))
            }
            AppError::JwtError(err) => {
                log::warn!("JWT error: {err}");
                HttpResponse::Unauthorized().json(json!({ "error": "Token inválido" }))
            }
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({ "error": msg })),
            AppError::Forbidden => {
                log::warn!("Forbidden access");
                HttpResponse::Forbidden().json(json!({
                    "error": "Acesso negado. Apenas administradores."
                }))
            }
            AppError::Conflict(msg) => {
                log::warn!("Conflict: {msg}");
                HttpResponse::Conflict().json(json!({ "error": msg }))
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                HttpResponse::InternalServerError().json(json!({
                    "error": "Erro interno do servidor"
                }))
            }
            _ => {
                log::error!("Internal error: {self}");
                HttpResponse::InternalServerError().json(json!({
                    "error": "Erro interno do servidor"
                }))
            }
        }
    }
}
