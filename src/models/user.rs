use crate::entities::usuario_entity;
use crate::error::{AppError, AppResult};
use crate::utils::is_valid_email;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(10))")]
#[serde(rename_all = "lowercase")]
pub enum TipoUsuario {
    #[sea_orm(string_value = "cliente")]
    Cliente,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl std::fmt::Display for TipoUsuario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TipoUsuario::Cliente => write!(f, "cliente"),
            TipoUsuario::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin@cardapio.com")]
    pub email: String,
    #[schema(example = "admin123")]
    pub senha: String,
}

impl LoginRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut details = Vec::new();

        if !is_valid_email(&self.email) {
            details.push("Email inválido".to_string());
        }
        if self.senha.len() < 6 {
            details.push("Senha deve ter pelo menos 6 caracteres".to_string());
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(details))
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "João Silva")]
    pub nome: String,
    #[schema(example = "joao@cardapio.com")]
    pub email: String,
    #[schema(example = "segredo1")]
    pub senha: String,
    #[schema(example = "(11) 99999-9999")]
    pub telefone: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut details = Vec::new();

        let nome = self.nome.trim();
        if nome.len() < 2 || nome.len() > 255 {
            details.push("Nome deve ter entre 2 e 255 caracteres".to_string());
        }
        if !is_valid_email(&self.email) {
            details.push("Email inválido".to_string());
        }
        if self.senha.len() < 6 || self.senha.len() > 255 {
            details.push("Senha deve ter pelo menos 6 caracteres".to_string());
        }
        if let Some(telefone) = &self.telefone
            && (telefone.len() < 8 || telefone.len() > 20)
        {
            details.push("Telefone inválido".to_string());
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(details))
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsuarioResponse {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub tipo: TipoUsuario,
    pub telefone: Option<String>,
}

impl From<usuario_entity::Model> for UsuarioResponse {
    fn from(usuario: usuario_entity::Model) -> Self {
        Self {
            id: usuario.id,
            nome: usuario.nome,
            email: usuario.email,
            tipo: usuario.tipo,
            telefone: usuario.telefone,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub usuario: UsuarioResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_acumula_erros() {
        let request = LoginRequest {
            email: "sem-arroba".to_string(),
            senha: "123".to_string(),
        };

        match request.validate() {
            Err(AppError::ValidationError(details)) => {
                assert_eq!(details.len(), 2);
            }
            other => panic!("esperava erro de validação, obteve {other:?}"),
        }
    }

    #[test]
    fn test_register_request_valido() {
        let request = RegisterRequest {
            nome: "João Silva".to_string(),
            email: "joao@teste.com".to_string(),
            senha: "123456".to_string(),
            telefone: Some("11999999999".to_string()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_telefone_curto() {
        let request = RegisterRequest {
            nome: "João Silva".to_string(),
            email: "joao@teste.com".to_string(),
            senha: "123456".to_string(),
            telefone: Some("123".to_string()),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_tipo_usuario_serializa_em_minusculas() {
        assert_eq!(
            serde_json::to_string(&TipoUsuario::Admin).unwrap(),
            "\"admin\""
        );
        assert_eq!(TipoUsuario::Cliente.to_string(), "cliente");
    }
}
