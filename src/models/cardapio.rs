use crate::entities::{cardapio_entity, categoria_entity};
use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CardapioQuery {
    pub categoria_id: Option<i64>,
    pub disponivel: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CriarItemRequest {
    #[schema(example = "X-Burger Clássico")]
    pub nome: String,
    pub descricao: Option<String>,
    #[schema(value_type = f64, example = 18.90)]
    pub preco: Decimal,
    pub categoria_id: Option<i64>,
    pub imagem_url: Option<String>,
    /// Minutos; padrão 30
    pub tempo_preparo: Option<i32>,
}

impl CriarItemRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut details = Vec::new();

        let nome = self.nome.trim();
        if nome.len() < 2 || nome.len() > 255 {
            details.push("Nome deve ter entre 2 e 255 caracteres".to_string());
        }
        if self.preco.is_sign_negative() {
            details.push("Preço deve ser um valor decimal válido".to_string());
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(details))
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AtualizarItemRequest {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub preco: Option<Decimal>,
    pub categoria_id: Option<i64>,
    pub imagem_url: Option<String>,
    pub disponivel: Option<bool>,
    pub tempo_preparo: Option<i32>,
}

impl AtualizarItemRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut details = Vec::new();

        if let Some(nome) = &self.nome {
            let nome = nome.trim();
            if nome.len() < 2 || nome.len() > 255 {
                details.push("Nome deve ter entre 2 e 255 caracteres".to_string());
            }
        }
        if let Some(preco) = &self.preco
            && preco.is_sign_negative()
        {
            details.push("Preço deve ser um valor decimal válido".to_string());
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(details))
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoriaResumo {
    pub id: i64,
    pub nome: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoriaResponse {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<categoria_entity::Model> for CategoriaResponse {
    fn from(categoria: categoria_entity::Model) -> Self {
        Self {
            id: categoria.id,
            nome: categoria.nome,
            descricao: categoria.descricao,
            ativo: categoria.ativo,
            created_at: categoria.created_at,
            updated_at: categoria.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemCardapioResponse {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    #[schema(value_type = String, example = "18.90")]
    pub preco: Decimal,
    pub categoria_id: Option<i64>,
    pub imagem_url: Option<String>,
    pub disponivel: bool,
    pub tempo_preparo: i32,
    pub categoria: Option<CategoriaResumo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemCardapioResponse {
    pub fn montar(
        item: cardapio_entity::Model,
        categoria: Option<categoria_entity::Model>,
    ) -> Self {
        Self {
            id: item.id,
            nome: item.nome,
            descricao: item.descricao,
            preco: item.preco,
            categoria_id: item.categoria_id,
            imagem_url: item.imagem_url,
            disponivel: item.disponivel,
            tempo_preparo: item.tempo_preparo,
            categoria: categoria.map(|c| CategoriaResumo {
                id: c.id,
                nome: c.nome,
            }),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItensCardapioResponse {
    pub itens: Vec<ItemCardapioResponse>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_criar_item_valido() {
        let request = CriarItemRequest {
            nome: "X-Burger".to_string(),
            descricao: None,
            preco: Decimal::from_str("18.90").unwrap(),
            categoria_id: Some(1),
            imagem_url: None,
            tempo_preparo: Some(15),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_criar_item_preco_negativo() {
        let request = CriarItemRequest {
            nome: "X-Burger".to_string(),
            descricao: None,
            preco: Decimal::from_str("-1.00").unwrap(),
            categoria_id: None,
            imagem_url: None,
            tempo_preparo: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_atualizar_item_sem_campos_passa() {
        let request = AtualizarItemRequest {
            nome: None,
            descricao: None,
            preco: None,
            categoria_id: None,
            imagem_url: None,
            disponivel: None,
            tempo_preparo: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_atualizar_item_nome_curto() {
        let request = AtualizarItemRequest {
            nome: Some("x".to_string()),
            descricao: None,
            preco: None,
            categoria_id: None,
            imagem_url: None,
            disponivel: None,
            tempo_preparo: None,
        };
        assert!(request.validate().is_err());
    }
}
