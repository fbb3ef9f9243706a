use crate::entities::{cardapio_entity as cardapio, categoria_entity as categorias};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

#[derive(Clone)]
pub struct CardapioService {
    pool: DatabaseConnection,
}

impl CardapioService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Lista o cardápio completo (sem paginação), com a categoria embutida.
    pub async fn listar_itens(&self, query: &CardapioQuery) -> AppResult<ItensCardapioResponse> {
        let mut select = cardapio::Entity::find()
            .find_also_related(categorias::Entity)
            .order_by_asc(cardapio::Column::Nome);

        if let Some(categoria_id) = query.categoria_id {
            select = select.filter(cardapio::Column::CategoriaId.eq(categoria_id));
        }
        if let Some(disponivel) = query.disponivel {
            select = select.filter(cardapio::Column::Disponivel.eq(disponivel));
        }

        let rows = select.all(&self.pool).await?;
        let itens: Vec<ItemCardapioResponse> = rows
            .into_iter()
            .map(|(item, categoria)| ItemCardapioResponse::montar(item, categoria))
            .collect();

        let total = itens.len() as i64;
        Ok(ItensCardapioResponse { itens, total })
    }

    pub async fn obter_item(&self, id: i64) -> AppResult<ItemCardapioResponse> {
        let row = cardapio::Entity::find_by_id(id)
            .find_also_related(categorias::Entity)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Item não encontrado".to_string()))?;

        Ok(ItemCardapioResponse::montar(row.0, row.1))
    }

    pub async fn criar_item(&self, request: CriarItemRequest) -> AppResult<ItemCardapioResponse> {
        request.validate()?;

        let categoria = self.carregar_categoria(request.categoria_id).await?;

        // Normaliza o preço para duas casas antes de persistir
        let mut preco = request.preco;
        preco.rescale(2);

        let item = cardapio::ActiveModel {
            nome: Set(request.nome.trim().to_string()),
            descricao: Set(request.descricao.clone()),
            preco: Set(preco),
            categoria_id: Set(request.categoria_id),
            imagem_url: Set(request.imagem_url.clone()),
            disponivel: Set(true),
            tempo_preparo: Set(request.tempo_preparo.unwrap_or(30)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Item {} criado no cardápio", item.nome);
        Ok(ItemCardapioResponse::montar(item, categoria))
    }

    pub async fn atualizar_item(
        &self,
        id: i64,
        request: AtualizarItemRequest,
    ) -> AppResult<ItemCardapioResponse> {
        request.validate()?;

        let item = cardapio::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Item não encontrado".to_string()))?;

        let mut model = item.into_active_model();
        if let Some(nome) = &request.nome {
            model.nome = Set(nome.trim().to_string());
        }
        if let Some(descricao) = &request.descricao {
            model.descricao = Set(Some(descricao.clone()));
        }
        if let Some(preco) = request.preco {
            let mut preco = preco;
            preco.rescale(2);
            model.preco = Set(preco);
        }
        if let Some(categoria_id) = request.categoria_id {
            model.categoria_id = Set(Some(categoria_id));
        }
        if let Some(imagem_url) = &request.imagem_url {
            model.imagem_url = Set(Some(imagem_url.clone()));
        }
        if let Some(disponivel) = request.disponivel {
            model.disponivel = Set(disponivel);
        }
        if let Some(tempo_preparo) = request.tempo_preparo {
            model.tempo_preparo = Set(tempo_preparo);
        }
        model.updated_at = Set(Utc::now());

        let atualizado = model.update(&self.pool).await?;
        let categoria = self.carregar_categoria(atualizado.categoria_id).await?;

        Ok(ItemCardapioResponse::montar(atualizado, categoria))
    }

    pub async fn deletar_item(&self, id: i64) -> AppResult<MessageResponse> {
        let item = cardapio::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Item não encontrado".to_string()))?;

        let nome = item.nome.clone();
        item.delete(&self.pool).await?;
        log::info!("Item {nome} removido do cardápio");

        Ok(MessageResponse {
            message: "Item deletado com sucesso".to_string(),
        })
    }

    pub async fn listar_categorias(&self) -> AppResult<Vec<CategoriaResponse>> {
        let categorias = categorias::Entity::find()
            .filter(categorias::Column::Ativo.eq(true))
            .order_by_asc(categorias::Column::Nome)
            .all(&self.pool)
            .await?;

        Ok(categorias.into_iter().map(CategoriaResponse::from).collect())
    }

    async fn carregar_categoria(
        &self,
        categoria_id: Option<i64>,
    ) -> AppResult<Option<categorias::Model>> {
        let Some(categoria_id) = categoria_id else {
            return Ok(None);
        };

        let categoria = categorias::Entity::find_by_id(categoria_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::validation("Categoria não encontrada"))?;

        Ok(Some(categoria))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::str::FromStr;

    fn item_modelo(id: i64, nome: &str, preco: &str, disponivel: bool) -> cardapio::Model {
        cardapio::Model {
            id,
            nome: nome.to_string(),
            descricao: None,
            preco: Decimal::from_str(preco).unwrap(),
            categoria_id: Some(1),
            imagem_url: None,
            disponivel,
            tempo_preparo: 15,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn categoria_modelo(id: i64, nome: &str) -> categorias::Model {
        categorias::Model {
            id,
            nome: nome.to_string(),
            descricao: None,
            ativo: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_listar_itens_conta_o_resultado() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                (
                    item_modelo(1, "Pudim de Leite", "8.50", true),
                    categoria_modelo(1, "Sobremesas"),
                ),
                (
                    item_modelo(2, "X-Burger", "18.90", true),
                    categoria_modelo(2, "Lanches"),
                ),
            ]])
            .into_connection();

        let service = CardapioService::new(db);
        let response = service
            .listar_itens(&CardapioQuery {
                categoria_id: None,
                disponivel: None,
            })
            .await
            .unwrap();

        assert_eq!(response.total, 2);
        assert_eq!(response.itens.len(), 2);
        assert_eq!(response.itens[0].preco.to_string(), "8.50");
        assert_eq!(
            response.itens[0].categoria.as_ref().map(|c| c.nome.as_str()),
            Some("Sobremesas")
        );
    }

    #[tokio::test]
    async fn test_obter_item_inexistente_responde_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<(cardapio::Model, categorias::Model)>::new()])
            .into_connection();

        let service = CardapioService::new(db);
        assert!(matches!(
            service.obter_item(99).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_criar_item_com_categoria_inexistente_falha() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<categorias::Model>::new()])
            .into_connection();

        let service = CardapioService::new(db);
        let result = service
            .criar_item(CriarItemRequest {
                nome: "X-Burger".to_string(),
                descricao: None,
                preco: Decimal::from_str("18.90").unwrap(),
                categoria_id: Some(42),
                imagem_url: None,
                tempo_preparo: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
