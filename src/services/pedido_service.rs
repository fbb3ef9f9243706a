use crate::entities::{
    cardapio_entity as cardapio, item_pedido_entity as itens_pedido, pedido_entity as pedidos,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::gerar_numero_pedido;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct PedidoService {
    pool: DatabaseConnection,
}

/// Subtotal de uma linha do pedido; o preço já vem com duas casas do banco.
fn calcular_subtotal(preco_unitario: Decimal, quantidade: i32) -> Decimal {
    preco_unitario * Decimal::from(quantidade)
}

impl PedidoService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Cria o pedido: valida a requisição, resolve cada item do cardápio com
    /// o preço vigente e grava pedido + itens numa única transação. Qualquer
    /// falha antes do commit não deixa estado parcial.
    ///
    /// A disponibilidade é conferida antes da transação e não é reverificada
    /// dentro dela: um item desativado entre a leitura e o insert ainda entra
    /// no pedido.
    pub async fn criar_pedido(&self, request: CriarPedidoRequest) -> AppResult<PedidoResponse> {
        let tipo_entrega = request.validate()?;

        let mut total = Decimal::ZERO;
        let mut itens_validados: Vec<(cardapio::Model, &ItemPedidoRequest)> = Vec::new();

        for item in &request.itens {
            let produto = cardapio::Entity::find_by_id(item.cardapio_id)
                .one(&self.pool)
                .await?
                .ok_or_else(|| {
                    AppError::validation(format!("Produto ID {} não existe", item.cardapio_id))
                })?;

            if !produto.disponivel {
                return Err(AppError::validation(format!(
                    "Produto {} não está disponível",
                    produto.nome
                )));
            }

            total += calcular_subtotal(produto.preco, item.quantidade);
            itens_validados.push((produto, item));
        }

        let endereco_entrega = match tipo_entrega {
            TipoEntrega::Delivery => request
                .endereco_entrega
                .as_deref()
                .map(|e| e.trim().to_string()),
            _ => None,
        };

        let txn = self.pool.begin().await?;

        let pedido = pedidos::ActiveModel {
            numero_pedido: Set(gerar_numero_pedido()),
            cliente_nome: Set(request.cliente_nome.trim().to_string()),
            cliente_telefone: Set(request.cliente_telefone.clone()),
            cliente_email: Set(request.cliente_email.clone()),
            status: Set(StatusPedido::Recebido),
            total: Set(total),
            observacoes: Set(request.observacoes.clone()),
            tipo_entrega: Set(tipo_entrega),
            endereco_entrega: Set(endereco_entrega),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut itens_response = Vec::with_capacity(itens_validados.len());
        for (produto, item) in itens_validados {
            let linha = itens_pedido::ActiveModel {
                pedido_id: Set(pedido.id),
                cardapio_id: Set(produto.id),
                quantidade: Set(item.quantidade),
                preco_unitario: Set(produto.preco),
                observacoes: Set(item.observacoes.clone()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            itens_response.push(ItemPedidoResponse::montar(linha, Some(&produto)));
        }

        txn.commit().await?;

        log::info!(
            "Pedido {} criado: {} itens, total {}",
            pedido.numero_pedido,
            itens_response.len(),
            pedido.total
        );

        Ok(PedidoResponse::montar(pedido, itens_response))
    }

    pub async fn listar_pedidos(
        &self,
        query: &ListarPedidosQuery,
    ) -> AppResult<ListaPedidosResponse> {
        let params = PaginationParams::new(query.page, query.limit);

        let mut select = pedidos::Entity::find();

        if let Some(status) = &query.status
            && status != "todos"
        {
            let status = StatusPedido::parse(status)
                .ok_or_else(|| AppError::validation("Status inválido"))?;
            select = select.filter(pedidos::Column::Status.eq(status));
        }

        if let (Some(data_inicio), Some(data_fim)) = (&query.data_inicio, &query.data_fim) {
            let inicio = parse_data(data_inicio)?;
            let fim = parse_data(data_fim)?;
            select = select
                .filter(pedidos::Column::CreatedAt.gte(inicio.and_time(NaiveTime::MIN).and_utc()))
                .filter(
                    pedidos::Column::CreatedAt
                        .lt((fim + Duration::days(1)).and_time(NaiveTime::MIN).and_utc()),
                );
        }

        let total = select.clone().count(&self.pool).await? as i64;

        let page_models = select
            .order_by_desc(pedidos::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let ids: Vec<i64> = page_models.iter().map(|p| p.id).collect();
        let mut itens_por_pedido = self.carregar_itens(ids).await?;

        let lista: Vec<PedidoResponse> = page_models
            .into_iter()
            .map(|pedido| {
                let itens = itens_por_pedido.remove(&pedido.id).unwrap_or_default();
                PedidoResponse::montar(pedido, itens)
            })
            .collect();

        Ok(ListaPedidosResponse {
            pedidos: lista,
            pagination: Paginacao::new(total, params.get_page(), params.get_limit()),
        })
    }

    pub async fn obter_pedido(&self, id: i64) -> AppResult<PedidoResponse> {
        let pedido = pedidos::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Pedido não encontrado".to_string()))?;

        let mut itens_por_pedido = self.carregar_itens(vec![pedido.id]).await?;
        let itens = itens_por_pedido.remove(&pedido.id).unwrap_or_default();

        Ok(PedidoResponse::montar(pedido, itens))
    }

    /// Troca o status para qualquer valor do conjunto fixo, sem grafo de
    /// transições: "cancelado" depois de "entregue" é aceito.
    pub async fn atualizar_status(
        &self,
        id: i64,
        request: &AtualizarStatusRequest,
    ) -> AppResult<StatusPedidoResumo> {
        let status = StatusPedido::parse(&request.status)
            .ok_or_else(|| AppError::validation("Status inválido"))?;

        let pedido = pedidos::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Pedido não encontrado".to_string()))?;

        let mut model = pedido.into_active_model();
        model.status = Set(status);
        model.updated_at = Set(Utc::now());
        let atualizado = model.update(&self.pool).await?;

        log::info!(
            "Pedido {} atualizado para {}",
            atualizado.numero_pedido,
            atualizado.status
        );

        Ok(StatusPedidoResumo {
            id: atualizado.id,
            numero_pedido: atualizado.numero_pedido,
            status: atualizado.status,
        })
    }

    async fn carregar_itens(
        &self,
        pedido_ids: Vec<i64>,
    ) -> AppResult<HashMap<i64, Vec<ItemPedidoResponse>>> {
        if pedido_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = itens_pedido::Entity::find()
            .filter(itens_pedido::Column::PedidoId.is_in(pedido_ids))
            .find_also_related(cardapio::Entity)
            .all(&self.pool)
            .await?;

        let mut mapa: HashMap<i64, Vec<ItemPedidoResponse>> = HashMap::new();
        for (item, produto) in rows {
            mapa.entry(item.pedido_id)
                .or_default()
                .push(ItemPedidoResponse::montar(item, produto.as_ref()));
        }
        Ok(mapa)
    }
}

pub(crate) fn parse_data(valor: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(valor, "%Y-%m-%d")
        .map_err(|_| AppError::validation("Datas devem estar no formato YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::str::FromStr;

    fn produto_modelo(id: i64, nome: &str, preco: &str, disponivel: bool) -> cardapio::Model {
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

    fn pedido_modelo(id: i64, total: &str) -> pedidos::Model {
        pedidos::Model {
            id,
            numero_pedido: "PED123456789".to_string(),
            cliente_nome: "João Silva".to_string(),
            cliente_telefone: None,
            cliente_email: None,
            status: StatusPedido::Recebido,
            total: Decimal::from_str(total).unwrap(),
            observacoes: None,
            tipo_entrega: TipoEntrega::Balcao,
            endereco_entrega: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn item_pedido_modelo(id: i64, pedido_id: i64, cardapio_id: i64) -> itens_pedido::Model {
        itens_pedido::Model {
            id,
            pedido_id,
            cardapio_id,
            quantidade: 2,
            preco_unitario: Decimal::from_str("18.90").unwrap(),
            observacoes: None,
            created_at: Utc::now(),
        }
    }

    fn pedido_base() -> CriarPedidoRequest {
        CriarPedidoRequest {
            cliente_nome: "João Silva".to_string(),
            cliente_telefone: None,
            cliente_email: None,
            observacoes: None,
            tipo_entrega: "balcao".to_string(),
            endereco_entrega: None,
            itens: vec![ItemPedidoRequest {
                cardapio_id: 1,
                quantidade: 2,
                observacoes: None,
            }],
        }
    }

    #[test]
    fn test_subtotal_mantem_duas_casas() {
        let subtotal = calcular_subtotal(Decimal::from_str("18.90").unwrap(), 2);
        assert_eq!(subtotal.to_string(), "37.80");

        let tres = calcular_subtotal(Decimal::from_str("5.00").unwrap(), 3);
        assert_eq!(tres.to_string(), "15.00");
    }

    #[tokio::test]
    async fn test_criar_pedido_persiste_pedido_e_itens() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![produto_modelo(1, "X-Burger", "18.90", true)]])
            .append_query_results([vec![pedido_modelo(10, "37.80")]])
            .append_query_results([vec![item_pedido_modelo(100, 10, 1)]])
            .into_connection();

        let service = PedidoService::new(db);
        let response = service.criar_pedido(pedido_base()).await.unwrap();

        assert_eq!(response.status, StatusPedido::Recebido);
        assert_eq!(response.total.to_string(), "37.80");
        assert_eq!(response.itens.len(), 1);
        assert_eq!(response.itens[0].quantidade, 2);
        assert_eq!(response.itens[0].preco_unitario.to_string(), "18.90");
        assert_eq!(
            response.itens[0].produto.as_ref().map(|p| p.nome.as_str()),
            Some("X-Burger")
        );
    }

    #[tokio::test]
    async fn test_produto_inexistente_identifica_o_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<cardapio::Model>::new()])
            .into_connection();

        let service = PedidoService::new(db);
        let mut request = pedido_base();
        request.itens[0].cardapio_id = 9999;

        match service.criar_pedido(request).await {
            Err(AppError::ValidationError(details)) => {
                assert!(details.iter().any(|msg| msg.contains("9999")));
            }
            other => panic!("esperava erro de validação, obteve {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_produto_indisponivel_nao_abre_transacao() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![produto_modelo(1, "X-Burger", "18.90", false)]])
            .into_connection();

        let service = PedidoService::new(db.clone());
        match service.criar_pedido(pedido_base()).await {
            Err(AppError::ValidationError(details)) => {
                assert!(details.iter().any(|msg| msg.contains("X-Burger")));
            }
            other => panic!("esperava erro de validação, obteve {other:?}"),
        }
        drop(service);

        // Só a consulta do produto chegou ao banco
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_validacao_falha_antes_de_qualquer_consulta() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = PedidoService::new(db.clone());
        let mut request = pedido_base();
        request.tipo_entrega = "delivery".to_string();
        request.endereco_entrega = None;

        assert!(matches!(
            service.criar_pedido(request).await,
            Err(AppError::ValidationError(_))
        ));
        drop(service);
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn test_atualizar_status_invalido_falha_sem_consultar() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = PedidoService::new(db);
        let result = service
            .atualizar_status(
                1,
                &AtualizarStatusRequest {
                    status: "em_orbita".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_atualizar_status_de_pedido_inexistente_responde_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<pedidos::Model>::new()])
            .into_connection();

        let service = PedidoService::new(db);
        let result = service
            .atualizar_status(
                999,
                &AtualizarStatusRequest {
                    status: "preparando".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_atualizar_status_aceita_qualquer_valor_do_conjunto() {
        // "cancelado" sobre um pedido já entregue é aceito: não há grafo de
        // transições, só pertencimento ao conjunto.
        let mut entregue = pedido_modelo(1, "37.80");
        entregue.status = StatusPedido::Entregue;
        let mut cancelado = pedido_modelo(1, "37.80");
        cancelado.status = StatusPedido::Cancelado;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![entregue]])
            .append_query_results([vec![cancelado]])
            .into_connection();

        let service = PedidoService::new(db);
        let resumo = service
            .atualizar_status(
                1,
                &AtualizarStatusRequest {
                    status: "cancelado".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(resumo.status, StatusPedido::Cancelado);
    }
}
