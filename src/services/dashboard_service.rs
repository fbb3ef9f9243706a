use crate::entities::{
    cardapio_entity as cardapio, item_pedido_entity as itens_pedido, pedido_entity as pedidos,
};
use crate::error::AppResult;
use crate::models::*;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, JoinType, Order};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};

use super::pedido_service::parse_data;

#[derive(Clone)]
pub struct DashboardService {
    pool: DatabaseConnection,
}

impl DashboardService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Estatísticas gerais do dia (UTC) e contagem de pedidos por status.
    pub async fn stats(&self) -> AppResult<StatsResponse> {
        let inicio_hoje = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
        let fim_hoje = inicio_hoje + Duration::days(1);

        let pedidos_hoje = pedidos::Entity::find()
            .filter(pedidos::Column::CreatedAt.gte(inicio_hoje))
            .filter(pedidos::Column::CreatedAt.lt(fim_hoje))
            .count(&self.pool)
            .await? as i64;

        #[derive(Debug, sea_orm::FromQueryResult)]
        struct FaturamentoRow {
            faturamento: Option<Decimal>,
        }
        let faturamento_hoje = pedidos::Entity::find()
            .select_only()
            .column_as(Expr::col(pedidos::Column::Total).sum(), "faturamento")
            .filter(pedidos::Column::CreatedAt.gte(inicio_hoje))
            .filter(pedidos::Column::CreatedAt.lt(fim_hoje))
            .filter(pedidos::Column::Status.ne(StatusPedido::Cancelado))
            .into_model::<FaturamentoRow>()
            .one(&self.pool)
            .await?
            .and_then(|r| r.faturamento)
            .unwrap_or(Decimal::ZERO);

        let pedidos_pendentes = pedidos::Entity::find()
            .filter(
                pedidos::Column::Status
                    .is_in([StatusPedido::Recebido, StatusPedido::Preparando]),
            )
            .count(&self.pool)
            .await? as i64;

        let total_itens_cardapio = cardapio::Entity::find()
            .filter(cardapio::Column::Disponivel.eq(true))
            .count(&self.pool)
            .await? as i64;

        #[derive(Debug, sea_orm::FromQueryResult)]
        struct StatusRow {
            status: StatusPedido,
            quantidade: i64,
        }
        let pedidos_por_status = pedidos::Entity::find()
            .select_only()
            .column(pedidos::Column::Status)
            .column_as(Expr::val(1).count(), "quantidade")
            .group_by(pedidos::Column::Status)
            .into_model::<StatusRow>()
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|row| StatusQuantidade {
                status: row.status,
                quantidade: row.quantidade,
            })
            .collect();

        Ok(StatsResponse {
            pedidos_hoje,
            faturamento_hoje: format!("{faturamento_hoje:.2}"),
            pedidos_pendentes,
            total_itens_cardapio,
            pedidos_por_status,
        })
    }

    /// Relatório de vendas: faturamento por dia e os 10 itens mais vendidos,
    /// sempre excluindo pedidos cancelados. O intervalo de datas é opcional e
    /// inclui os dois extremos.
    pub async fn vendas(&self, query: &VendasQuery) -> AppResult<VendasResponse> {
        let periodo = self.parse_periodo(query)?;

        #[derive(Debug, sea_orm::FromQueryResult)]
        struct VendaDiaRow {
            data: NaiveDate,
            faturamento: Option<Decimal>,
            pedidos: i64,
        }

        let mut vendas_select = pedidos::Entity::find()
            .select_only()
            .column_as(Expr::cust("DATE(created_at)"), "data")
            .column_as(Expr::col(pedidos::Column::Total).sum(), "faturamento")
            .column_as(Expr::val(1).count(), "pedidos")
            .filter(pedidos::Column::Status.ne(StatusPedido::Cancelado))
            .group_by(Expr::cust("DATE(created_at)"))
            .order_by(Expr::cust("DATE(created_at)"), Order::Desc);

        if let Some((inicio, fim)) = periodo {
            vendas_select = vendas_select
                .filter(pedidos::Column::CreatedAt.gte(inicio))
                .filter(pedidos::Column::CreatedAt.lt(fim));
        }

        let vendas_por_dia = vendas_select
            .into_model::<VendaDiaRow>()
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|row| VendaPorDia {
                data: row.data,
                faturamento: format!("{:.2}", row.faturamento.unwrap_or(Decimal::ZERO)),
                pedidos: row.pedidos,
            })
            .collect();

        #[derive(Debug, sea_orm::FromQueryResult)]
        struct ProdutoRow {
            produto: String,
            total_vendido: i64,
            faturamento: Option<Decimal>,
        }

        let mut produtos_select = itens_pedido::Entity::find()
            .select_only()
            .column_as(
                Expr::col((cardapio::Entity, cardapio::Column::Nome)),
                "produto",
            )
            .column_as(
                Expr::col(itens_pedido::Column::Quantidade).sum(),
                "total_vendido",
            )
            .column_as(
                Expr::cust("SUM(itens_pedido.quantidade * itens_pedido.preco_unitario)"),
                "faturamento",
            )
            .join(JoinType::InnerJoin, itens_pedido::Relation::Cardapio.def())
            .join(JoinType::InnerJoin, itens_pedido::Relation::Pedido.def())
            .filter(pedidos::Column::Status.ne(StatusPedido::Cancelado))
            .group_by(itens_pedido::Column::CardapioId)
            .group_by(Expr::col((cardapio::Entity, cardapio::Column::Nome)))
            .order_by(Expr::cust("SUM(itens_pedido.quantidade)"), Order::Desc)
            .limit(10);

        if let Some((inicio, fim)) = periodo {
            produtos_select = produtos_select
                .filter(pedidos::Column::CreatedAt.gte(inicio))
                .filter(pedidos::Column::CreatedAt.lt(fim));
        }

        let produtos_mais_vendidos = produtos_select
            .into_model::<ProdutoRow>()
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|row| ProdutoMaisVendido {
                produto: row.produto,
                total_vendido: row.total_vendido,
                faturamento: format!("{:.2}", row.faturamento.unwrap_or(Decimal::ZERO)),
            })
            .collect();

        Ok(VendasResponse {
            vendas_por_dia,
            produtos_mais_vendidos,
        })
    }

    fn parse_periodo(
        &self,
        query: &VendasQuery,
    ) -> AppResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        let (Some(data_inicio), Some(data_fim)) = (&query.data_inicio, &query.data_fim) else {
            return Ok(None);
        };

        let inicio = parse_data(data_inicio)?.and_time(NaiveTime::MIN).and_utc();
        let fim = (parse_data(data_fim)? + Duration::days(1))
            .and_time(NaiveTime::MIN)
            .and_utc();

        Ok(Some((inicio, fim)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_vendas_com_data_invalida_falha() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = DashboardService::new(db);
        let result = service
            .vendas(&VendasQuery {
                data_inicio: Some("15/01/2025".to_string()),
                data_fim: Some("2025-01-31".to_string()),
            })
            .await;

        assert!(matches!(
            result,
            Err(crate::error::AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_vendas_ignora_intervalo_incompleto() {
        // Só data_inicio: o filtro de período não é aplicado (nenhum erro)
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<pedidos::Model>::new()])
            .append_query_results([Vec::<pedidos::Model>::new()])
            .into_connection();

        let service = DashboardService::new(db);
        let response = service
            .vendas(&VendasQuery {
                data_inicio: Some("2025-01-15".to_string()),
                data_fim: None,
            })
            .await
            .unwrap();

        assert!(response.vendas_por_dia.is_empty());
        assert!(response.produtos_mais_vendidos.is_empty());
    }
}
