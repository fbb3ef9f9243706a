use crate::models::StatusPedido;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusQuantidade {
    pub status: StatusPedido,
    pub quantidade: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub pedidos_hoje: i64,
    /// Faturamento do dia com duas casas, pedidos cancelados excluídos
    #[schema(example = "450.50")]
    pub faturamento_hoje: String,
    /// Pedidos em recebido ou preparando
    pub pedidos_pendentes: i64,
    pub total_itens_cardapio: i64,
    pub pedidos_por_status: Vec<StatusQuantidade>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VendasQuery {
    /// YYYY-MM-DD
    pub data_inicio: Option<String>,
    /// YYYY-MM-DD
    pub data_fim: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VendaPorDia {
    pub data: NaiveDate,
    #[schema(example = "450.50")]
    pub faturamento: String,
    pub pedidos: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProdutoMaisVendido {
    pub produto: String,
    pub total_vendido: i64,
    #[schema(example = "472.50")]
    pub faturamento: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VendasResponse {
    pub vendas_por_dia: Vec<VendaPorDia>,
    pub produtos_mais_vendidos: Vec<ProdutoMaisVendido>,
}
