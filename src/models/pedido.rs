use crate::entities::{cardapio_entity, item_pedido_entity, pedido_entity};
use crate::error::{AppError, AppResult};
use crate::models::Paginacao;
use crate::utils::is_valid_email;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "lowercase")]
pub enum StatusPedido {
    #[sea_orm(string_value = "recebido")]
    Recebido,
    #[sea_orm(string_value = "preparando")]
    Preparando,
    #[sea_orm(string_value = "pronto")]
    Pronto,
    #[sea_orm(string_value = "entregue")]
    Entregue,
    #[sea_orm(string_value = "cancelado")]
    Cancelado,
}

impl StatusPedido {
    /// Aceita qualquer valor do conjunto fixo; não há validação de transição
    /// entre estados.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "recebido" => Some(StatusPedido::Recebido),
            "preparando" => Some(StatusPedido::Preparando),
            "pronto" => Some(StatusPedido::Pronto),
            "entregue" => Some(StatusPedido::Entregue),
            "cancelado" => Some(StatusPedido::Cancelado),
            _ => None,
        }
    }
}

impl std::fmt::Display for StatusPedido {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusPedido::Recebido => write!(f, "recebido"),
            StatusPedido::Preparando => write!(f, "preparando"),
            StatusPedido::Pronto => write!(f, "pronto"),
            StatusPedido::Entregue => write!(f, "entregue"),
            StatusPedido::Cancelado => write!(f, "cancelado"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "lowercase")]
pub enum TipoEntrega {
    #[sea_orm(string_value = "delivery")]
    Delivery,
    #[sea_orm(string_value = "retirada")]
    Retirada,
    #[sea_orm(string_value = "balcao")]
    Balcao,
}

impl TipoEntrega {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "delivery" => Some(TipoEntrega::Delivery),
            "retirada" => Some(TipoEntrega::Retirada),
            "balcao" => Some(TipoEntrega::Balcao),
            _ => None,
        }
    }
}

impl std::fmt::Display for TipoEntrega {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TipoEntrega::Delivery => write!(f, "delivery"),
            TipoEntrega::Retirada => write!(f, "retirada"),
            TipoEntrega::Balcao => write!(f, "balcao"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemPedidoRequest {
    pub cardapio_id: i64,
    pub quantidade: i32,
    pub observacoes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CriarPedidoRequest {
    #[schema(example = "João Silva")]
    pub cliente_nome: String,
    pub cliente_telefone: Option<String>,
    pub cliente_email: Option<String>,
    pub observacoes: Option<String>,
    /// delivery, retirada ou balcao
    #[schema(example = "balcao")]
    pub tipo_entrega: String,
    pub endereco_entrega: Option<String>,
    pub itens: Vec<ItemPedidoRequest>,
}

impl CriarPedidoRequest {
    /// Valida o pedido inteiro antes de qualquer consulta ao banco e devolve
    /// o tipo de entrega já interpretado. Todos os problemas encontrados são
    /// acumulados em `details`.
    pub fn validate(&self) -> AppResult<TipoEntrega> {
        let mut details = Vec::new();

        let nome = self.cliente_nome.trim();
        if nome.len() < 2 || nome.len() > 255 {
            details.push("Nome do cliente deve ter entre 2 e 255 caracteres".to_string());
        }

        if let Some(telefone) = &self.cliente_telefone
            && !telefone.is_empty()
            && (telefone.len() < 8 || telefone.len() > 20)
        {
            details.push("Telefone deve ter entre 8 e 20 caracteres".to_string());
        }

        if let Some(email) = &self.cliente_email
            && !email.is_empty()
            && !is_valid_email(email)
        {
            details.push("Email deve ter formato válido".to_string());
        }

        let tipo_entrega = TipoEntrega::parse(&self.tipo_entrega);
        if tipo_entrega.is_none() {
            details.push("Tipo de entrega deve ser: delivery, retirada ou balcao".to_string());
        }

        if tipo_entrega == Some(TipoEntrega::Delivery) {
            let endereco = self
                .endereco_entrega
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();
            if endereco.len() < 5 || endereco.len() > 500 {
                details.push(
                    "Endereço é obrigatório para delivery e deve ter entre 5 e 500 caracteres"
                        .to_string(),
                );
            }
        }

        if let Some(observacoes) = &self.observacoes
            && observacoes.len() > 500
        {
            details.push("Observações devem ter no máximo 500 caracteres".to_string());
        }

        if self.itens.is_empty() {
            details.push("Pedido deve ter pelo menos um item".to_string());
        }

        for (i, item) in self.itens.iter().enumerate() {
            if item.cardapio_id < 1 {
                details.push(format!("Item {}: ID do produto inválido", i + 1));
            }
            if item.quantidade < 1 || item.quantidade > 99 {
                details.push(format!(
                    "Item {}: Quantidade deve ser um número entre 1 e 99",
                    i + 1
                ));
            }
            if let Some(observacoes) = &item.observacoes
                && observacoes.len() > 200
            {
                details.push(format!(
                    "Item {}: Observações do item devem ter no máximo 200 caracteres",
                    i + 1
                ));
            }
        }

        match tipo_entrega {
            Some(tipo) if details.is_empty() => Ok(tipo),
            _ => Err(AppError::ValidationError(details)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProdutoResumo {
    pub id: i64,
    pub nome: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemPedidoResponse {
    pub id: i64,
    pub cardapio_id: i64,
    pub quantidade: i32,
    #[schema(value_type = String, example = "18.90")]
    pub preco_unitario: Decimal,
    pub observacoes: Option<String>,
    pub produto: Option<ProdutoResumo>,
}

impl ItemPedidoResponse {
    pub fn montar(
        item: item_pedido_entity::Model,
        produto: Option<&cardapio_entity::Model>,
    ) -> Self {
        Self {
            id: item.id,
            cardapio_id: item.cardapio_id,
            quantidade: item.quantidade,
            preco_unitario: item.preco_unitario,
            observacoes: item.observacoes,
            produto: produto.map(|p| ProdutoResumo {
                id: p.id,
                nome: p.nome.clone(),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PedidoResponse {
    pub id: i64,
    pub numero_pedido: String,
    pub cliente_nome: String,
    pub cliente_telefone: Option<String>,
    pub cliente_email: Option<String>,
    pub status: StatusPedido,
    #[schema(value_type = String, example = "37.80")]
    pub total: Decimal,
    pub observacoes: Option<String>,
    pub tipo_entrega: TipoEntrega,
    pub endereco_entrega: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub itens: Vec<ItemPedidoResponse>,
}

impl PedidoResponse {
    pub fn montar(pedido: pedido_entity::Model, itens: Vec<ItemPedidoResponse>) -> Self {
        Self {
            id: pedido.id,
            numero_pedido: pedido.numero_pedido,
            cliente_nome: pedido.cliente_nome,
            cliente_telefone: pedido.cliente_telefone,
            cliente_email: pedido.cliente_email,
            status: pedido.status,
            total: pedido.total,
            observacoes: pedido.observacoes,
            tipo_entrega: pedido.tipo_entrega,
            endereco_entrega: pedido.endereco_entrega,
            created_at: pedido.created_at,
            updated_at: pedido.updated_at,
            itens,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListaPedidosResponse {
    pub pedidos: Vec<PedidoResponse>,
    pub pagination: Paginacao,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListarPedidosQuery {
    /// Um status do conjunto fixo, ou "todos"
    pub status: Option<String>,
    /// YYYY-MM-DD
    pub data_inicio: Option<String>,
    /// YYYY-MM-DD
    pub data_fim: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AtualizarStatusRequest {
    #[schema(example = "preparando")]
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusPedidoResumo {
    pub id: i64,
    pub numero_pedido: String,
    pub status: StatusPedido,
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn detalhes(request: &CriarPedidoRequest) -> Vec<String> {
        match request.validate() {
            Err(AppError::ValidationError(details)) => details,
            other => panic!("esperava erro de validação, obteve {other:?}"),
        }
    }

    #[test]
    fn test_pedido_valido() {
        assert_eq!(pedido_base().validate().unwrap(), TipoEntrega::Balcao);
    }

    #[test]
    fn test_nome_curto_rejeitado() {
        let mut request = pedido_base();
        request.cliente_nome = " a ".to_string();
        assert!(
            detalhes(&request)
                .iter()
                .any(|msg| msg.contains("Nome do cliente"))
        );
    }

    #[test]
    fn test_tipo_entrega_invalido() {
        let mut request = pedido_base();
        request.tipo_entrega = "drone".to_string();
        assert!(
            detalhes(&request)
                .iter()
                .any(|msg| msg.contains("Tipo de entrega"))
        );
    }

    #[test]
    fn test_delivery_sem_endereco_rejeitado() {
        let mut request = pedido_base();
        request.tipo_entrega = "delivery".to_string();
        request.endereco_entrega = None;
        assert!(
            detalhes(&request)
                .iter()
                .any(|msg| msg.contains("Endereço é obrigatório"))
        );

        // Endereço em branco também não conta
        request.endereco_entrega = Some("   ".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_delivery_com_endereco_aceito() {
        let mut request = pedido_base();
        request.tipo_entrega = "delivery".to_string();
        request.endereco_entrega = Some("Rua das Flores, 123".to_string());
        assert_eq!(request.validate().unwrap(), TipoEntrega::Delivery);
    }

    #[test]
    fn test_pedido_sem_itens_rejeitado() {
        let mut request = pedido_base();
        request.itens.clear();
        assert!(
            detalhes(&request)
                .iter()
                .any(|msg| msg.contains("pelo menos um item"))
        );
    }

    #[test]
    fn test_quantidade_invalida_identifica_item() {
        let mut request = pedido_base();
        request.itens.push(ItemPedidoRequest {
            cardapio_id: 2,
            quantidade: 0,
            observacoes: None,
        });
        assert!(
            detalhes(&request)
                .iter()
                .any(|msg| msg.starts_with("Item 2:"))
        );
    }

    #[test]
    fn test_erros_sao_acumulados() {
        let request = CriarPedidoRequest {
            cliente_nome: "x".to_string(),
            cliente_telefone: None,
            cliente_email: Some("invalido".to_string()),
            observacoes: None,
            tipo_entrega: "correio".to_string(),
            endereco_entrega: None,
            itens: vec![],
        };
        assert_eq!(detalhes(&request).len(), 4);
    }

    #[test]
    fn test_status_pedido_parse() {
        assert_eq!(StatusPedido::parse("recebido"), Some(StatusPedido::Recebido));
        assert_eq!(StatusPedido::parse("cancelado"), Some(StatusPedido::Cancelado));
        assert_eq!(StatusPedido::parse("em_transito"), None);
        assert_eq!(StatusPedido::parse(""), None);
    }

    #[test]
    fn test_status_pedido_serializa_em_minusculas() {
        assert_eq!(
            serde_json::to_string(&StatusPedido::Recebido).unwrap(),
            "\"recebido\""
        );
    }
}
