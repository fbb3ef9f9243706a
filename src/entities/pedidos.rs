use crate::models::{StatusPedido, TipoEntrega};
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pedidos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub numero_pedido: String,
    pub cliente_nome: String,
    pub cliente_telefone: Option<String>,
    pub cliente_email: Option<String>,
    pub status: StatusPedido,
    /// Sempre igual à soma de quantidade × preco_unitario dos itens
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total: Decimal,
    pub observacoes: Option<String>,
    pub tipo_entrega: TipoEntrega,
    pub endereco_entrega: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::itens_pedido::Entity")]
    ItensPedido,
}

impl Related<super::itens_pedido::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItensPedido.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
