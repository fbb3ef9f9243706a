use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "itens_pedido")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub pedido_id: i64,
    pub cardapio_id: i64,
    pub quantidade: i32,
    /// Cópia do preço do item no momento do pedido
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub preco_unitario: Decimal,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pedidos::Entity",
        from = "Column::PedidoId",
        to = "super::pedidos::Column::Id"
    )]
    Pedido,
    #[sea_orm(
        belongs_to = "super::cardapio::Entity",
        from = "Column::CardapioId",
        to = "super::cardapio::Column::Id"
    )]
    Cardapio,
}

impl Related<super::pedidos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pedido.def()
    }
}

impl Related<super::cardapio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cardapio.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
