use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cardapio")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub preco: Decimal,
    pub categoria_id: Option<i64>,
    pub imagem_url: Option<String>,
    pub disponivel: bool,
    /// Tempo de preparo em minutos
    pub tempo_preparo: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categorias::Entity",
        from = "Column::CategoriaId",
        to = "super::categorias::Column::Id"
    )]
    Categoria,
    #[sea_orm(has_many = "super::itens_pedido::Entity")]
    ItensPedido,
}

impl Related<super::categorias::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categoria.def()
    }
}

impl Related<super::itens_pedido::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItensPedido.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
