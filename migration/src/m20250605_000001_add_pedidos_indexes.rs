use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Pedidos {
    Table,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ItensPedido {
    Table,
    PedidoId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Índices para as consultas do painel (filtro por status, agregação por dia)
/// e para a montagem dos itens de um pedido.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pedidos_status")
                    .table(Pedidos::Table)
                    .col(Pedidos::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_pedidos_created_at")
                    .table(Pedidos::Table)
                    .col(Pedidos::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_itens_pedido_pedido_id")
                    .table(ItensPedido::Table)
                    .col(ItensPedido::PedidoId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_itens_pedido_pedido_id")
                    .table(ItensPedido::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_pedidos_created_at")
                    .table(Pedidos::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_pedidos_status")
                    .table(Pedidos::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
