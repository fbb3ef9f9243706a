use sea_orm_migration::prelude::*;

/// Usuários do painel (staff) e clientes registrados
#[derive(DeriveIden)]
enum Usuarios {
    Table,
    Id,
    Nome,
    Email,
    Senha,
    Tipo,
    Telefone,
    Ativo,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Categorias {
    Table,
    Id,
    Nome,
    Descricao,
    Ativo,
    CreatedAt,
    UpdatedAt,
}

/// Itens do cardápio
#[derive(DeriveIden)]
enum Cardapio {
    Table,
    Id,
    Nome,
    Descricao,
    Preco,
    CategoriaId,
    ImagemUrl,
    Disponivel,
    TempoPreparo,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Pedidos {
    Table,
    Id,
    NumeroPedido,
    ClienteNome,
    ClienteTelefone,
    ClienteEmail,
    Status,
    Total,
    Observacoes,
    TipoEntrega,
    EnderecoEntrega,
    CreatedAt,
    UpdatedAt,
}

/// Linhas de pedido; preco_unitario é uma cópia do preço do item
/// no momento do pedido e nunca é recalculado depois.
#[derive(DeriveIden)]
enum ItensPedido {
    Table,
    Id,
    PedidoId,
    CardapioId,
    Quantidade,
    PrecoUnitario,
    Observacoes,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Usuarios::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Usuarios::Nome).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Usuarios::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Usuarios::Senha).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Usuarios::Tipo)
                            .string_len(10)
                            .not_null()
                            .default("cliente"),
                    )
                    .col(ColumnDef::new(Usuarios::Telefone).string_len(20))
                    .col(
                        ColumnDef::new(Usuarios::Ativo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Usuarios::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Usuarios::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categorias::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categorias::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categorias::Nome).string_len(255).not_null())
                    .col(ColumnDef::new(Categorias::Descricao).text())
                    .col(
                        ColumnDef::new(Categorias::Ativo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Categorias::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Categorias::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cardapio::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cardapio::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cardapio::Nome).string_len(255).not_null())
                    .col(ColumnDef::new(Cardapio::Descricao).text())
                    .col(ColumnDef::new(Cardapio::Preco).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Cardapio::CategoriaId).big_integer())
                    .col(ColumnDef::new(Cardapio::ImagemUrl).string_len(500))
                    .col(
                        ColumnDef::new(Cardapio::Disponivel)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Cardapio::TempoPreparo)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(
                        ColumnDef::new(Cardapio::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Cardapio::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cardapio_categoria")
                            .from(Cardapio::Table, Cardapio::CategoriaId)
                            .to(Categorias::Table, Categorias::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pedidos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pedidos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Pedidos::NumeroPedido)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Pedidos::ClienteNome)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Pedidos::ClienteTelefone).string_len(20))
                    .col(ColumnDef::new(Pedidos::ClienteEmail).string_len(255))
                    .col(
                        ColumnDef::new(Pedidos::Status)
                            .string_len(20)
                            .not_null()
                            .default("recebido"),
                    )
                    .col(ColumnDef::new(Pedidos::Total).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Pedidos::Observacoes).text())
                    .col(
                        ColumnDef::new(Pedidos::TipoEntrega)
                            .string_len(20)
                            .not_null()
                            .default("balcao"),
                    )
                    .col(ColumnDef::new(Pedidos::EnderecoEntrega).text())
                    .col(
                        ColumnDef::new(Pedidos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Pedidos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ItensPedido::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ItensPedido::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ItensPedido::PedidoId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ItensPedido::CardapioId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ItensPedido::Quantidade)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(ItensPedido::PrecoUnitario)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ItensPedido::Observacoes).text())
                    .col(
                        ColumnDef::new(ItensPedido::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_itens_pedido_pedido")
                            .from(ItensPedido::Table, ItensPedido::PedidoId)
                            .to(Pedidos::Table, Pedidos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_itens_pedido_cardapio")
                            .from(ItensPedido::Table, ItensPedido::CardapioId)
                            .to(Cardapio::Table, Cardapio::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ItensPedido::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pedidos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cardapio::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categorias::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Usuarios::Table).to_owned())
            .await?;
        Ok(())
    }
}
