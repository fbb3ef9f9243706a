pub mod cardapio;
pub mod categorias;
pub mod itens_pedido;
pub mod pedidos;
pub mod usuarios;

pub use cardapio as cardapio_entity;
pub use categorias as categoria_entity;
pub use itens_pedido as item_pedido_entity;
pub use pedidos as pedido_entity;
pub use usuarios as usuario_entity;
