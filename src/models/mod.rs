pub mod cardapio;
pub mod common;
pub mod dashboard;
pub mod pagination;
pub mod pedido;
pub mod user;

pub use cardapio::*;
pub use common::*;
pub use dashboard::*;
pub use pagination::*;
pub use pedido::*;
pub use user::*;
