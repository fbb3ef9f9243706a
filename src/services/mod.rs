pub mod auth_service;
pub mod cardapio_service;
pub mod dashboard_service;
pub mod pedido_service;

pub use auth_service::AuthService;
pub use cardapio_service::CardapioService;
pub use dashboard_service::DashboardService;
pub use pedido_service::PedidoService;
