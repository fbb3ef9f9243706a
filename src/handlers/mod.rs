pub mod auth;
pub mod cardapio;
pub mod dashboard;
pub mod health;
pub mod pedidos;

pub use auth::auth_config;
pub use cardapio::cardapio_config;
pub use dashboard::dashboard_config;
pub use health::health_config;
pub use pedidos::pedidos_config;
