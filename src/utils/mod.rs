pub mod jwt;
pub mod order_number;
pub mod password;
pub mod validation;

pub use jwt::*;
pub use order_number::gerar_numero_pedido;
pub use password::{hash_password, verify_password};
pub use validation::is_valid_email;
