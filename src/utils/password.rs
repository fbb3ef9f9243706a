use crate::error::{AppError, AppResult};
use bcrypt::{DEFAULT_COST, hash, verify};

pub fn hash_password(senha: &str) -> AppResult<String> {
    hash(senha, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Falha ao gerar hash da senha: {e}")))
}

pub fn verify_password(senha: &str, hash: &str) -> AppResult<bool> {
    verify(senha, hash)
        .map_err(|e| AppError::InternalError(format!("Falha ao verificar a senha: {e}")))
}
