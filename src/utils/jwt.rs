use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // id do usuário
    pub exp: i64,
    pub iat: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        }
    }

    pub fn generate_token(&self, user_id: i64) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }

    pub fn get_expires_in(&self) -> i64 {
        self.expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let service = JwtService::new("segredo-de-teste", 3600);
        let token = service.generate_token(42).unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_com_outro_segredo_rejeitado() {
        let service = JwtService::new("segredo-a", 3600);
        let outro = JwtService::new("segredo-b", 3600);

        let token = service.generate_token(1).unwrap();
        assert!(outro.verify_token(&token).is_err());
    }

    #[test]
    fn test_token_expirado_rejeitado() {
        let service = JwtService::new("segredo-de-teste", -3600);
        let token = service.generate_token(1).unwrap();
        assert!(service.verify_token(&token).is_err());
    }

    #[test]
    fn test_token_malformado_rejeitado() {
        let service = JwtService::new("segredo-de-teste", 3600);
        assert!(service.verify_token("nao-e-um-jwt").is_err());
    }
}
