use crate::entities::usuario_entity as usuarios;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{JwtService, hash_password, verify_password};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let usuario = usuarios::Entity::find()
            .filter(usuarios::Column::Email.eq(request.email.as_str()))
            .filter(usuarios::Column::Ativo.eq(true))
            .one(&self.pool)
            .await?;

        // Email desconhecido e senha errada produzem a mesma resposta
        let usuario =
            usuario.ok_or_else(|| AppError::AuthError("Credenciais inválidas".to_string()))?;

        if !verify_password(&request.senha, &usuario.senha)? {
            return Err(AppError::AuthError("Credenciais inválidas".to_string()));
        }

        let token = self.jwt_service.generate_token(usuario.id)?;

        Ok(AuthResponse {
            message: "Login realizado com sucesso".to_string(),
            token,
            usuario: usuario.into(),
        })
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let existente = usuarios::Entity::find()
            .filter(usuarios::Column::Email.eq(request.email.as_str()))
            .one(&self.pool)
            .await?;

        if existente.is_some() {
            return Err(AppError::Conflict("Email já cadastrado".to_string()));
        }

        let senha_hash = hash_password(&request.senha)?;

        // O registro é o caminho de entrada da equipe do restaurante,
        // por isso a conta já nasce com perfil admin.
        let usuario = usuarios::ActiveModel {
            nome: Set(request.nome.trim().to_string()),
            email: Set(request.email.clone()),
            senha: Set(senha_hash),
            tipo: Set(TipoUsuario::Admin),
            telefone: Set(request.telefone.clone()),
            ativo: Set(true),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Usuário {} registrado", usuario.email);

        let token = self.jwt_service.generate_token(usuario.id)?;

        Ok(AuthResponse {
            message: "Usuário criado com sucesso".to_string(),
            token,
            usuario: usuario.into(),
        })
    }

    pub async fn get_usuario(&self, user_id: i64) -> AppResult<UsuarioResponse> {
        let usuario = usuarios::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado".to_string()))?;

        Ok(usuario.into())
    }

    /// Carrega o usuário do token e exige perfil admin ativo.
    pub async fn require_admin(&self, user_id: i64) -> AppResult<usuarios::Model> {
        let usuario = usuarios::Entity::find_by_id(user_id).one(&self.pool).await?;

        let usuario = match usuario {
            Some(u) if u.ativo => u,
            _ => return Err(AppError::AuthError("Token inválido".to_string())),
        };

        if usuario.tipo != TipoUsuario::Admin {
            return Err(AppError::Forbidden);
        }

        Ok(usuario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn usuario_modelo(senha_hash: String, tipo: TipoUsuario, ativo: bool) -> usuarios::Model {
        usuarios::Model {
            id: 1,
            nome: "Administrador".to_string(),
            email: "admin@cardapio.com".to_string(),
            senha: senha_hash,
            tipo,
            telefone: None,
            ativo,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn jwt_de_teste() -> JwtService {
        JwtService::new("segredo-de-teste", 3600)
    }

    #[tokio::test]
    async fn test_login_com_senha_errada_responde_credenciais_invalidas() {
        let hash = hash_password("admin123").unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![usuario_modelo(hash, TipoUsuario::Admin, true)]])
            .into_connection();

        let service = AuthService::new(db, jwt_de_teste());
        let result = service
            .login(LoginRequest {
                email: "admin@cardapio.com".to_string(),
                senha: "senha-errada".to_string(),
            })
            .await;

        match result {
            Err(AppError::AuthError(msg)) => assert_eq!(msg, "Credenciais inválidas"),
            other => panic!("esperava AuthError, obteve {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_com_email_desconhecido_responde_igual() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<usuarios::Model>::new()])
            .into_connection();

        let service = AuthService::new(db, jwt_de_teste());
        let result = service
            .login(LoginRequest {
                email: "ninguem@cardapio.com".to_string(),
                senha: "qualquer-coisa".to_string(),
            })
            .await;

        match result {
            Err(AppError::AuthError(msg)) => assert_eq!(msg, "Credenciais inválidas"),
            other => panic!("esperava AuthError, obteve {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_valido_emite_token_verificavel() {
        let hash = hash_password("admin123").unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![usuario_modelo(hash, TipoUsuario::Admin, true)]])
            .into_connection();

        let jwt = jwt_de_teste();
        let service = AuthService::new(db, jwt.clone());
        let response = service
            .login(LoginRequest {
                email: "admin@cardapio.com".to_string(),
                senha: "admin123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.message, "Login realizado com sucesso");
        let claims = jwt.verify_token(&response.token).unwrap();
        assert_eq!(claims.sub, "1");
    }

    #[tokio::test]
    async fn test_register_com_email_duplicado_conflita() {
        let hash = hash_password("admin123").unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![usuario_modelo(hash, TipoUsuario::Admin, true)]])
            .into_connection();

        let service = AuthService::new(db, jwt_de_teste());
        let result = service
            .register(RegisterRequest {
                nome: "Outro Admin".to_string(),
                email: "admin@cardapio.com".to_string(),
                senha: "123456".to_string(),
                telefone: None,
            })
            .await;

        match result {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, "Email já cadastrado"),
            other => panic!("esperava Conflict, obteve {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_require_admin_rejeita_cliente() {
        let hash = hash_password("123456").unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![usuario_modelo(hash, TipoUsuario::Cliente, true)]])
            .into_connection();

        let service = AuthService::new(db, jwt_de_teste());
        match service.require_admin(1).await {
            Err(AppError::Forbidden) => {}
            other => panic!("esperava Forbidden, obteve {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_require_admin_rejeita_usuario_inativo() {
        let hash = hash_password("123456").unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![usuario_modelo(hash, TipoUsuario::Admin, false)]])
            .into_connection();

        let service = AuthService::new(db, jwt_de_teste());
        assert!(matches!(
            service.require_admin(1).await,
            Err(AppError::AuthError(_))
        ));
    }
}
