use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write; // formatador customizado do env_logger

use cardapio_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    error::AppError,
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // Carrega a configuração (config.toml + variáveis de ambiente)
    let config = Config::from_toml().expect("Failed to load configuration file");

    // Pool de conexões e migrações
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.expires_in);

    let auth_service = AuthService::new(pool.clone(), jwt_service.clone());
    let cardapio_service = CardapioService::new(pool.clone());
    let pedido_service = PedidoService::new(pool.clone());
    let dashboard_service = DashboardService::new(pool.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(cardapio_service.clone()))
            .app_data(web::Data::new(pedido_service.clone()))
            .app_data(web::Data::new(dashboard_service.clone()))
            // Corpo JSON malformado responde no mesmo formato dos demais 400
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::validation(err.to_string()).into()
            }))
            .configure(swagger_config)
            .configure(handlers::health_config)
            .service(
                web::scope("/api")
                    .configure(handlers::auth_config)
                    .configure(handlers::cardapio_config)
                    .configure(handlers::pedidos_config)
                    .configure(handlers::dashboard_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
