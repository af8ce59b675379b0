//src/main.rs

use std::time::Duration;

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    let request_timeout = Duration::from_secs(app_state.settings.request_timeout_secs);

    // Rotas públicas de autenticação
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Tudo abaixo passa pelo auth_guard
    let clientes_routes = Router::new()
        .route(
            "/",
            get(handlers::clientes::listar).post(handlers::clientes::criar),
        )
        .route(
            "/{id}",
            get(handlers::clientes::buscar)
                .put(handlers::clientes::atualizar)
                .delete(handlers::clientes::desativar),
        )
        .route(
            "/{id}/pets",
            get(handlers::clientes::listar_pets).post(handlers::clientes::criar_pet),
        )
        .route("/{id}/pacotes", get(handlers::pacotes::pacotes_do_cliente));

    let agendamentos_routes = Router::new()
        .route(
            "/",
            get(handlers::agendamentos::listar).post(handlers::agendamentos::criar),
        )
        .route("/hoje", get(handlers::agendamentos::hoje))
        .route("/calendario", get(handlers::agendamentos::calendario))
        .route("/{id}/status", patch(handlers::agendamentos::mudar_status));

    let pacotes_routes = Router::new()
        .route(
            "/",
            get(handlers::pacotes::listar).post(handlers::pacotes::criar),
        )
        .route(
            "/{id}",
            get(handlers::pacotes::buscar)
                .put(handlers::pacotes::atualizar)
                .delete(handlers::pacotes::desativar),
        )
        .route("/{id}/vender", post(handlers::pacotes::vender));

    let vendas_routes = Router::new()
        .route(
            "/",
            get(handlers::vendas::listar).post(handlers::vendas::registrar),
        )
        .route("/{id}", get(handlers::vendas::buscar));

    let empresas_routes = Router::new()
        .route(
            "/",
            get(handlers::empresas::listar).post(handlers::empresas::criar),
        )
        .route(
            "/minha",
            get(handlers::empresas::minha).put(handlers::empresas::atualizar_minha),
        )
        .route("/{codigo}/banco", post(handlers::empresas::registrar_banco));

    let protected_routes = Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route("/produtos", get(handlers::catalogo::listar_produtos))
        .route("/servicos", get(handlers::catalogo::listar_servicos))
        .nest("/clientes", clientes_routes)
        .nest("/agendamentos", agendamentos_routes)
        .nest("/pacotes", pacotes_routes)
        .nest("/vendas", vendas_routes)
        .nest("/empresas", empresas_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(handlers::health::health))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
