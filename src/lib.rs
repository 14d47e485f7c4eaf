// src/lib.rs

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::{config::AppState, docs::ApiDoc};

// Monta o router principal. Autenticação e papel são extratores dos handlers,
// então rotas públicas e protegidas convivem no mesmo grupo.
pub fn app(app_state: AppState) -> Router {
    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route("/", get(handlers::users::list_users))
        .route("/me", get(handlers::auth::get_me))
        .route("/request", get(handlers::users::list_user_requests))
        .route("/request/{id}/approve", put(handlers::users::decide_user_request))
        .route("/{id}", delete(handlers::users::delete_user));

    let inventory_routes = Router::new()
        .route(
            "/",
            get(handlers::inventory::list_items).post(handlers::inventory::create_item),
        )
        .route(
            "/{id}",
            get(handlers::inventory::get_item)
                .put(handlers::inventory::update_item)
                .delete(handlers::inventory::delete_item),
        );

    let location_routes = Router::new()
        .route(
            "/",
            get(handlers::locations::list_locations).post(handlers::locations::create_location),
        )
        .route(
            "/{id}",
            get(handlers::locations::get_location)
                .put(handlers::locations::update_location)
                .delete(handlers::locations::delete_location),
        );

    let transaction_routes = Router::new()
        .route(
            "/",
            get(handlers::transactions::list_transactions)
                .post(handlers::transactions::create_transaction),
        )
        .route("/pending", get(handlers::transactions::list_pending_transactions))
        .route("/{id}", get(handlers::transactions::get_transaction))
        .route("/{id}/approve", put(handlers::transactions::decide_transaction));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/categories", get(handlers::dashboard::get_categories))
        .route("/daily", get(handlers::dashboard::get_daily))
        .route("/top-stock", get(handlers::dashboard::get_top_stock))
        .route("/top-moved", get(handlers::dashboard::get_top_moved));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/locations", location_routes)
        .nest("/api/transactions", transaction_routes)
        .nest("/api/dashboard", dashboard_routes)
        .route("/api/reports/transactions", get(handlers::reports::transactions_report))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
