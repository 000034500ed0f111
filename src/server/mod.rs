use crate::data::configuration::Configuration;
use crate::data::dbconnector::{SQLConnector, StoreConnection};
use crate::server::types::{GreetingResponse, RouteEntry, SitemapResponse};
pub mod error;
mod favorites;
mod people;
mod planets;
pub mod types;
mod users;
mod vehicles;

use anyhow::Context;
use axum::{Json, Router, routing::get};
use log::{debug, error, info};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct ServerState {
    pub database_connection: Arc<SQLConnector>,
}

impl ServerState {
    pub fn new(connector: SQLConnector) -> Self {
        Self {
            database_connection: Arc::new(connector),
        }
    }

    fn db(&self) -> Result<&DatabaseConnection, DbErr> {
        self.database_connection.db()
    }
}

/// Every (method, path) pair the router serves, in registration order.
pub const ROUTES: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/user"),
    ("GET", "/users"),
    ("POST", "/users"),
    ("GET", "/users/{id}"),
    ("PUT", "/users/{id}"),
    ("DELETE", "/users/{id}"),
    ("GET", "/users/{id}/favorites"),
    ("GET", "/people"),
    ("POST", "/people"),
    ("GET", "/people/{id}"),
    ("PUT", "/people/{id}"),
    ("DELETE", "/people/{id}"),
    ("GET", "/vehicles"),
    ("POST", "/vehicles"),
    ("GET", "/vehicles/{id}"),
    ("PUT", "/vehicles/{id}"),
    ("DELETE", "/vehicles/{id}"),
    ("GET", "/planets"),
    ("POST", "/planets"),
    ("GET", "/planets/{id}"),
    ("PUT", "/planets/{id}"),
    ("DELETE", "/planets/{id}"),
    ("GET", "/favorite/people/{id}"),
    ("POST", "/favorite/people/{id}"),
    ("DELETE", "/favorite/people/{id}"),
    ("GET", "/favorite/planet/{id}"),
    ("POST", "/favorite/planet/{id}"),
    ("DELETE", "/favorite/planet/{id}"),
];

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(sitemap))
        .route("/user", get(greeting))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/{id}/favorites", get(users::list_user_favorites))
        .route("/people", get(people::list_people).post(people::create_person))
        .route(
            "/people/{id}",
            get(people::get_person)
                .put(people::update_person)
                .delete(people::delete_person),
        )
        .route(
            "/vehicles",
            get(vehicles::list_vehicles).post(vehicles::create_vehicle),
        )
        .route(
            "/vehicles/{id}",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .route("/planets", get(planets::list_planets).post(planets::create_planet))
        .route(
            "/planets/{id}",
            get(planets::get_planet)
                .put(planets::update_planet)
                .delete(planets::delete_planet),
        )
        .route(
            "/favorite/people/{id}",
            get(favorites::list_person_favorites)
                .post(favorites::add_favorite_person)
                .delete(favorites::remove_favorite_person),
        )
        .route(
            "/favorite/planet/{id}",
            get(favorites::list_planet_favorites)
                .post(favorites::add_favorite_planet)
                .delete(favorites::remove_favorite_planet),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(config: Configuration, database_connection: SQLConnector) -> anyhow::Result<()> {
    let address = format!("{}:{}", config.server.host, config.server.port);
    debug!("Starting server on {address}");

    let state = ServerState::new(database_connection);
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("Listening on {address}");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped, closing database connection");
    state.database_connection.close().await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
    }
}

async fn sitemap() -> Json<SitemapResponse> {
    let routes = ROUTES
        .iter()
        .map(|&(method, path)| RouteEntry { method, path })
        .collect();
    Json(SitemapResponse { routes })
}

async fn greeting() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        msg: "Hello, this is your GET /user response",
    })
}
