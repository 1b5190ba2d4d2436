use axum::{
    routing::{get, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::ServerState;

pub mod meals;
pub mod profile;

pub const MEALS_URL: &str = "/rest/profile/meals";

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: health, profile and meal routes.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let meal_routes = Router::new()
        .route("/", get(meals::list).post(meals::create))
        .route("/filter", get(meals::filter))
        .route("/:id", get(meals::get).put(meals::update).delete(meals::delete));

    let profile_routes = Router::new()
        .route("/rest/profile", get(profile::current))
        .route("/rest/profile/:user_id", put(profile::switch_user));

    Router::new()
        .route("/health", get(health))
        .nest(MEALS_URL, meal_routes)
        .merge(profile_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
