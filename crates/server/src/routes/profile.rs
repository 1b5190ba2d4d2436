use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Debug, Serialize)]
pub struct ProfileOutput {
    pub user_id: i32,
    pub calories_per_day: i32,
}

pub async fn current(State(state): State<ServerState>) -> Json<ProfileOutput> {
    Json(ProfileOutput {
        user_id: state.security.auth_user_id(),
        calories_per_day: state.security.calories_per_day(),
    })
}

/// Switch the active user, which scopes every subsequent meal request.
pub async fn switch_user(State(state): State<ServerState>, Path(user_id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    if user_id <= 0 {
        return Err(JsonApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some("user id must be positive".into())));
    }
    state.security.set_auth_user_id(user_id);
    Ok(StatusCode::NO_CONTENT)
}
