use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use models::{Meal, MealTo};
use serde::Deserialize;

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// Create/update body; the owner is always the active user.
#[derive(Debug, Clone, Deserialize)]
pub struct MealInput {
    #[serde(default)]
    pub id: Option<i32>,
    pub date_time: NaiveDateTime,
    pub description: String,
    pub calories: i32,
}

impl MealInput {
    fn into_meal(self, user_id: i32) -> Meal {
        Meal { id: self.id, user_id, date_time: self.date_time, description: self.description, calories: self.calories }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

pub async fn list(State(state): State<ServerState>) -> Json<Vec<MealTo>> {
    Json(state.meals.get_all())
}

pub async fn filter(State(state): State<ServerState>, Query(q): Query<FilterQuery>) -> Json<Vec<MealTo>> {
    Json(state.meals.get_between(q.start_date, q.end_date, q.start_time, q.end_time))
}

pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Meal>, JsonApiError> {
    Ok(Json(state.meals.get(id)?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<MealInput>,
) -> Result<(StatusCode, Json<Meal>), JsonApiError> {
    let meal = input.into_meal(state.security.auth_user_id());
    let created = state.meals.create(meal)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<MealInput>,
) -> Result<StatusCode, JsonApiError> {
    if let Some(body_id) = input.id {
        if body_id != id {
            return Err(JsonApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Error",
                Some(format!("body id {body_id} does not match path id {id}")),
            ));
        }
    }
    let meal = input.into_meal(state.security.auth_user_id()).with_id(id);
    state.meals.update(meal)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.meals.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
