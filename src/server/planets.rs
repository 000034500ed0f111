use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use log::debug;

use crate::entity::helpers::{PlanetFields, planets};
use crate::entity::planet::Model as Planet;
use crate::server::ServerState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::types::{MessageResponse, optional_body, required_body, row_id};

const RESOURCE: &str = "Planet";

pub(crate) async fn list_planets(State(state): State<ServerState>) -> ApiResult<Json<Vec<Planet>>> {
    Ok(Json(planets::list_planets(state.db()?).await?))
}

pub(crate) async fn get_planet(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Planet>> {
    let id = row_id(&id, RESOURCE)?;
    planets::find_planet(state.db()?, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(RESOURCE))
}

pub(crate) async fn create_planet(
    State(state): State<ServerState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Planet>)> {
    let fields: PlanetFields = required_body(&body)?;
    let (Some(name), Some(terrain), Some(climate)) = (fields.name, fields.terrain, fields.climate)
    else {
        return Err(ApiError::MissingData);
    };

    let created = planets::create_planet(state.db()?, name, terrain, climate).await?;
    debug!("Created planet {} ({})", created.id, created.name);
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn update_planet(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Planet>> {
    let id = row_id(&id, RESOURCE)?;
    let fields: PlanetFields = optional_body(&body)?;
    planets::update_planet(state.db()?, id, fields)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(RESOURCE))
}

pub(crate) async fn delete_planet(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = row_id(&id, RESOURCE)?;
    if !planets::delete_planet(state.db()?, id).await? {
        return Err(ApiError::NotFound(RESOURCE));
    }
    Ok(Json(MessageResponse::new("Planet deleted")))
}
