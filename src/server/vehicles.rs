use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::entity::helpers::{VehicleFields, vehicles};
use crate::entity::vehicle::Model as Vehicle;
use crate::server::ServerState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::types::{MessageResponse, optional_body, required_body, row_id};

const RESOURCE: &str = "Vehicle";

pub(crate) async fn list_vehicles(
    State(state): State<ServerState>,
) -> ApiResult<Json<Vec<Vehicle>>> {
    Ok(Json(vehicles::list_vehicles(state.db()?).await?))
}

pub(crate) async fn get_vehicle(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vehicle>> {
    let id = row_id(&id, RESOURCE)?;
    vehicles::find_vehicle(state.db()?, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(RESOURCE))
}

pub(crate) async fn create_vehicle(
    State(state): State<ServerState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Vehicle>)> {
    let fields: VehicleFields = required_body(&body)?;
    let (Some(name), Some(model)) = (fields.name, fields.model) else {
        return Err(ApiError::MissingData);
    };

    let created = vehicles::create_vehicle(state.db()?, name, model).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn update_vehicle(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Vehicle>> {
    let id = row_id(&id, RESOURCE)?;
    let fields: VehicleFields = optional_body(&body)?;
    vehicles::update_vehicle(state.db()?, id, fields)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(RESOURCE))
}

pub(crate) async fn delete_vehicle(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = row_id(&id, RESOURCE)?;
    if !vehicles::delete_vehicle(state.db()?, id).await? {
        return Err(ApiError::NotFound(RESOURCE));
    }
    Ok(Json(MessageResponse::new("Vehicle deleted")))
}
