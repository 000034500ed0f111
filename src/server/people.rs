use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::entity::helpers::{PeopleFields, people};
use crate::entity::people::Model as Person;
use crate::server::ServerState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::types::{MessageResponse, optional_body, required_body, row_id};

const RESOURCE: &str = "Person";

pub(crate) async fn list_people(State(state): State<ServerState>) -> ApiResult<Json<Vec<Person>>> {
    Ok(Json(people::list_people(state.db()?).await?))
}

pub(crate) async fn get_person(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Person>> {
    let id = row_id(&id, RESOURCE)?;
    people::find_person(state.db()?, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(RESOURCE))
}

pub(crate) async fn create_person(
    State(state): State<ServerState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Person>)> {
    let fields: PeopleFields = required_body(&body)?;
    let (Some(name), Some(gender)) = (fields.name, fields.gender) else {
        return Err(ApiError::MissingData);
    };

    let created = people::create_person(state.db()?, name, gender, fields.user_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn update_person(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Person>> {
    let id = row_id(&id, RESOURCE)?;
    let fields: PeopleFields = optional_body(&body)?;
    people::update_person(state.db()?, id, fields)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(RESOURCE))
}

pub(crate) async fn delete_person(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = row_id(&id, RESOURCE)?;
    if !people::delete_person(state.db()?, id).await? {
        return Err(ApiError::NotFound(RESOURCE));
    }
    Ok(Json(MessageResponse::new("Person deleted")))
}
