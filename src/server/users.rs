use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use log::debug;

use crate::entity::helpers::{UserFavorites, UserFields, UserView, favorites, users};
use crate::server::ServerState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::types::{MessageResponse, optional_body, required_body, row_id};

const RESOURCE: &str = "User";

pub(crate) async fn list_users(State(state): State<ServerState>) -> ApiResult<Json<Vec<UserView>>> {
    let users = users::list_users(state.db()?).await?;
    Ok(Json(users))
}

pub(crate) async fn get_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserView>> {
    let id = row_id(&id, RESOURCE)?;
    users::find_user(state.db()?, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(RESOURCE))
}

pub(crate) async fn create_user(
    State(state): State<ServerState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<UserView>)> {
    let fields: UserFields = required_body(&body)?;
    let (Some(email), Some(password)) = (fields.email, fields.password) else {
        return Err(ApiError::MissingData);
    };

    let created = users::create_user(state.db()?, email, password).await?;
    debug!("Created user {}", created.user.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn update_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<UserView>> {
    let id = row_id(&id, RESOURCE)?;
    let fields: UserFields = optional_body(&body)?;
    users::update_user(state.db()?, id, fields)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(RESOURCE))
}

pub(crate) async fn delete_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = row_id(&id, RESOURCE)?;
    if !users::delete_user(state.db()?, id).await? {
        return Err(ApiError::NotFound(RESOURCE));
    }
    Ok(Json(MessageResponse::new("User deleted")))
}

pub(crate) async fn list_user_favorites(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserFavorites>> {
    let id = row_id(&id, RESOURCE)?;
    let db = state.db()?;
    if users::find_user(db, id).await?.is_none() {
        return Err(ApiError::NotFound(RESOURCE));
    }
    Ok(Json(favorites::favorites_of_user(db, id).await?))
}
