use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use log::debug;

use crate::entity::helpers::{FavoritePeopleView, FavoritePlanetView, favorites, people, planets};
use crate::server::ServerState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::types::{FavoriteRequest, MessageResponse, required_body, row_id};

const RESOURCE: &str = "Favorite";

fn owning_user(body: &Bytes) -> ApiResult<i32> {
    let request: FavoriteRequest = required_body(body)?;
    request.owning_user()
}

pub(crate) async fn list_person_favorites(
    State(state): State<ServerState>,
    Path(people_id): Path<String>,
) -> ApiResult<Json<Vec<FavoritePeopleView>>> {
    let people_id = row_id(&people_id, "Person")?;
    let db = state.db()?;
    if people::find_person(db, people_id).await?.is_none() {
        return Err(ApiError::NotFound("Person"));
    }
    Ok(Json(favorites::favorites_of_person(db, people_id).await?))
}

pub(crate) async fn add_favorite_person(
    State(state): State<ServerState>,
    Path(people_id): Path<String>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<FavoritePeopleView>)> {
    let people_id = row_id(&people_id, "Person")?;
    let user_id = owning_user(&body)?;
    let created = favorites::add_favorite_person(state.db()?, user_id, people_id).await?;
    debug!("User {user_id} favorited person {people_id}");
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn remove_favorite_person(
    State(state): State<ServerState>,
    Path(people_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<MessageResponse>> {
    let people_id = row_id(&people_id, RESOURCE)?;
    let user_id = owning_user(&body)?;
    if !favorites::remove_favorite_person(state.db()?, user_id, people_id).await? {
        return Err(ApiError::NotFound(RESOURCE));
    }
    Ok(Json(MessageResponse::new("Favorite deleted")))
}

pub(crate) async fn list_planet_favorites(
    State(state): State<ServerState>,
    Path(planet_id): Path<String>,
) -> ApiResult<Json<Vec<FavoritePlanetView>>> {
    let planet_id = row_id(&planet_id, "Planet")?;
    let db = state.db()?;
    if planets::find_planet(db, planet_id).await?.is_none() {
        return Err(ApiError::NotFound("Planet"));
    }
    Ok(Json(favorites::favorites_of_planet(db, planet_id).await?))
}

pub(crate) async fn add_favorite_planet(
    State(state): State<ServerState>,
    Path(planet_id): Path<String>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<FavoritePlanetView>)> {
    let planet_id = row_id(&planet_id, "Planet")?;
    let user_id = owning_user(&body)?;
    let created = favorites::add_favorite_planet(state.db()?, user_id, planet_id).await?;
    debug!("User {user_id} favorited planet {planet_id}");
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn remove_favorite_planet(
    State(state): State<ServerState>,
    Path(planet_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<MessageResponse>> {
    let planet_id = row_id(&planet_id, RESOURCE)?;
    let user_id = owning_user(&body)?;
    if !favorites::remove_favorite_planet(state.db()?, user_id, planet_id).await? {
        return Err(ApiError::NotFound(RESOURCE));
    }
    Ok(Json(MessageResponse::new("Favorite deleted")))
}
