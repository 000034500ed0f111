use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Serialize;

use crate::entity::{favorite_people, favorite_planet, people, planet};

/// A favorite-person join row with the referenced person inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoritePeopleView {
    #[serde(flatten)]
    pub favorite: favorite_people::Model,
    pub people: Option<people::Model>,
}

/// A favorite-planet join row with the referenced planet inlined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoritePlanetView {
    #[serde(flatten)]
    pub favorite: favorite_planet::Model,
    pub planet: Option<planet::Model>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserFavorites {
    pub people: Vec<FavoritePeopleView>,
    pub planets: Vec<FavoritePlanetView>,
}

impl From<(favorite_people::Model, Option<people::Model>)> for FavoritePeopleView {
    fn from((favorite, people): (favorite_people::Model, Option<people::Model>)) -> Self {
        Self { favorite, people }
    }
}

impl From<(favorite_planet::Model, Option<planet::Model>)> for FavoritePlanetView {
    fn from((favorite, planet): (favorite_planet::Model, Option<planet::Model>)) -> Self {
        Self { favorite, planet }
    }
}

pub async fn favorites_of_person(
    db: &DatabaseConnection,
    people_id: i32,
) -> Result<Vec<FavoritePeopleView>, DbErr> {
    let rows = favorite_people::Entity::find()
        .filter(favorite_people::Column::PeopleId.eq(people_id))
        .find_also_related(people::Entity)
        .order_by_asc(favorite_people::Column::Id)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(FavoritePeopleView::from).collect())
}

pub async fn favorites_of_planet(
    db: &DatabaseConnection,
    planet_id: i32,
) -> Result<Vec<FavoritePlanetView>, DbErr> {
    let rows = favorite_planet::Entity::find()
        .filter(favorite_planet::Column::PlanetId.eq(planet_id))
        .find_also_related(planet::Entity)
        .order_by_asc(favorite_planet::Column::Id)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(FavoritePlanetView::from).collect())
}

pub async fn favorites_of_user(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<UserFavorites, DbErr> {
    let people = favorite_people::Entity::find()
        .filter(favorite_people::Column::UserId.eq(user_id))
        .find_also_related(people::Entity)
        .order_by_asc(favorite_people::Column::Id)
        .all(db)
        .await?;
    let planets = favorite_planet::Entity::find()
        .filter(favorite_planet::Column::UserId.eq(user_id))
        .find_also_related(planet::Entity)
        .order_by_asc(favorite_planet::Column::Id)
        .all(db)
        .await?;

    Ok(UserFavorites {
        people: people.into_iter().map(FavoritePeopleView::from).collect(),
        planets: planets.into_iter().map(FavoritePlanetView::from).collect(),
    })
}

/// Links a user to a person. Unknown ids are rejected by the store's
/// foreign keys rather than checked here.
pub async fn add_favorite_person(
    db: &DatabaseConnection,
    user_id: i32,
    people_id: i32,
) -> Result<FavoritePeopleView, DbErr> {
    let favorite = favorite_people::ActiveModel {
        user_id: Set(user_id),
        people_id: Set(people_id),
        ..Default::default()
    }
    .insert(db)
    .await?;
    let people = favorite.find_related(people::Entity).one(db).await?;

    Ok(FavoritePeopleView { favorite, people })
}

pub async fn add_favorite_planet(
    db: &DatabaseConnection,
    user_id: i32,
    planet_id: i32,
) -> Result<FavoritePlanetView, DbErr> {
    let favorite = favorite_planet::ActiveModel {
        user_id: Set(user_id),
        planet_id: Set(planet_id),
        ..Default::default()
    }
    .insert(db)
    .await?;
    let planet = favorite.find_related(planet::Entity).one(db).await?;

    Ok(FavoritePlanetView { favorite, planet })
}

pub async fn remove_favorite_person(
    db: &DatabaseConnection,
    user_id: i32,
    people_id: i32,
) -> Result<bool, DbErr> {
    let result = favorite_people::Entity::delete_many()
        .filter(favorite_people::Column::UserId.eq(user_id))
        .filter(favorite_people::Column::PeopleId.eq(people_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

pub async fn remove_favorite_planet(
    db: &DatabaseConnection,
    user_id: i32,
    planet_id: i32,
) -> Result<bool, DbErr> {
    let result = favorite_planet::Entity::delete_many()
        .filter(favorite_planet::Column::UserId.eq(user_id))
        .filter(favorite_planet::Column::PlanetId.eq(planet_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}
