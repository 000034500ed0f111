use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;

use crate::entity::{favorite_planet, planet};

#[derive(Debug, Default, Deserialize)]
pub struct PlanetFields {
    pub name: Option<String>,
    pub terrain: Option<String>,
    pub climate: Option<String>,
}

pub async fn list_planets(db: &DatabaseConnection) -> Result<Vec<planet::Model>, DbErr> {
    planet::Entity::find()
        .order_by_asc(planet::Column::Id)
        .all(db)
        .await
}

pub async fn find_planet(db: &DatabaseConnection, id: i32) -> Result<Option<planet::Model>, DbErr> {
    planet::Entity::find_by_id(id).one(db).await
}

pub async fn create_planet(
    db: &DatabaseConnection,
    name: String,
    terrain: String,
    climate: String,
) -> Result<planet::Model, DbErr> {
    planet::ActiveModel {
        name: Set(name),
        terrain: Set(terrain),
        climate: Set(climate),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn update_planet(
    db: &DatabaseConnection,
    id: i32,
    fields: PlanetFields,
) -> Result<Option<planet::Model>, DbErr> {
    let Some(existing) = planet::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let mut active: planet::ActiveModel = existing.clone().into();
    if let Some(name) = fields.name {
        active.name = Set(name);
    }
    if let Some(terrain) = fields.terrain {
        active.terrain = Set(terrain);
    }
    if let Some(climate) = fields.climate {
        active.climate = Set(climate);
    }
    if !active.is_changed() {
        return Ok(Some(existing));
    }

    active.update(db).await.map(Some)
}

/// Removes the planet and every favorite pointing at it in one transaction.
pub async fn delete_planet(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    let txn = db.begin().await?;

    let Some(existing) = planet::Entity::find_by_id(id).one(&txn).await? else {
        return Ok(false);
    };

    favorite_planet::Entity::delete_many()
        .filter(favorite_planet::Column::PlanetId.eq(id))
        .exec(&txn)
        .await?;
    existing.delete(&txn).await?;

    txn.commit().await?;
    Ok(true)
}
