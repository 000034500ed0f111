use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryOrder, Set,
};
use serde::Deserialize;

use crate::entity::vehicle;

#[derive(Debug, Default, Deserialize)]
pub struct VehicleFields {
    pub name: Option<String>,
    pub model: Option<String>,
}

pub async fn list_vehicles(db: &DatabaseConnection) -> Result<Vec<vehicle::Model>, DbErr> {
    vehicle::Entity::find()
        .order_by_asc(vehicle::Column::Id)
        .all(db)
        .await
}

pub async fn find_vehicle(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<vehicle::Model>, DbErr> {
    vehicle::Entity::find_by_id(id).one(db).await
}

pub async fn create_vehicle(
    db: &DatabaseConnection,
    name: String,
    model: String,
) -> Result<vehicle::Model, DbErr> {
    vehicle::ActiveModel {
        name: Set(name),
        vehicle_model: Set(model),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn update_vehicle(
    db: &DatabaseConnection,
    id: i32,
    fields: VehicleFields,
) -> Result<Option<vehicle::Model>, DbErr> {
    let Some(existing) = vehicle::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let mut active: vehicle::ActiveModel = existing.clone().into();
    if let Some(name) = fields.name {
        active.name = Set(name);
    }
    if let Some(model) = fields.model {
        active.vehicle_model = Set(model);
    }
    if !active.is_changed() {
        return Ok(Some(existing));
    }

    active.update(db).await.map(Some)
}

pub async fn delete_vehicle(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    match vehicle::Entity::find_by_id(id).one(db).await? {
        Some(existing) => {
            existing.delete(db).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}
