use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;

use crate::entity::{favorite_people, people};

#[derive(Debug, Default, Deserialize)]
pub struct PeopleFields {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub user_id: Option<i32>,
}

pub async fn list_people(db: &DatabaseConnection) -> Result<Vec<people::Model>, DbErr> {
    people::Entity::find()
        .order_by_asc(people::Column::Id)
        .all(db)
        .await
}

pub async fn find_person(db: &DatabaseConnection, id: i32) -> Result<Option<people::Model>, DbErr> {
    people::Entity::find_by_id(id).one(db).await
}

pub async fn create_person(
    db: &DatabaseConnection,
    name: String,
    gender: String,
    user_id: Option<i32>,
) -> Result<people::Model, DbErr> {
    people::ActiveModel {
        name: Set(name),
        gender: Set(gender),
        user_id: Set(user_id),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn update_person(
    db: &DatabaseConnection,
    id: i32,
    fields: PeopleFields,
) -> Result<Option<people::Model>, DbErr> {
    let Some(existing) = people::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let mut active: people::ActiveModel = existing.clone().into();
    if let Some(name) = fields.name {
        active.name = Set(name);
    }
    if let Some(gender) = fields.gender {
        active.gender = Set(gender);
    }
    if let Some(user_id) = fields.user_id {
        active.user_id = Set(Some(user_id));
    }
    if !active.is_changed() {
        return Ok(Some(existing));
    }

    active.update(db).await.map(Some)
}

pub async fn delete_person(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    let txn = db.begin().await?;

    let Some(existing) = people::Entity::find_by_id(id).one(&txn).await? else {
        return Ok(false);
    };

    favorite_people::Entity::delete_many()
        .filter(favorite_people::Column::PeopleId.eq(id))
        .exec(&txn)
        .await?;
    existing.delete(&txn).await?;

    txn.commit().await?;
    Ok(true)
}
