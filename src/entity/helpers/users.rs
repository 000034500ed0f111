use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::entity::{favorite_people, favorite_planet, people, user};

/// Fields a client may send for a user; all optional so presence can be checked.
#[derive(Debug, Default, Deserialize)]
pub struct UserFields {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A user with its linked person inlined (`null` when unlinked).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    #[serde(flatten)]
    pub user: user::Model,
    pub people: Option<people::Model>,
}

impl From<(user::Model, Option<people::Model>)> for UserView {
    fn from((user, people): (user::Model, Option<people::Model>)) -> Self {
        Self { user, people }
    }
}

pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<UserView>, DbErr> {
    let rows = user::Entity::find()
        .find_also_related(people::Entity)
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(UserView::from).collect())
}

pub async fn find_user(db: &DatabaseConnection, id: i32) -> Result<Option<UserView>, DbErr> {
    let row = user::Entity::find_by_id(id)
        .find_also_related(people::Entity)
        .one(db)
        .await?;

    Ok(row.map(UserView::from))
}

pub async fn create_user(
    db: &DatabaseConnection,
    email: String,
    password: String,
) -> Result<UserView, DbErr> {
    let created = user::ActiveModel {
        email: Set(email),
        password: Set(password),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(UserView {
        user: created,
        people: None,
    })
}

pub async fn update_user(
    db: &DatabaseConnection,
    id: i32,
    fields: UserFields,
) -> Result<Option<UserView>, DbErr> {
    let Some(existing) = user::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let mut active: user::ActiveModel = existing.into();
    if let Some(email) = fields.email {
        active.email = Set(email);
    }
    if let Some(password) = fields.password {
        active.password = Set(password);
    }
    if active.is_changed() {
        active.update(db).await?;
    }

    find_user(db, id).await
}

/// Removes the user together with its favorites and unlinks its person.
pub async fn delete_user(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    let txn = db.begin().await?;

    let Some(existing) = user::Entity::find_by_id(id).one(&txn).await? else {
        return Ok(false);
    };

    favorite_people::Entity::delete_many()
        .filter(favorite_people::Column::UserId.eq(id))
        .exec(&txn)
        .await?;
    favorite_planet::Entity::delete_many()
        .filter(favorite_planet::Column::UserId.eq(id))
        .exec(&txn)
        .await?;
    people::Entity::update_many()
        .col_expr(people::Column::UserId, Expr::value(Option::<i32>::None))
        .filter(people::Column::UserId.eq(id))
        .exec(&txn)
        .await?;
    existing.delete(&txn).await?;

    txn.commit().await?;
    Ok(true)
}
