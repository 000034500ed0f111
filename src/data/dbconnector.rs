use anyhow::Context;
use log::{debug, info};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, EntityName,
    EntityTrait, Schema, Statement,
};

use crate::entity::{favorite_people, favorite_planet, people, planet, user, vehicle};

#[allow(async_fn_in_trait)]
pub trait StoreConnection {
    async fn connect(&mut self) -> Result<(), anyhow::Error>;
    async fn check(&self) -> Result<(), anyhow::Error>;
    async fn is_initialized(&self) -> Result<bool, anyhow::Error>;
    async fn initialize(&self) -> Result<(), anyhow::Error>;
    async fn close(&self) -> Result<(), anyhow::Error>;
}

/// Owns the single store connection shared by every request handler.
pub struct SQLConnector {
    url: String,
    database_connection: Option<DatabaseConnection>,
}

impl SQLConnector {
    pub fn new(url: &str) -> Self {
        SQLConnector {
            url: url.to_string(),
            database_connection: None,
        }
    }

    pub fn db(&self) -> Result<&DatabaseConnection, DbErr> {
        self.database_connection
            .as_ref()
            .ok_or_else(|| DbErr::Custom("database is not connected".to_string()))
    }
}

// Parents first so foreign keys resolve at creation time.
fn table_names() -> Vec<String> {
    vec![
        user::Entity.table_name().to_string(),
        people::Entity.table_name().to_string(),
        vehicle::Entity.table_name().to_string(),
        planet::Entity.table_name().to_string(),
        favorite_people::Entity.table_name().to_string(),
        favorite_planet::Entity.table_name().to_string(),
    ]
}

async fn table_exists(db: &DatabaseConnection, table: &str) -> Result<bool, DbErr> {
    let backend = db.get_database_backend();
    let sql = match backend {
        DbBackend::Postgres => {
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = current_schema() AND table_name = $1"
        }
        DbBackend::MySql => {
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = DATABASE() AND table_name = ?"
        }
        _ => "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
    };

    let row = db
        .query_one(Statement::from_sql_and_values(backend, sql, [table.into()]))
        .await?;
    Ok(row.is_some())
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(db.get_database_backend().build(&statement)).await?;
    Ok(())
}

impl StoreConnection for SQLConnector {
    async fn connect(&mut self) -> Result<(), anyhow::Error> {
        let mut options = ConnectOptions::new(self.url.clone());
        options.sqlx_logging_level(log::LevelFilter::Debug);

        let db = Database::connect(options)
            .await
            .with_context(|| format!("failed to connect to {}", self.url))?;

        self.database_connection = Some(db);
        Ok(())
    }

    async fn check(&self) -> Result<(), anyhow::Error> {
        if let Some(ref db) = self.database_connection {
            db.ping().await?;
        }
        Ok(())
    }

    async fn is_initialized(&self) -> Result<bool, anyhow::Error> {
        let db = self.db()?;
        for table in table_names() {
            if !table_exists(db, &table).await? {
                debug!("Table {table} is missing");
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn initialize(&self) -> Result<(), anyhow::Error> {
        let db = self.db()?;
        let schema = Schema::new(db.get_database_backend());

        create_table(db, &schema, user::Entity).await?;
        create_table(db, &schema, people::Entity).await?;
        create_table(db, &schema, vehicle::Entity).await?;
        create_table(db, &schema, planet::Entity).await?;
        create_table(db, &schema, favorite_people::Entity).await?;
        create_table(db, &schema, favorite_planet::Entity)
            .await
            .context("failed to create tables")?;

        info!("Created tables: {}", table_names().join(", "));
        Ok(())
    }

    async fn close(&self) -> Result<(), anyhow::Error> {
        if let Some(ref db) = self.database_connection {
            let db = db.clone();
            db.close().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn connected(dir: &tempfile::TempDir) -> SQLConnector {
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("store.db").display());
        let mut connector = SQLConnector::new(&url);
        connector.connect().await.unwrap();
        connector
    }

    #[test]
    fn unconnected_store_reports_error() {
        let connector = SQLConnector::new("sqlite::memory:");
        assert!(connector.db().is_err());
    }

    #[tokio::test]
    async fn initialize_creates_every_table() {
        let dir = tempfile::tempdir().unwrap();
        let connector = connected(&dir).await;
        connector.check().await.unwrap();

        assert!(!connector.is_initialized().await.unwrap());
        connector.initialize().await.unwrap();
        assert!(connector.is_initialized().await.unwrap());

        connector.close().await.unwrap();
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let connector = connected(&dir).await;

        connector.initialize().await.unwrap();
        connector.initialize().await.unwrap();
        assert!(connector.is_initialized().await.unwrap());
    }
}
