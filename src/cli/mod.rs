use crate::data::configuration::Configuration;
use crate::data::dbconnector::{SQLConnector, StoreConnection};
use crate::server;
use clap::Parser;
use log::{debug, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,
    #[arg(short, long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(short, long, default_value_t = String::from("configuration.toml"))]
    pub configuration_path: String,
}

pub async fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    debug!("Configuration path: {}", args.configuration_path);

    let mut config = Configuration::load(&args.configuration_path)?;
    config.apply_overrides(args.port, args.database_url);
    debug!("Loaded configuration: {config:?}");

    // Check the database connection
    let mut db_connector = SQLConnector::new(&config.database.url);
    db_connector.connect().await?;
    db_connector.check().await?;
    // Have the tables been created?
    if db_connector.is_initialized().await? {
        info!("Database is initialized");
    } else {
        info!("Database is not initialized, performing initialization");
        db_connector.initialize().await?;
    }

    server::run(config, db_connector).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_accept_explicit_flags() {
        let args = Args::try_parse_from([
            "holocron",
            "--port",
            "8081",
            "--database-url",
            "sqlite::memory:",
        ])
        .unwrap();
        assert_eq!(args.port, Some(8081));
        assert_eq!(args.database_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(args.configuration_path, "configuration.toml");
    }

    #[test]
    fn args_reject_non_numeric_port() {
        assert!(Args::try_parse_from(["holocron", "--port", "http"]).is_err());
    }
}
