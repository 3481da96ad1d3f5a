use migration::{Migrator, MigratorTrait};
use server::{EmailSettings, Notifier};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "hopehub={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.server.database).await?;

    let engine = engine::Engine::builder().database(db.clone()).build().await?;

    let notifier = match settings.email {
        Some(email) => Notifier::new(Some(EmailSettings {
            api_url: email.api_url,
            api_key: email.api_key,
            sender_name: email.sender_name,
            sender_email: email.sender_email,
        })),
        None => {
            tracing::info!("No email settings found, delivery disabled");
            Notifier::disabled()
        }
    };

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    server::run_with_listener(engine, db, notifier, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
