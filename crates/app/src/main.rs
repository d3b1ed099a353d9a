use clap::Parser;
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod seed;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "payments")]
#[command(about = "Payment transactions service")]
struct Cli {
    /// Settings file, without extension (also read from `PAYMENTS_CONFIG`).
    #[arg(long, env = "PAYMENTS_CONFIG", default_value = "settings")]
    config: String,

    /// Seed the demo transactions even when `app.seed_demo` is off.
    #[arg(long)]
    seed_demo: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "payments={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.server.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    if settings.app.seed_demo || cli.seed_demo {
        tracing::info!("Seeding demo transactions...");
        seed::run(&engine).await?;
    }

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
