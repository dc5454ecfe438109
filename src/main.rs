use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;

use bookshelf::{routes, AppState, Config, MongoBookStore};

// Variables already present in the environment take precedence over `.env`.
fn load_env() -> Result<std::path::PathBuf, dotenv::Error> {
    dotenv::from_filename(".env")
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let env_file = load_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = env_file {
        log::warn!("no .env file loaded: {}", e);
    }

    let config = Config::from_env().context("failed to load configuration")?;
    log::info!(
        "starting bookshelf on {}:{} (database {:?})",
        config.host,
        config.port,
        config.database
    );

    let store = MongoBookStore::connect(&config.mongo_url, &config.database)
        .await
        .context("failed to connect to MongoDB")?;
    log::info!("connected to MongoDB");

    let state = web::Data::new(AppState::new(store));

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::config)
    })
    .bind(config.bind_addr())
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
