use dotenvy::dotenv;
use salon_service::{build_server, create_pool, run_migrations, Settings};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env().expect("Invalid configuration");
    let pool = create_pool(&settings.database_url, settings.pool_size)
        .expect("Failed to create database pool");
    run_migrations(&pool).expect("Failed to run database migrations");

    log::info!(
        "Starting {} at http://{}:{}",
        settings.salon_name,
        settings.host,
        settings.port
    );

    build_server(pool, &settings)?.await
}
