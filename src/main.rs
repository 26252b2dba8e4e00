use actix_web::web;
use dotenvy::dotenv;
use sales_api::{build_server, InMemorySalesStore, SalesService, Settings};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env().map_err(std::io::Error::other)?;

    let store = if settings.seed_data {
        InMemorySalesStore::seeded()
    } else {
        InMemorySalesStore::new()
    };
    let service = web::Data::new(SalesService::new(store));

    log::info!(
        "Starting server at http://{}:{} (sample data: {})",
        settings.host,
        settings.port,
        settings.seed_data
    );

    build_server(service, &settings.host, settings.port)?.await
}
