use std::io;

use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use env_logger::Env;
use tera::Tera;

use travel_offers::models::config::ServerConfig;
use travel_offers::repository::ApiClient;
use travel_offers::routes::{configure, not_found};
use travel_offers::session::session_middleware;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        io::Error::other(e)
    })?;

    env_logger::init_from_env(Env::default().default_filter_or(config.log_level.clone()));

    let tera = Tera::new(&format!("{}/**/*", config.templates_dir)).map_err(|e| {
        log::error!("Failed to parse templates: {e}");
        io::Error::other(e)
    })?;

    let api = ApiClient::new(config.api_url.clone()).map_err(|e| {
        log::error!("Invalid API base URL '{}': {e}", config.api_url);
        io::Error::other(e)
    })?;

    let key = Key::derive_from(config.secret.as_bytes());
    let message_store = CookieMessageStore::builder(key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let api = web::Data::new(api);
    let tera = web::Data::new(tera);
    let cookie_secure = config.cookie_secure;
    let static_dir = config.static_dir.clone();
    let bind_address = config.bind_address();

    log::info!(
        "Starting travel offers on {}:{} against {}",
        bind_address.0,
        bind_address.1,
        api.base_url()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(session_middleware(key.clone(), cookie_secure))
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", static_dir.clone()))
            .app_data(api.clone())
            .app_data(tera.clone())
            .configure(configure)
            .default_service(web::route().to(not_found))
    })
    .bind(bind_address)?
    .run()
    .await
}
