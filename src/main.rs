use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use board_agenda::commit::{CommitCoordinator, Subversion};
use board_agenda::config::AppConfig;
use board_agenda::handlers;
use board_agenda::models::agenda::MinutesArchive;
use board_agenda::models::pending::YamlPendingStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    log::info!(
        "Agenda directory {}, pending sessions in {}",
        config.board_dir.display(),
        config.work_dir.display()
    );

    let coordinator = web::Data::new(CommitCoordinator::new(
        config.board_dir.clone(),
        Subversion::new(config.svn_bin.clone()),
        YamlPendingStore::new(config.work_dir.clone()),
        MinutesArchive::new(config.minutes_url.clone()),
    ));

    // Session encryption key: load from SESSION_KEY for sessions that survive restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(coordinator.clone())
            .configure(handlers::configure::<Subversion, YamlPendingStore, MinutesArchive>)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
