//! Single binary web server: HTML page at /, static assets from /static, JSON API under /api.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT,
//! INACTIVITY_TIMEOUT_HOURS, CLEANUP_INTERVAL_MINUTES.

use actix_files::Files;
use actix_web::{App, HttpServer};
use league_tournament_web::api::{self, new_state};
use league_tournament_web::{MemoryStore, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = new_state(MemoryStore::new());

    // Background task: periodically remove tournaments idle past the timeout
    let state_cleanup = state.clone();
    let (interval_every, max_idle) = (config.cleanup_interval, config.inactivity_timeout);
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(interval_every);
        loop {
            interval.tick().await;
            let mut store = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let removed = store.purge_inactive(max_idle);
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for {}h)",
                    removed,
                    max_idle.as_secs() / 3600
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::configure)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}
