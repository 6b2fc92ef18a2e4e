use astra::Server;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::store::Store;

mod actions;
mod auth;
mod catalog;
mod clock;
mod config;
mod db;
mod errors;
mod feed;
mod intake;
mod responses;
mod router;
mod state;
mod store;
mod templates;


fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = Config::from_env();

    // Degrades to the local fallback store on any init error.
    let store = Store::open(&cfg);
    if store.is_live() {
        tracing::info!("request database ready at {}", cfg.db_path.display());
    } else {
        tracing::info!("running in local mode; staff features disabled");
    }

    let state = AppState::new(store);

    let addr = cfg.addr;
    tracing::info!("listening on http://{addr}");
    let server = Server::bind(addr).max_workers(8);

    let result = server.serve(move |req, _info| match router::handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => responses::error_to_response(err),
    });

    if let Err(e) = result {
        tracing::error!("server ended with error: {e}");
    }
}
