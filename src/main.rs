mod app;
mod auth;
mod config;
mod error;
mod state;

use crate::{app::build_app, config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "gearshare_auth=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    if config.db.uses_placeholders() {
        tracing::warn!(db = ?config.db, "database settings still use placeholder defaults; set DB_HOST/DB_PASSWORD");
    }

    let app_state = AppState::init(config);
    let config = app_state.config.clone();
    let app = build_app(app_state);

    app::serve(app, &config).await
}
