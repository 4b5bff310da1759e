mod app;
mod config;
mod cookies;
mod error;
mod issues;
mod session;
mod state;
mod views;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "civictrack=debug,axum=info,tower_http=info".to_string());
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

    let app_state = state::AppState::init();
    let (host, port) = (app_state.config.host.clone(), app_state.config.port);
    tracing::info!(issues = app_state.issues.len(), "seed issues loaded");

    app::serve(app::build_app(app_state), &host, port).await
}
