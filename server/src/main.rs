mod routes;
mod services;
mod state;

use services::ai::AiClient;
use services::apktool::ApkTool;
use services::project::ProjectStore;
use services::signer::Signer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = state::ServerConfig::from_env();

    let store = ProjectStore::new(&config.projects_dir).expect("projects directory init failed");

    // External tools are optional: their operations fail with a clear
    // message instead of blocking startup.
    let apktool = match ApkTool::discover() {
        Ok(tool) => Some(tool),
        Err(e) => {
            tracing::warn!(error = %e, "apktool unavailable; decompile and compile are disabled");
            None
        }
    };

    let signer = match Signer::from_env() {
        Ok(signer) => Some(signer),
        Err(e) => {
            tracing::warn!(error = %e, "signer unavailable; signing is disabled");
            None
        }
    };

    let ai = match AiClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "AI probe client initialized");
            Some(client)
        }
        Err(e) => {
            tracing::warn!(error = %e, "AI probe not configured");
            None
        }
    };

    let app_state = state::AppState::new(store, apktool, signer, ai, config.limits);
    let app = routes::app(app_state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "apkforge listening");
    axum::serve(listener, app).await.expect("server failed");
}
