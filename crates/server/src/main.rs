mod config;
mod http;
mod state;

use std::sync::Arc;

use adapter::{ContentModerator, EmotionAnalysisService};
use anyhow::Context;
use domain::moderation::RandomSelector;
use domain::{Blacklist, ContentValidator, IvoirianDictionary, LocalModerator, RejectionPolicy};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Settings;
use http::router::build_router;
use state::AppState;
use storage::Db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::new().context("Failed to load configuration")?;

    let db = Db::new(&settings.database.url).await?;

    let provider = adapter::build_provider(settings.llm.to_openrouter())
        .context("Failed to build model provider")?;

    let blacklist =
        Blacklist::with_custom_words(settings.moderation.custom_banned_words.iter().cloned());
    let policy = RejectionPolicy::new(
        settings.moderation.rejection_messages.clone(),
        Arc::new(RandomSelector),
    );
    let moderator = ContentModerator::new(
        LocalModerator::new(blacklist, policy),
        provider.clone(),
        settings.moderation.on_remote_failure,
    );
    let analyzer = EmotionAnalysisService::new(IvoirianDictionary::new(), provider);

    let state = AppState {
        db,
        moderator: Arc::new(moderator),
        analyzer: Arc::new(analyzer),
        validator: ContentValidator::new(),
        admin_token: settings.security.admin_token.clone(),
    };

    let app = build_router(state, &settings.server.cors_origins);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address: {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
