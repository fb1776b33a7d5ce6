use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use voice_skill::adapters::ai::{OpenAIProvider, RelayProvider};
use voice_skill::adapters::http::{skill_router, SkillAppState};
use voice_skill::application::RequestDispatcher;
use voice_skill::config::{AiBackend, AppConfig, ConfigError, LogFormat, ServerConfig, ValidationError};
use voice_skill::ports::{AIError, AIProvider};

/// Failures that stop the service before it starts answering.
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Could not build AI provider: {0}")]
    Provider(#[from] AIError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let provider = build_provider(&config)?;
    tracing::info!(
        backend = ?config.ai.backend,
        provider = %provider.provider_info().name,
        model = %provider.provider_info().model,
        "AI backend ready"
    );

    let dispatcher = RequestDispatcher::standard(provider, config.ask_question_config());
    tracing::debug!(handlers = ?dispatcher.handler_names(), "Handlers registered");

    let app = skill_router(
        SkillAppState::new(Arc::new(dispatcher)),
        &config.server.skill_path,
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        path = %config.server.skill_path,
        environment = ?config.server.environment,
        "Voice skill listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Voice skill stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(server: &ServerConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn build_provider(config: &AppConfig) -> Result<Arc<dyn AIProvider>, StartupError> {
    let provider: Arc<dyn AIProvider> = match config.ai.backend {
        AiBackend::Direct => {
            let openai = config
                .ai
                .openai_config()
                .ok_or(ValidationError::MissingRequired("OPENAI_API_KEY"))?;
            Arc::new(OpenAIProvider::new(openai)?)
        }
        AiBackend::Relay => {
            let relay = config
                .ai
                .relay_config()
                .ok_or(ValidationError::MissingRequired("RELAY_URL"))?;
            Arc::new(RelayProvider::new(relay)?)
        }
    };
    Ok(provider)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
