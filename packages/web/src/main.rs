use api::auth::SessionCodec;
use api::Settings;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use state::AppState;

mod error;
mod routes;
mod state;
mod views;

#[derive(Debug, Error)]
enum LaunchError {
    #[error(transparent)]
    Api(#[from] api::Error),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = launch_server().await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn launch_server() -> Result<(), LaunchError> {
    // Refuses to start without SESSION_SECRET.
    let settings = Settings::new().map_err(api::Error::from)?;

    let sessions = SessionCodec::new(&settings.session_secret, settings.is_production())?;
    let pool = api::db::connect(&settings.database_url).await?;
    let router = routes::router(AppState::new(pool, sessions));

    let listener = tokio::net::TcpListener::bind(&settings.server_address).await?;
    tracing::info!("Server listening on {}", settings.server_address);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
