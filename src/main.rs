mod model;
mod server;

use crate::server::{config::Config, router, startup, state::AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    if let Err(e) = run().await {
        tracing::error!("Fatal startup error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), server::error::AppError> {
    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client();
    let mailer = startup::setup_mailer(&config)?;

    let state = AppState::new(db.clone(), http_client, mailer, &config);

    // Background purge of expired password reset tokens.
    let scheduler_db = db.clone();
    tokio::spawn(async move {
        if let Err(e) = server::scheduler::reset_token_cleanup::start_scheduler(scheduler_db).await
        {
            tracing::error!("Reset token cleanup scheduler error: {}", e);
        }
    });

    let app = router::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| {
            server::error::AppError::InternalError(format!(
                "Failed to bind {}: {}",
                config.bind_addr, e
            ))
        })?;

    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.map_err(|e| {
        server::error::AppError::InternalError(format!("Server error: {}", e))
    })?;

    Ok(())
}
