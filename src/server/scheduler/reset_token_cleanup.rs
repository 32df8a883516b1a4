use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{data::password_reset_token::PasswordResetTokenRepository, error::AppError};

/// Starts the hourly purge of expired password reset tokens.
///
/// Consumed tokens are kept (the `used` flag is the single-use record);
/// expired ones carry no information worth retaining and are deleted.
///
/// # Arguments
/// - `db` - Database connection used by the recurring job
pub async fn start_scheduler(db: DatabaseConnection) -> Result<(), AppError> {
    let scheduler = JobScheduler::new()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create scheduler: {}", e)))?;

    let job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            if let Err(e) = purge_expired(&db).await {
                tracing::error!("Error purging expired reset tokens: {}", e);
            }
        })
    })
    .map_err(|e| AppError::InternalError(format!("Failed to create cleanup job: {}", e)))?;

    scheduler
        .add(job)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to schedule cleanup job: {}", e)))?;
    scheduler
        .start()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to start scheduler: {}", e)))?;

    tracing::info!("Reset token cleanup scheduler started");

    Ok(())
}

async fn purge_expired(db: &DatabaseConnection) -> Result<(), AppError> {
    let purged = PasswordResetTokenRepository::new(db)
        .delete_expired(Utc::now())
        .await?;

    if purged > 0 {
        tracing::info!("Purged {} expired password reset tokens", purged);
    }

    Ok(())
}
