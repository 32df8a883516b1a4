use crate::server::{config::Config, error::AppError, service::email::EmailService};

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from
/// configuration, then runs all pending migrations so the schema is
/// up-to-date before the application accepts requests.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect or migrate
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the outbound HTTP client.
///
/// Redirects are disabled so upstream responses cannot bounce requests to
/// unexpected hosts.
pub fn setup_reqwest_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("reqwest client configuration is static")
}

/// Builds the SMTP mailer from configuration.
pub fn setup_mailer(config: &Config) -> Result<EmailService, AppError> {
    EmailService::new(
        &config.smtp_host,
        config.smtp_username.clone(),
        config.smtp_password.clone(),
        config.email_from.clone(),
        config.email_admin.clone(),
    )
    .map_err(|e| AppError::InternalError(format!("Failed to configure SMTP transport: {}", e)))
}
