use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub app_url: String,

    pub jwt_secret: String,

    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub email_from: String,
    pub email_admin: String,

    pub maps_api_key: String,
    pub weather_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_addr: std::env::var("BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            app_url: std::env::var("APP_URL")
                .map_err(|_| ConfigError::MissingEnvVar("APP_URL".to_string()))?,
            jwt_secret: std::env::var("JWT_SECRET")
                .map_err(|_| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?,
            smtp_host: std::env::var("SMTP_HOST")
                .map_err(|_| ConfigError::MissingEnvVar("SMTP_HOST".to_string()))?,
            smtp_username: std::env::var("SMTP_USERNAME")
                .map_err(|_| ConfigError::MissingEnvVar("SMTP_USERNAME".to_string()))?,
            smtp_password: std::env::var("SMTP_PASSWORD")
                .map_err(|_| ConfigError::MissingEnvVar("SMTP_PASSWORD".to_string()))?,
            email_from: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "noreply@wayshare.example".to_string()),
            email_admin: std::env::var("EMAIL_ADMIN")
                .unwrap_or_else(|_| "admin@wayshare.example".to_string()),
            maps_api_key: std::env::var("MAPS_API_KEY")
                .map_err(|_| ConfigError::MissingEnvVar("MAPS_API_KEY".to_string()))?,
            weather_api_key: std::env::var("WEATHER_API_KEY")
                .map_err(|_| ConfigError::MissingEnvVar("WEATHER_API_KEY".to_string()))?,
        })
    }
}
