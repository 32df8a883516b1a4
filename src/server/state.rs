//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each
//! request handler through Axum's state extraction. All fields are cheap to
//! clone: the database connection is a pool handle, the HTTP client and
//! broadcaster are internally reference-counted, and the token service holds
//! only key material.

use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    realtime::ChatBroadcaster,
    service::{email::EmailService, token::TokenService},
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for outbound maps and weather requests.
    pub http_client: reqwest::Client,

    /// Signs and validates session tokens.
    pub tokens: TokenService,

    /// Fire-and-forget SMTP sender.
    pub email: EmailService,

    /// Per-group chat broadcast channels.
    pub chat: ChatBroadcaster,

    /// Application base URL, used to build public share links.
    pub app_url: String,

    pub maps_api_key: String,
    pub weather_api_key: String,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        email: EmailService,
        config: &Config,
    ) -> Self {
        Self {
            db,
            http_client,
            tokens: TokenService::new(&config.jwt_secret),
            email,
            chat: ChatBroadcaster::new(),
            app_url: config.app_url.clone(),
            maps_api_key: config.maps_api_key.clone(),
            weather_api_key: config.weather_api_key.clone(),
        }
    }
}
