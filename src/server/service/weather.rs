//! Thin proxy over the external weather API. Public endpoints; metric units.

use serde_json::Value;

use crate::server::error::AppError;

const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

pub struct WeatherService {
    client: reqwest::Client,
    api_key: String,
}

impl WeatherService {
    pub fn new(client: &reqwest::Client, api_key: &str) -> Self {
        Self {
            client: client.clone(),
            api_key: api_key.to_string(),
        }
    }

    /// Current weather by coordinates.
    pub async fn current(&self, lat: f64, lon: f64) -> Result<Value, AppError> {
        self.fetch(&[
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
        ])
        .await
    }

    /// Current weather by city name.
    pub async fn by_city(&self, city: &str) -> Result<Value, AppError> {
        self.fetch(&[("q", city.to_string())]).await
    }

    async fn fetch(&self, params: &[(&str, String)]) -> Result<Value, AppError> {
        let response = self
            .client
            .get(CURRENT_WEATHER_URL)
            .query(params)
            .query(&[
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "en"),
            ])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
