//! Thin proxy over the external geocoding/directions/places API.
//!
//! Responses are passed through as JSON, trimmed to the fields the frontend
//! actually renders. Upstream failures surface as degraded error responses,
//! never as crashes.

use serde_json::{json, Value};

use crate::server::error::AppError;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
const DISTANCE_MATRIX_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";
const NEARBY_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
const PLACE_DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";

pub struct MapsService {
    client: reqwest::Client,
    api_key: String,
}

impl MapsService {
    pub fn new(client: &reqwest::Client, api_key: &str) -> Self {
        Self {
            client: client.clone(),
            api_key: api_key.to_string(),
        }
    }

    /// `geocode(address) -> coordinates`; upstream payload passed through.
    pub async fn geocode(&self, address: &str) -> Result<Value, AppError> {
        self.fetch(GEOCODE_URL, &[("address", address)]).await
    }

    pub async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Value, AppError> {
        self.fetch(GEOCODE_URL, &[("latlng", &format!("{},{}", lat, lng))])
            .await
    }

    /// Directions between two places, trimmed to the first route's summary.
    pub async fn directions(&self, origin: &str, destination: &str) -> Result<Value, AppError> {
        let response = self
            .fetch(
                DIRECTIONS_URL,
                &[("origin", origin), ("destination", destination)],
            )
            .await?;

        let Some(route) = response["routes"].get(0) else {
            return Err(AppError::NotFound("No route found".to_string()));
        };
        let leg = &route["legs"][0];

        Ok(json!({
            "distance": leg["distance"]["text"],
            "duration": leg["duration"]["text"],
            "start_address": leg["start_address"],
            "end_address": leg["end_address"],
            "start_location": leg["start_location"],
            "end_location": leg["end_location"],
            "overview_polyline": route["overview_polyline"]["points"],
        }))
    }

    pub async fn distance_matrix(
        &self,
        origins: &str,
        destinations: &str,
    ) -> Result<Value, AppError> {
        self.fetch(
            DISTANCE_MATRIX_URL,
            &[("origins", origins), ("destinations", destinations)],
        )
        .await
    }

    /// Nearby places around a location, trimmed to the rendered fields.
    pub async fn nearby(
        &self,
        location: &str,
        radius: u32,
        kind: &str,
    ) -> Result<Value, AppError> {
        let response = self
            .fetch(
                NEARBY_URL,
                &[
                    ("location", location),
                    ("radius", &radius.to_string()),
                    ("type", kind),
                ],
            )
            .await?;

        let results = response["results"]
            .as_array()
            .map(|places| {
                places
                    .iter()
                    .map(|place| {
                        let mut clean = json!({
                            "name": place["name"],
                            "place_id": place["place_id"],
                            "vicinity": place["vicinity"],
                            "rating": place["rating"],
                            "user_ratings_total": place["user_ratings_total"],
                            "types": place["types"],
                            "location": place["geometry"]["location"],
                        });
                        if let Some(open) = place["opening_hours"]["open_now"].as_bool() {
                            clean["open_now"] = Value::Bool(open);
                        }
                        clean
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Ok(json!({ "results": results }))
    }

    /// Details for a single place by its id.
    pub async fn place_details(&self, place_id: &str) -> Result<Value, AppError> {
        let response = self
            .fetch(PLACE_DETAILS_URL, &[("place_id", place_id)])
            .await?;

        let result = &response["result"];
        if result.is_null() {
            return Err(AppError::NotFound("Place not found".to_string()));
        }

        Ok(json!({
            "name": result["name"],
            "formatted_address": result["formatted_address"],
            "formatted_phone_number": result["formatted_phone_number"],
            "rating": result["rating"],
            "website": result["website"],
            "location": result["geometry"]["location"],
            "types": result["types"],
        }))
    }

    async fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Result<Value, AppError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
