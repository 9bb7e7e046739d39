//! District directory and weather store backed by Supabase's PostgREST API.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use postgrest::Postgrest;
use secrecy::ExposeSecret;

use crate::configuration::SupabaseSettings;
use crate::error::{error_chain, DirectoryError, WriteError};
use crate::models::{District, DistrictId, WeatherReading, WeatherRecord};

const DISTRICTS_TABLE: &str = "districts";
const WEATHER_TABLE: &str = "weather";
const CONFLICT_KEY: &str = "district_id";

#[async_trait]
pub trait DistrictDirectory: Send + Sync {
    /// All known districts. An empty table is reported as [`DirectoryError::Empty`].
    async fn list_districts(&self) -> Result<Vec<District>, DirectoryError>;
}

#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Replaces the stored weather of `district_id`, creating it on first write.
    async fn upsert(
        &self,
        district_id: &DistrictId,
        reading: &WeatherReading,
    ) -> Result<WeatherRecord, WriteError>;
}

#[derive(Clone)]
pub struct SupabaseClient {
    client: Arc<Postgrest>,
}

impl SupabaseClient {
    pub fn new(settings: &SupabaseSettings) -> Self {
        let key = settings.key.expose_secret();
        let client = Postgrest::new(settings.rest_endpoint())
            .insert_header("apikey", key)
            .insert_header("Authorization", format!("Bearer {}", key));

        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl DistrictDirectory for SupabaseClient {
    async fn list_districts(&self) -> Result<Vec<District>, DirectoryError> {
        let response = self
            .client
            .from(DISTRICTS_TABLE)
            .select("id,name")
            .execute()
            .await
            .map_err(|e| DirectoryError::Unavailable(error_chain(&e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DirectoryError::Unavailable(error_chain(&e.without_url())))?;

        if !status.is_success() {
            return Err(DirectoryError::Unavailable(format!("{} {}", status, body)));
        }

        let districts: Vec<District> = serde_json::from_str(&body)
            .map_err(|e| DirectoryError::Unavailable(format!("undecodable district list: {}", e)))?;

        if districts.is_empty() {
            return Err(DirectoryError::Empty);
        }

        debug!("Loaded {} districts", districts.len());
        Ok(districts)
    }
}

/// Body of a rejected request, or why it could not be read.
fn response_body<E: std::error::Error>(body: Result<String, E>) -> String {
    body.unwrap_or_else(|e| format!("<unreadable body: {}>", error_chain(&e)))
}

#[async_trait]
impl WeatherStore for SupabaseClient {
    async fn upsert(
        &self,
        district_id: &DistrictId,
        reading: &WeatherReading,
    ) -> Result<WeatherRecord, WriteError> {
        let record = WeatherRecord::new(district_id.clone(), reading, Utc::now());
        let body = serde_json::to_string(&record).map_err(|source| WriteError::Encode {
            district_id: district_id.clone(),
            source,
        })?;
        debug!("Upserting {}", body);

        let response = self
            .client
            .from(WEATHER_TABLE)
            .upsert(body)
            .on_conflict(CONFLICT_KEY)
            .execute()
            .await
            .map_err(|e| WriteError::Transport {
                district_id: district_id.clone(),
                message: error_chain(&e.without_url()),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WriteError::Rejected {
                district_id: district_id.clone(),
                status: status.as_u16(),
                body: response_body(response.text().await.map_err(|e| e.without_url())),
            });
        }

        Ok(record)
    }
}
