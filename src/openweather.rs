//! Current-weather lookups against the OpenWeather `weather` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::configuration::OpenWeatherSettings;
use crate::error::{error_chain, FetchError};
use crate::models::WeatherReading;

/// Something that can report the current weather for a place name.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<WeatherReading, FetchError>;
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    main: MainBlock,
    visibility: i32,
    wind: WindBlock,
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: i32,
    pressure: i32,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
    deg: i32,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
}

pub struct OpenWeatherClient {
    client: Client,
    url: String,
    key: Secret<String>,
    country: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(settings: &OpenWeatherSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout))
            .build()?;

        Ok(Self {
            client,
            url: settings.url.clone(),
            key: settings.key.clone(),
            country: settings.country.clone().filter(|c| !c.trim().is_empty()),
        })
    }

    fn query(&self, location: &str) -> String {
        match &self.country {
            Some(country) => format!("{},{}", location, country),
            None => location.to_string(),
        }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch(&self, location: &str) -> Result<WeatherReading, FetchError> {
        if location.trim().is_empty() {
            return Err(FetchError::InvalidLocation {
                location: location.to_string(),
            });
        }

        let transport = |e: reqwest::Error| FetchError::Transport {
            location: location.to_string(),
            message: error_chain(&e.without_url()),
        };

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("q", self.query(location).as_str()),
                ("appid", self.key.expose_secret().as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        debug!("OpenWeather answered {} for {}", status, location);

        if !status.is_success() {
            return Err(FetchError::Remote {
                location: location.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        parse_reading(location, &body)
    }
}

fn parse_reading(location: &str, body: &str) -> Result<WeatherReading, FetchError> {
    let malformed = |reason: String| FetchError::Malformed {
        location: location.to_string(),
        reason,
    };

    let payload: CurrentWeatherResponse =
        serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;

    let description = payload
        .weather
        .into_iter()
        .next()
        .map(|condition| condition.description)
        .ok_or_else(|| malformed("empty `weather` list".to_string()))?;

    Ok(WeatherReading {
        temperature: payload.main.temp,
        humidity: payload.main.humidity,
        wind_speed: payload.wind.speed,
        wind_direction: payload.wind.deg,
        pressure: payload.main.pressure,
        visibility: payload.visibility,
        description,
        observed_at: Utc::now(),
    })
}
