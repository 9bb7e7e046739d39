//! Shared fixtures for the HTTP boundary tests.
#![allow(dead_code)]

use district_weather::configuration::{OpenWeatherSettings, SupabaseSettings};
use secrecy::Secret;
use wiremock::MockServer;

pub const WEATHER_PATH: &str = "/data/2.5/weather";
pub const WEATHER_KEY: &str = "test-weather-key";
pub const SERVICE_KEY: &str = "test-service-key";

pub fn openweather_settings(server: &MockServer) -> OpenWeatherSettings {
    OpenWeatherSettings {
        url: format!("{}{}", server.uri(), WEATHER_PATH),
        key: Secret::new(WEATHER_KEY.to_string()),
        timeout: 5,
        country: None,
    }
}

pub fn supabase_settings(server: &MockServer) -> SupabaseSettings {
    SupabaseSettings {
        uri: server.uri(),
        key: Secret::new(SERVICE_KEY.to_string()),
    }
}

/// OpenWeather's answer for Springfield.
pub fn springfield_weather() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -89.64, "lat": 39.8},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "base": "stations",
        "main": {"temp": 21.3, "feels_like": 20.9, "pressure": 1012, "humidity": 40},
        "visibility": 10000,
        "wind": {"speed": 3.1, "deg": 180},
        "dt": 1714564800,
        "name": "Springfield",
        "cod": 200
    })
}
