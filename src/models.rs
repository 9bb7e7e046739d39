use std::fmt;

use chrono::{DateTime, Utc};

/// Identifier of a row in the `districts` table. The weather job never
/// interprets it, it is only echoed back as the `weather.district_id` key.
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum DistrictId {
    Number(i64),
    Uuid(uuid::Uuid),
    Text(String),
}

impl fmt::Display for DistrictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistrictId::Number(id) => write!(f, "{}", id),
            DistrictId::Uuid(id) => write!(f, "{}", id),
            DistrictId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug, PartialEq)]
pub struct District {
    pub id: DistrictId,
    pub name: String,
}

/// Current conditions for one location, as captured by a single fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReading {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: i32,
    pub wind_speed: f64,
    /// Degrees, meteorological convention.
    pub wind_direction: i32,
    /// hPa.
    pub pressure: i32,
    /// Meters.
    pub visibility: i32,
    pub description: String,
    /// When the reading was taken by this job, not the source's observation time.
    pub observed_at: DateTime<Utc>,
}

/// A row of the `weather` table. There is at most one per district.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct WeatherRecord {
    pub district_id: DistrictId,
    pub temperature: f64,
    pub humidity: i32,
    pub wind_speed: f64,
    pub wind_direction: i32,
    pub pressure: i32,
    pub visibility: i32,
    pub weather_desc: String,
    pub updated_at: DateTime<Utc>,
}

impl WeatherRecord {
    pub fn new(district_id: DistrictId, reading: &WeatherReading, updated_at: DateTime<Utc>) -> Self {
        Self {
            district_id,
            temperature: reading.temperature,
            humidity: reading.humidity,
            wind_speed: reading.wind_speed,
            wind_direction: reading.wind_direction,
            pressure: reading.pressure,
            visibility: reading.visibility,
            weather_desc: reading.description.clone(),
            updated_at,
        }
    }
}
