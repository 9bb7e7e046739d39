use std::path::Path;

use config::{Config, ConfigError, File};
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

const REST_PATH: &str = "/rest/v1";

/// Variable names the weather job has always been deployed with. They win over
/// the layered files and the `APP_` prefixed variables.
const LEGACY_OVERRIDES: [(&str, &str); 3] = [
    ("supabase.uri", "SUPABASE_URL"),
    ("supabase.key", "SUPABASE_KEY"),
    ("openweather.key", "OPENWEATHER_API_KEY"),
];

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub supabase: SupabaseSettings,
    pub openweather: OpenWeatherSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct SupabaseSettings {
    pub uri: String,
    pub key: Secret<String>,
}

impl SupabaseSettings {
    /// PostgREST endpoint for the project. Accepts either the bare project URL
    /// or one already pointing at `/rest/v1`.
    pub fn rest_endpoint(&self) -> String {
        let trimmed = self.uri.trim_end_matches('/');
        if trimmed.ends_with(REST_PATH) {
            trimmed.to_string()
        } else {
            format!("{}{}", trimmed, REST_PATH)
        }
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct OpenWeatherSettings {
    pub url: String,
    pub key: Secret<String>,
    /// Request timeout in seconds.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout: u64,
    /// ISO 3166 country code appended to every location query.
    #[serde(default)]
    pub country: Option<String>,
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    load_configuration(&configuration_directory, &environment)
}

pub fn load_configuration(
    configuration_directory: &Path,
    environment: &Environment,
) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder()
        .add_source(File::from(configuration_directory.join("base")).required(true))
        .add_source(File::from(configuration_directory.join(environment.as_str())).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .try_parsing(true)
                .separator("_"),
        );

    for (key, variable) in LEGACY_OVERRIDES {
        builder = builder.set_override_option(key, std::env::var(variable).ok())?;
    }

    builder.build()?.try_deserialize()
}

pub enum Environment {
    Local,
    Production,
}
impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}
impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
