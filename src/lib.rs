//! Refreshes the current weather of every district stored in Supabase.
//!
//! A run lists the `districts` table, asks OpenWeather for the current
//! conditions of each district by name and upserts the result into the
//! `weather` table, one row per district.

pub mod batch;
pub mod configuration;
pub mod error;
pub mod models;
pub mod openweather;
pub mod supabase;

pub use batch::{DistrictOutcome, Orchestrator, RunReport};
pub use openweather::{OpenWeatherClient, WeatherSource};
pub use supabase::{DistrictDirectory, SupabaseClient, WeatherStore};
