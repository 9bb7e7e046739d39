//! One pass over every district: fetch its current weather, then store it.
//!
//! Districts are handled strictly one after the other. A failed fetch or write
//! is logged and recorded for that district only; the pass always moves on to
//! the next one. Only a directory that cannot be read, or that is empty, stops
//! the run before any district is touched.

use log::{error, info};

use crate::error::{DirectoryError, DistrictError};
use crate::models::{District, WeatherRecord};
use crate::openweather::WeatherSource;
use crate::supabase::{DistrictDirectory, WeatherStore};

#[derive(Debug)]
pub struct DistrictOutcome {
    pub district: District,
    pub result: Result<WeatherRecord, DistrictError>,
}

#[derive(Debug, Default)]
pub struct RunReport {
    /// Set when the district list could not be obtained; `outcomes` is then empty.
    pub aborted: Option<DirectoryError>,
    /// One entry per district, in directory order.
    pub outcomes: Vec<DistrictOutcome>,
}

impl RunReport {
    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &WeatherRecord> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&District, &DistrictError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.district, e)))
    }
}

pub struct Orchestrator<D, S, W> {
    directory: D,
    source: S,
    store: W,
}

impl<D, S, W> Orchestrator<D, S, W>
where
    D: DistrictDirectory,
    S: WeatherSource,
    W: WeatherStore,
{
    pub fn new(directory: D, source: S, store: W) -> Self {
        Self {
            directory,
            source,
            store,
        }
    }

    pub async fn run(&self) -> RunReport {
        let districts = match self.directory.list_districts().await {
            Ok(districts) => districts,
            Err(e) => {
                error!("{}", e);
                return RunReport {
                    aborted: Some(e),
                    outcomes: Vec::new(),
                };
            }
        };

        let mut outcomes = Vec::with_capacity(districts.len());
        for district in districts {
            let result = self.update_district(&district).await;
            outcomes.push(DistrictOutcome { district, result });
        }

        RunReport {
            aborted: None,
            outcomes,
        }
    }

    async fn update_district(&self, district: &District) -> Result<WeatherRecord, DistrictError> {
        info!("Fetching weather data for district: {}", district.name);

        let reading = self.source.fetch(&district.name).await.map_err(|e| {
            error!("{}", e);
            e
        })?;

        let record = self.store.upsert(&district.id, &reading).await.map_err(|e| {
            error!("{}", e);
            e
        })?;

        info!("Weather data for district {} updated successfully.", district.id);
        Ok(record)
    }
}
