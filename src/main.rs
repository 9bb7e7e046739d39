use district_weather::configuration::get_configuration;
use district_weather::{OpenWeatherClient, Orchestrator, SupabaseClient};
use log::info;
use std::time::Instant;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let configuration = get_configuration()?;
    let supabase_client = SupabaseClient::new(&configuration.supabase);
    let weather_client = OpenWeatherClient::new(&configuration.openweather)?;

    let start = Instant::now();
    let report = Orchestrator::new(supabase_client.clone(), weather_client, supabase_client)
        .run()
        .await;

    info!(
        "Processed {} districts in {:?}",
        report.processed(),
        start.elapsed()
    );

    Ok(())
}
