//! SupabaseClient against a mock PostgREST endpoint.

mod common;

use chrono::Utc;
use common::{supabase_settings, SERVICE_KEY};
use district_weather::configuration::SupabaseSettings;
use district_weather::error::{DirectoryError, WriteError};
use district_weather::models::{DistrictId, WeatherReading};
use district_weather::{DistrictDirectory, SupabaseClient, WeatherStore};
use secrecy::Secret;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reading() -> WeatherReading {
    WeatherReading {
        temperature: 21.3,
        humidity: 40,
        wind_speed: 3.1,
        wind_direction: 180,
        pressure: 1012,
        visibility: 10000,
        description: "clear sky".to_string(),
        observed_at: Utc::now(),
    }
}

fn unreachable_client() -> SupabaseClient {
    SupabaseClient::new(&SupabaseSettings {
        uri: "http://127.0.0.1:1".to_string(),
        key: Secret::new(SERVICE_KEY.to_string()),
    })
}

#[tokio::test]
async fn test_list_districts_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/districts"))
        .and(query_param("select", "id,name"))
        .and(header("apikey", SERVICE_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Springfield"},
            {"id": 2, "name": "Shelbyville"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&supabase_settings(&mock_server));
    let districts = client.list_districts().await.unwrap();

    assert_eq!(districts.len(), 2);
    assert_eq!(districts[0].id, DistrictId::Number(1));
    assert_eq!(districts[0].name, "Springfield");
    assert_eq!(districts[1].name, "Shelbyville");
}

#[tokio::test]
async fn test_list_districts_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/districts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&supabase_settings(&mock_server));
    let result = client.list_districts().await;

    assert!(matches!(result, Err(DirectoryError::Empty)));
}

#[tokio::test]
async fn test_list_districts_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/districts"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "message": "relation \"districts\" does not exist"
        })))
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&supabase_settings(&mock_server));
    let err = client.list_districts().await.unwrap_err();

    assert!(matches!(err, DirectoryError::Unavailable(_)));
    let message = err.to_string();
    assert!(message.contains("500"), "Error should mention 500 status: {}", message);
    assert!(message.contains("does not exist"));
}

#[tokio::test]
async fn test_upsert_targets_district_id_conflict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/weather"))
        .and(query_param("on_conflict", "district_id"))
        .and(body_partial_json(serde_json::json!({
            "district_id": 7,
            "temperature": 21.3,
            "humidity": 40,
            "wind_speed": 3.1,
            "wind_direction": 180,
            "pressure": 1012,
            "visibility": 10000,
            "weather_desc": "clear sky"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&supabase_settings(&mock_server));
    let before = Utc::now();
    let record = client.upsert(&DistrictId::Number(7), &reading()).await.unwrap();

    assert_eq!(record.district_id, DistrictId::Number(7));
    assert_eq!(record.weather_desc, "clear sky");
    assert!(record.updated_at >= before);
}

#[tokio::test]
async fn test_upsert_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/weather"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "code": "23503",
            "message": "insert or update on table \"weather\" violates foreign key constraint"
        })))
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&supabase_settings(&mock_server));
    let err = client.upsert(&DistrictId::Number(99), &reading()).await.unwrap_err();

    match &err {
        WriteError::Rejected { status, body, .. } => {
            assert_eq!(*status, 409);
            assert!(body.contains("foreign key"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.district_id(), &DistrictId::Number(99));
}

#[tokio::test]
async fn test_list_districts_connection_failure() {
    let err = unreachable_client().list_districts().await.unwrap_err();

    assert!(matches!(err, DirectoryError::Unavailable(_)));
    let message = err.to_string();
    assert!(
        message.to_lowercase().contains("connection refused"),
        "Error should carry the connect failure: {}",
        message
    );
    assert!(!format!("{:?}", err).contains(SERVICE_KEY));
}

#[tokio::test]
async fn test_upsert_connection_failure() {
    let err = unreachable_client()
        .upsert(&DistrictId::Number(1), &reading())
        .await
        .unwrap_err();

    assert!(matches!(err, WriteError::Transport { .. }));
    assert_eq!(err.district_id(), &DistrictId::Number(1));
    let message = err.to_string();
    assert!(message.contains("district 1"));
    assert!(
        message.to_lowercase().contains("connection refused"),
        "Error should carry the connect failure: {}",
        message
    );
    assert!(!format!("{:?}", err).contains(SERVICE_KEY));
}
