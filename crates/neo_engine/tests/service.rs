use chrono::NaiveDate;
use neo_engine::{ApiError, FeedSettings, NeoService, ReqwestNeoService};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ONE_OBJECT: &str = r#"{"near_earth_objects": {"2025-02-01": [{
    "id": "54016", "neo_reference_id": "54016", "name": "(2020 BX12)",
    "absolute_magnitude_h": 19.2,
    "estimated_diameter": {"meters": {"estimated_diameter_min": 300.0, "estimated_diameter_max": 600.0}},
    "is_potentially_hazardous_asteroid": true,
    "close_approach_data": [{
        "close_approach_date_full": "2025-Feb-01 08:15",
        "relative_velocity": {"kilometers_per_second": "12.5"},
        "miss_distance": {"kilometers": "6000000.5"},
        "orbiting_body": "Earth"
    }]
}]}}"#;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
}

fn service_for(server: &MockServer) -> ReqwestNeoService {
    ReqwestNeoService::new(FeedSettings {
        base_url: server.uri(),
        api_key: "test-key".to_string(),
        ..FeedSettings::default()
    })
    .unwrap()
}

#[tokio::test]
async fn fetch_decodes_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(query_param("start_date", "2025-02-01"))
        .and(query_param("end_date", "2025-02-08"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ONE_OBJECT, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let objects = service_for(&server).fetch(start_date()).await.unwrap();

    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].name, "(2020 BX12)");
    assert_eq!(objects[0].estimated_diameter, 450.0);
    assert_eq!(objects[0].miss_distance, 6_000_000.5);
}

#[tokio::test]
async fn unauthorized_status_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = service_for(&server).fetch(start_date()).await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
}

#[tokio::test]
async fn other_status_is_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = service_for(&server).fetch(start_date()).await.unwrap_err();
    assert!(matches!(err, ApiError::Unexpected(message) if message.contains("503")));
}

#[tokio::test]
async fn undecodable_body_is_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"near_earth_objects\": 3}"))
        .mount(&server)
        .await;

    let err = service_for(&server).fetch(start_date()).await.unwrap_err();
    assert!(matches!(err, ApiError::Unexpected(_)));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ONE_OBJECT, "application/json"))
        .mount(&server)
        .await;

    let service = ReqwestNeoService::new(FeedSettings {
        base_url: server.uri(),
        max_bytes: 16,
        ..FeedSettings::default()
    })
    .unwrap();

    let err = service.fetch(start_date()).await.unwrap_err();
    assert!(matches!(err, ApiError::Unexpected(message) if message.contains("too large")));
}

#[tokio::test]
async fn unreachable_server_is_offline() {
    // Reserve a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = ReqwestNeoService::new(FeedSettings {
        base_url: format!("http://{addr}"),
        ..FeedSettings::default()
    })
    .unwrap();
    assert_eq!(service.settings().base_url, format!("http://{addr}"));

    let err = service.fetch(start_date()).await.unwrap_err();
    assert_eq!(err, ApiError::Offline);
}
