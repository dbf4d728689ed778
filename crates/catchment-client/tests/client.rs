//! Integration tests for `OutletClient` using wiremock HTTP mocks.

use catchment_client::{ClientError, OutletClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn site_client(api: &str, site: &str) -> OutletClient {
    OutletClient::via_site(api, site, 5, "catchment-test/0.1")
        .expect("client construction should not fail")
}

fn direct_client(api: &str) -> OutletClient {
    OutletClient::direct(api, 5, "catchment-test/0.1")
        .expect("client construction should not fail")
}

fn outlet_json(id: i64, name: &str, lat: f64, lng: f64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "address": "Jalan Ampang, 50450 Kuala Lumpur",
        "operating_hours": "Monday - Sunday, 8:00 AM - 10:00 PM",
        "waze_link": "https://waze.com/ul?ll=3.15,101.71",
        "latitude": lat,
        "longitude": lng
    })
}

#[tokio::test]
async fn outlets_via_site_requests_geocoded_feed() {
    let site = MockServer::start().await;
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/outlets"))
        .and(query_param("geocoded_only", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            outlet_json(1, "Subway Menara KL", 3.1528, 101.7038),
            outlet_json(2, "Subway Bangsar", 3.1300, 101.6710),
        ])))
        .expect(1)
        .mount(&site)
        .await;

    let client = site_client(&api.uri(), &site.uri());
    let outlets = client.outlets(true).await.expect("should parse outlets");

    assert_eq!(outlets.len(), 2);
    assert_eq!(outlets[0].name, "Subway Menara KL");
    assert!(outlets[1].coordinate().is_some());
}

#[tokio::test]
async fn outlets_direct_hits_backend_path() {
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/outlets"))
        .and(query_param("geocoded_only", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "name": "Subway Kajang", "latitude": null, "longitude": null}
        ])))
        .expect(1)
        .mount(&api)
        .await;

    let outlets = direct_client(&api.uri())
        .outlets(false)
        .await
        .expect("should parse outlets");
    assert_eq!(outlets.len(), 1);
    assert!(outlets[0].coordinate().is_none());
}

#[tokio::test]
async fn search_encodes_query_as_path_segment() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/Find%20me%20a%20Subway"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([outlet_json(9, "Subway Sunway", 3.07, 101.60)])),
        )
        .expect(1)
        .mount(&site)
        .await;

    let client = site_client("http://127.0.0.1:9", &site.uri());
    let results = client.search("Find me a Subway").await.expect("should search");
    assert_eq!(results[0].id, 9);
}

#[tokio::test]
async fn search_direct_uses_backend_search_route() {
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/outlets/search/Bangsar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&api)
        .await;

    let results = direct_client(&api.uri())
        .search("Bangsar")
        .await
        .expect("should search");
    assert!(results.is_empty());
}

#[tokio::test]
async fn location_returns_count_and_outlets() {
    let site = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/location/Cheras"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": "Cheras",
            "count": 2,
            "outlets": [
                outlet_json(11, "Subway Cheras Leisure Mall", 3.0906, 101.7440),
                outlet_json(12, "Subway Cheras Sentral", 3.0718, 101.7392)
            ]
        })))
        .expect(1)
        .mount(&site)
        .await;

    let client = site_client("http://127.0.0.1:9", &site.uri());
    let summary = client.location("Cheras").await.expect("should parse summary");
    assert_eq!(summary.count, 2);
    assert_eq!(summary.outlets[1].id, 12);
}

#[tokio::test]
async fn latest_closing_always_goes_to_backend() {
    let site = MockServer::start().await;
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/outlets/latest-closing"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([outlet_json(5, "Subway Mid Valley", 3.118, 101.677)])),
        )
        .expect(1)
        .mount(&api)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&site)
        .await;

    let client = site_client(&api.uri(), &site.uri());
    let outlets = client.latest_closing().await.expect("should parse outlets");
    assert_eq!(outlets[0].name, "Subway Mid Valley");
}

#[tokio::test]
async fn outlet_by_id_parses_single_record() {
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/outlets/42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(outlet_json(42, "Subway Pavilion", 3.149, 101.713)),
        )
        .mount(&api)
        .await;

    let outlet = direct_client(&api.uri())
        .outlet(42)
        .await
        .expect("should parse outlet");
    assert_eq!(outlet.id, 42);
    assert_eq!(outlet.name, "Subway Pavilion");
}

#[tokio::test]
async fn missing_outlet_maps_to_not_found() {
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/outlets/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Outlet not found"})))
        .mount(&api)
        .await;

    let err = direct_client(&api.uri()).outlet(404).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }), "got: {err:?}");
}

#[tokio::test]
async fn server_error_maps_to_unexpected_status() {
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/outlets"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&api)
        .await;

    let err = direct_client(&api.uri()).outlets(true).await.unwrap_err();
    assert!(
        matches!(err, ClientError::UnexpectedStatus { status: 500, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_maps_to_deserialize_error() {
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/outlets/latest-closing"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&api)
        .await;

    let err = direct_client(&api.uri()).latest_closing().await.unwrap_err();
    assert!(matches!(err, ClientError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn connection_refused_maps_to_http_error() {
    let err = direct_client("http://127.0.0.1:9")
        .outlets(true)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http(_)), "got: {err:?}");
}
