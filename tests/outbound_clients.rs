//! Integration tests for the distance and submission clients using wiremock HTTP mocks.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ride_booking_intake::entities::{Location, LocationType, NormalizedBooking, TripType};
use ride_booking_intake::services::{
    BookingSubmitter, DistanceError, DistanceMatrixClient, DistanceService, HttpSubmitter,
    SubmissionError,
};

fn logan() -> Location {
    Location::new("Boston Logan International Airport", 42.3656, -71.0096)
}

fn worcester() -> Location {
    Location::new("Worcester, MA", 42.2626, -71.8023)
}

fn matrix_client(server: &MockServer) -> DistanceMatrixClient {
    DistanceMatrixClient::with_base_url("test-key", 5, &format!("{}/distancematrix/json", server.uri()))
        .expect("client construction should not fail")
}

fn booking() -> NormalizedBooking {
    NormalizedBooking {
        trip_type: TripType::OneWay,
        pickup_date: "2099-06-01".to_string(),
        pickup_time: "10:30".to_string(),
        pickup_location_type: LocationType::Airport,
        pickup_location: logan(),
        stops: vec![],
        dropoff_location_type: LocationType::Location,
        dropoff_location: worcester(),
        phone: "+17744153244".to_string(),
        is_recognized: true,
        first_name: "John".to_string(),
        last_name: "Smith".to_string(),
        email: "john.smith@example.com".to_string(),
        passengers: 2,
    }
}

#[tokio::test]
async fn distance_matrix_returns_text_values() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "OK",
        "rows": [{
            "elements": [{
                "status": "OK",
                "distance": { "text": "47.9 mi", "value": 77088 },
                "duration": { "text": "52 mins", "value": 3120 }
            }]
        }]
    });

    Mock::given(method("GET"))
        .and(path("/distancematrix/json"))
        .and(query_param("origins", "42.3656,-71.0096"))
        .and(query_param("destinations", "42.2626,-71.8023"))
        .and(query_param("mode", "driving"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let info = matrix_client(&server)
        .estimate(&logan(), &worcester())
        .await
        .expect("should parse estimate");

    assert_eq!(info.distance, "47.9 mi");
    assert_eq!(info.duration, "52 mins");
}

#[tokio::test]
async fn distance_matrix_top_level_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "REQUEST_DENIED", "rows": [] })),
        )
        .mount(&server)
        .await;

    let err = matrix_client(&server)
        .estimate(&logan(), &worcester())
        .await
        .expect_err("denied request should fail");

    assert!(matches!(err, DistanceError::Status(s) if s == "REQUEST_DENIED"));
}

#[tokio::test]
async fn distance_matrix_element_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "rows": [{ "elements": [{ "status": "ZERO_RESULTS" }] }]
        })))
        .mount(&server)
        .await;

    let err = matrix_client(&server)
        .estimate(&logan(), &worcester())
        .await
        .expect_err("no route should fail");

    assert!(matches!(err, DistanceError::Status(s) if s == "ZERO_RESULTS"));
}

#[tokio::test]
async fn distance_matrix_http_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = matrix_client(&server)
        .estimate(&logan(), &worcester())
        .await
        .expect_err("503 should fail");

    assert!(matches!(err, DistanceError::Http(_)));
}

#[tokio::test]
async fn submitter_posts_camel_case_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_partial_json(json!({
            "tripType": "one-way",
            "pickupLocationType": "airport",
            "pickupLocation": { "address": "Boston Logan International Airport" },
            "isRecognized": true,
            "passengers": 2
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 101 })))
        .expect(1)
        .mount(&server)
        .await;

    let submitter = HttpSubmitter::new(&format!("{}/posts", server.uri()), 5).expect("client");
    let response = submitter.submit(&booking()).await.expect("should submit");

    assert_eq!(response["id"], 101);
}

#[tokio::test]
async fn submitter_non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let submitter = HttpSubmitter::new(&format!("{}/posts", server.uri()), 5).expect("client");
    let err = submitter.submit(&booking()).await.expect_err("500 should fail");

    assert!(matches!(err, SubmissionError::Status(status) if status.as_u16() == 500));
}

#[test]
fn submitter_rejects_invalid_url() {
    assert!(matches!(
        HttpSubmitter::new("not a url", 5),
        Err(SubmissionError::InvalidUrl(_))
    ));
}
