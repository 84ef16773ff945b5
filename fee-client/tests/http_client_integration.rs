//! Exercises `HttpFeeClient` against a local mock of the calculation endpoint.

use std::time::Duration;

use fee_client::HttpFeeClient;
use fee_core::{ClientConfig, FeeClient, FeeClientError, FeeResult, Fees, VehicleType};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn client_for(server: &MockServer, timeout: Duration) -> HttpFeeClient {
    let config = ClientConfig {
        base_url: format!("{}/api", server.uri()),
        timeout,
        ..ClientConfig::default()
    };
    HttpFeeClient::new(&config).expect("mock server uri should be a valid base url")
}

fn sample_body() -> serde_json::Value {
    json!({
        "fees": {
            "basicBuyerFee": 50,
            "specialFee": 20,
            "associationFee": 10,
            "storageFee": 100
        },
        "totalCost": 1180
    })
}

#[tokio::test]
async fn success_decodes_fee_breakdown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/calculate"))
        .and(query_param("basePrice", "1000"))
        .and(query_param("vehicleType", "Common"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let result = client
        .calculate_fees(dec!(1000), VehicleType::Common)
        .await
        .unwrap();

    assert_eq!(
        result,
        FeeResult {
            fees: Fees {
                basic_buyer_fee: dec!(50),
                special_fee: dec!(20),
                association_fee: dec!(10),
                storage_fee: dec!(100),
            },
            total_cost: dec!(1180),
        }
    );
}

#[tokio::test]
async fn each_call_issues_its_own_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/calculate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    client
        .calculate_fees(dec!(1000), VehicleType::Luxury)
        .await
        .unwrap();
    client
        .calculate_fees(dec!(1000), VehicleType::Luxury)
        .await
        .unwrap();
    // `expect(2)` is verified when the server drops.
}

#[tokio::test]
async fn not_found_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client
        .calculate_fees(dec!(1000), VehicleType::Common)
        .await
        .unwrap_err();

    assert_eq!(err, FeeClientError::Status { status: 404 });
    assert!(err.is_not_found());
}

#[tokio::test]
async fn server_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/calculate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client
        .calculate_fees(dec!(1000), VehicleType::Common)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/calculate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 1 })))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = client
        .calculate_fees(dec!(1000), VehicleType::Common)
        .await
        .unwrap_err();

    assert!(matches!(err, FeeClientError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/calculate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_millis(200));
    let err = client
        .calculate_fees(dec!(1000), VehicleType::Common)
        .await
        .unwrap_err();

    assert_eq!(err, FeeClientError::Timeout(Duration::from_millis(200)));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Bind to learn a free port, then release it so nothing is listening.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let config = ClientConfig {
        base_url: format!("{uri}/api"),
        timeout: Duration::from_secs(2),
        ..ClientConfig::default()
    };
    let client = HttpFeeClient::new(&config).unwrap();

    let err = client
        .calculate_fees(dec!(1000), VehicleType::Common)
        .await
        .unwrap_err();

    assert!(
        matches!(err, FeeClientError::Network(_) | FeeClientError::Timeout(_)),
        "got {err:?}"
    );
    assert_eq!(err.status(), None);
}
