//! Integration tests for the CRM client using wiremock
//!
//! These tests verify the client's behavior against a mock HTTP server,
//! ensuring proper request encoding and handling of error responses.

use chrono::{TimeZone, Utc};
use integration_crm::{
    CrmClient, CrmConfig, CrmError, CustomerKey, CustomerSearch, HttpCrmClient, NewContactHistory,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

fn create_test_client(server: &MockServer) -> HttpCrmClient {
    HttpCrmClient::new(CrmConfig::for_testing(server.uri())).unwrap()
}

fn customer_json(id: i64, name: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": {"full": name, "first": "", "middle": "", "last": ""},
        "communication": {"email": {"primary": {"address": email}}}
    })
}

fn sample_entry() -> NewContactHistory {
    NewContactHistory {
        customer_id: CustomerKey::Number(42),
        customer_name: "Jane Doe".to_string(),
        employee_id: "E-7".to_string(),
        store_number: "1042".to_string(),
        method: "E-mail".to_string(),
        purpose: "Miscellaneous".to_string(),
        contacted_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        notes: "Subject: Test".to_string(),
        incoming: true,
        source_type: "Process Pro Email".to_string(),
        source_description: "Process Pro Online Email".to_string(),
    }
}

// ============================================================================
// Customer search
// ============================================================================

#[tokio::test]
async fn search_sends_fuzzy_filter_with_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/customers/customer/1042"))
        .and(header("Authorization", "Bearer test-key"))
        .and(query_param("desired[0]", "id"))
        .and(query_param("filter[0][key]", "communication.email.primary.address"))
        .and(query_param("filter[0][value]", "jane@example.com"))
        .and(query_param("filter[1][key]", "name.full"))
        .and(query_param("filter[4][key]", "name.last"))
        .and(query_param("relation", "or"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [customer_json(42, "Jane Doe", "jane@example.com")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let customers = client
        .search_customers("1042", &CustomerSearch::by_name_or_email("jane@example.com"))
        .await
        .unwrap();

    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].id, CustomerKey::Number(42));
    assert_eq!(customers[0].name, "Jane Doe");
    assert_eq!(customers[0].email, "jane@example.com");
}

#[tokio::test]
async fn search_drops_customers_without_email() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/customers/customer/1042"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                customer_json(1, "No Mail", ""),
                customer_json(2, "Has Mail", "has@example.com"),
                {"id": 3, "name": {"full": "No Communication"}}
            ]
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let customers = client
        .search_customers("1042", &CustomerSearch::by_name_or_email("mail"))
        .await
        .unwrap();

    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].email, "has@example.com");
}

#[tokio::test]
async fn search_with_exact_email_sends_single_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/customers/customer/1042"))
        .and(query_param("filter[0][value]", "b@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let customers = client
        .search_customers("1042", &CustomerSearch::by_exact_email("b@x.com"))
        .await
        .unwrap();

    assert!(customers.is_empty());
    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query.contains("relation"));
    assert!(!query.contains("filter%5B1%5D"));
}

#[tokio::test]
async fn search_client_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client
        .search_customers("1042", &CustomerSearch::by_name_or_email("jane"))
        .await
        .unwrap_err();

    assert!(matches!(err, CrmError::ClientError { status: 401, .. }));
    assert!(err.to_string().contains("invalid token"));
}

#[tokio::test]
async fn search_server_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client
        .search_customers("1042", &CustomerSearch::by_name_or_email("jane"))
        .await
        .unwrap_err();

    assert!(matches!(err, CrmError::ServerError { status: 503, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn search_invalid_json_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client
        .search_customers("1042", &CustomerSearch::by_name_or_email("jane"))
        .await
        .unwrap_err();

    assert!(matches!(err, CrmError::ParseError(_)));
}

#[tokio::test]
async fn search_timeout_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"data": []}))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = CrmConfig {
        timeout_secs: 1,
        ..CrmConfig::for_testing(server.uri())
    };
    let client = HttpCrmClient::new(config).unwrap();
    let err = client
        .search_customers("1042", &CustomerSearch::by_name_or_email("jane"))
        .await
        .unwrap_err();

    assert!(matches!(err, CrmError::Timeout { timeout_secs: 1 }));
}

// ============================================================================
// Contact picture
// ============================================================================

#[tokio::test]
async fn contact_picture_returns_first_face() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/customers/customer/1042"))
        .and(query_param("desired[1]", "driversLicense.image.face"))
        .and(query_param("filter[0][value]", "jane@example.com"))
        .and(query_param("filter[1][value]", "''"))
        .and(query_param("filter[1][comparison]", "!="))
        .and(query_param("filter[2][key]", "driversLicense.image.face"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "communication": {"email": {"primary": {"address": "jane@example.com"}}},
                    "driversLicense": {"image": {"face": "https://img.example.com/face/42.jpg"}}
                },
                {
                    "communication": {"email": {"primary": {"address": "jane@example.com"}}},
                    "driversLicense": {"image": {"face": "https://img.example.com/face/43.jpg"}}
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let face = client
        .find_contact_picture("1042", "jane@example.com")
        .await
        .unwrap();

    assert_eq!(face.as_deref(), Some("https://img.example.com/face/42.jpg"));
}

#[tokio::test]
async fn contact_picture_absent_when_no_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let face = client
        .find_contact_picture("1042", "nobody@example.com")
        .await
        .unwrap();

    assert!(face.is_none());
}

// ============================================================================
// Contact history
// ============================================================================

#[tokio::test]
async fn contact_history_posts_expected_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/customers/contacthistory/"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_json(serde_json::json!({
            "customer": {"id": 42, "name": "Jane Doe"},
            "employee": {"id": "E-7"},
            "store": {"number": "1042"},
            "method": "E-mail",
            "purpose": "Miscellaneous",
            "dateOfContact": "2024-01-15 12:00:00",
            "notes": "Subject: Test",
            "incoming": true,
            "source": {"type": "Process Pro Email", "description": "Process Pro Online Email"}
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    client.create_contact_history(&sample_entry()).await.unwrap();
}

#[tokio::test]
async fn contact_history_rejection_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/customers/contacthistory/"))
        .respond_with(ResponseTemplate::new(422).set_body_string("customer not found"))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client
        .create_contact_history(&sample_entry())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
}

#[tokio::test]
async fn connection_refused_is_reported() {
    let client = HttpCrmClient::new(CrmConfig::for_testing("http://127.0.0.1:1")).unwrap();
    let err = client
        .create_contact_history(&sample_entry())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CrmError::ConnectionFailed(_) | CrmError::RequestFailed(_)
    ));
}
