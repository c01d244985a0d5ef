//! Integration tests for the AgencyClient using mockito for HTTP mocking.

use agency_phone_sync::{AgencyApiError, AgencyClient};
use chrono::{TimeZone, Utc};
use mockito::{Matcher, Server};

// "sync-user:s3cret" in base64
const AUTH: &str = "Basic c3luYy11c2VyOnMzY3JldA==";

fn client_for(server: &Server) -> AgencyClient {
    AgencyClient::with_base_url(server.url(), "1234".to_string(), "sync-user", "s3cret")
}

#[test]
fn test_list_all_client_ids() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/vendor/agency/1234/clients")
        .match_query(Matcher::UrlEncoded("version".into(), "3.0".into()))
        .match_header("authorization", AUTH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[101, 102, 103]")
        .create();

    let client = client_for(&server);
    let ids = client.list_all_client_ids().unwrap();

    mock.assert();
    assert_eq!(ids, vec![101, 102, 103]);
    assert_eq!(client.metrics().client_ids_listed_total(), 3);
}

#[test]
fn test_list_all_client_ids_empty() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/vendor/agency/1234/clients")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create();

    let ids = client_for(&server).list_all_client_ids().unwrap();

    mock.assert();
    assert!(ids.is_empty());
}

#[test]
fn test_list_changed_client_ids_sends_as_of() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/vendor/agency/1234/clients")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("version".into(), "3.0".into()),
            Matcher::UrlEncoded("asOf".into(), "2024-05-01T08:30:00Z".into()),
        ]))
        .match_header("authorization", AUTH)
        .with_status(200)
        .with_body("[7]")
        .create();

    let since = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
    let ids = client_for(&server).list_changed_client_ids(since).unwrap();

    mock.assert();
    assert_eq!(ids, vec![7]);
}

#[test]
fn test_listing_failure_is_error() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/vendor/agency/1234/clients")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create();

    let client = client_for(&server);
    let result = client.list_all_client_ids();

    mock.assert();
    match result {
        Err(AgencyApiError::ApiError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
    assert_eq!(client.metrics().http_errors_total(), 1);
}

#[test]
fn test_listing_not_found_is_error() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/vendor/agency/1234/clients")
        .match_query(Matcher::Any)
        .with_status(404)
        .create();

    let result = client_for(&server).list_all_client_ids();
    assert!(matches!(result, Err(AgencyApiError::NotFound(_))));
}

#[test]
fn test_listing_with_bad_payload_is_decode_error() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/vendor/agency/1234/clients")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"clients": []}"#)
        .create();

    let err = client_for(&server).list_all_client_ids().unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn test_get_client_record() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/vendor/agency/1234/client/42")
        .match_query(Matcher::UrlEncoded("version".into(), "3.0".into()))
        .match_header("authorization", AUTH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "People": [{"Id": "p1", "FirstName": "Larry", "LastName": "Lastname"}],
            "Contacts": [
                {"Id": 1, "Type": "CellPhone", "PersonId": "p1", "Data": "5037777777", "Priority": 100},
                {"Id": 2, "Type": "Email", "Data": "x@y.com"}
            ]
        }"#,
        )
        .create();

    let client = client_for(&server);
    let record = client.get_client_record(42).unwrap().unwrap();

    mock.assert();
    assert_eq!(record.id, 42);
    assert_eq!(record.people.len(), 1);
    assert_eq!(record.contacts.len(), 2);
    assert_eq!(client.metrics().client_records_fetched_total(), 1);
}

#[test]
fn test_get_client_record_not_found_is_none() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/vendor/agency/1234/client/404")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body("Client not found")
        .create();

    let client = client_for(&server);
    let result = client.get_client_record(404).unwrap();

    mock.assert();
    assert!(result.is_none());
    assert_eq!(client.metrics().client_records_not_found_total(), 1);
}

#[test]
fn test_get_client_record_server_error() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/vendor/agency/1234/client/5")
        .match_query(Matcher::Any)
        .with_status(502)
        .create();

    let err = client_for(&server).get_client_record(5).unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(err, AgencyApiError::ApiError { status: 502, .. }));
}

#[test]
fn test_get_client_record_unauthorized() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/vendor/agency/1234/client/5")
        .match_query(Matcher::Any)
        .with_status(401)
        .create();

    let result = client_for(&server).get_client_record(5);
    assert!(matches!(result, Err(AgencyApiError::Unauthorized)));
}

#[test]
fn test_get_client_record_malformed_json() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/vendor/agency/1234/client/5")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"Contacts": "#)
        .create();

    let err = client_for(&server).get_client_record(5).unwrap_err();
    assert!(err.is_decode());
}
