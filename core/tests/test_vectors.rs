//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results per operation. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use crud_core::{ApiError, Client, CrudClient, HttpMethod, HttpRequest, HttpResponse, Product, Record};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080";

fn client() -> CrudClient {
    CrudClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    match expected.get("body") {
        Some(body) => {
            let expected_headers: Vec<(String, String)> = expected["headers"]
                .as_array()
                .unwrap()
                .iter()
                .map(|h| {
                    let arr = h.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect();
            assert_eq!(req.headers, expected_headers, "{name}: headers");
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => {
            assert!(req.body.is_none(), "{name}: body should be None");
            assert!(req.headers.is_empty(), "{name}: headers should be empty");
        }
    }
}

fn assert_error(name: &str, err: ApiError, expected: &str) {
    match expected {
        "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound, got {err}"),
        "Http" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}: expected HttpError, got {err}"),
        "Deserialization" => assert!(
            matches!(err, ApiError::DeserializationError(_)),
            "{name}: expected DeserializationError, got {err}"
        ),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

fn run_vectors<R: Record + PartialEq + std::fmt::Debug>(raw: &str) {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    assert_eq!(vectors["collection"], R::COLLECTION);
    let c = client();

    for case in vectors["list"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        assert_request(name, &c.build_list::<R>(), &case["expected_request"]);

        let result = c.parse_list::<R>(simulated_response(case));
        match case.get("expected_error") {
            Some(expected) => assert_error(name, result.unwrap_err(), expected.as_str().unwrap()),
            None => {
                let expected: Vec<R> = serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }

    for case in vectors["create"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: R = serde_json::from_value(case["input"].clone()).unwrap();
        assert_request(name, &c.build_create(&input).unwrap(), &case["expected_request"]);

        let result = c.parse_ack(simulated_response(case));
        match case.get("expected_error") {
            Some(expected) => assert_error(name, result.unwrap_err(), expected.as_str().unwrap()),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }

    for case in vectors["update"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();
        let input: R = serde_json::from_value(case["input"].clone()).unwrap();
        assert_request(name, &c.build_update(id, &input).unwrap(), &case["expected_request"]);

        let result = c.parse_ack(simulated_response(case));
        match case.get("expected_error") {
            Some(expected) => assert_error(name, result.unwrap_err(), expected.as_str().unwrap()),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }

    for case in vectors["delete"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();
        assert_request(name, &c.build_delete::<R>(id), &case["expected_request"]);

        let result = c.parse_ack(simulated_response(case));
        match case.get("expected_error") {
            Some(expected) => assert_error(name, result.unwrap_err(), expected.as_str().unwrap()),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }
}

#[test]
fn product_test_vectors() {
    run_vectors::<Product>(include_str!("../../test-vectors/products.json"));
}

#[test]
fn client_test_vectors() {
    run_vectors::<Client>(include_str!("../../test-vectors/clients.json"));
}
