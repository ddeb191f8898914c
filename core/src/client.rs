//! Stateless HTTP request builder and response parser for the CRUD API.
//!
//! # Design
//! `CrudClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Methods are generic over [`Record`], so products and clients share one
//! route table keyed by the record's collection name.
//!
//! Create, update and delete return nothing the caller consumes; their
//! responses go through `parse_ack`, which only checks the status.

use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Record;

/// Synchronous, stateless client for the products/clients API.
#[derive(Debug, Clone)]
pub struct CrudClient {
    base_url: String,
}

impl CrudClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /{coll}s`
    pub fn build_list<R: Record>(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/{}s", self.base_url, R::COLLECTION),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `POST /new-{coll}` with the entity as body.
    pub fn build_create<R: Record>(&self, entity: &R) -> Result<HttpRequest, ApiError> {
        let path = format!("{}/new-{}", self.base_url, R::COLLECTION);
        json_request(HttpMethod::Post, path, entity)
    }

    /// `PUT /update-{coll}/{id}` with the full entity as body.
    pub fn build_update<R: Record>(&self, id: i64, entity: &R) -> Result<HttpRequest, ApiError> {
        let path = format!("{}/update-{}/{id}", self.base_url, R::COLLECTION);
        json_request(HttpMethod::Put, path, entity)
    }

    /// `DELETE /remove-{coll}/{id}`
    pub fn build_delete<R: Record>(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/remove-{}/{id}", self.base_url, R::COLLECTION),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Decode a list response, preserving server order.
    pub fn parse_list<R: Record>(&self, response: HttpResponse) -> Result<Vec<R>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Accept the response to a create, update or delete. The body is ignored.
    pub fn parse_ack(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn json_request<B: Serialize>(method: HttpMethod, path: String, body: &B) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
