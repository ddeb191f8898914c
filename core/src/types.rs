//! Record DTOs for the products/clients API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! `Product::price` is a string on the wire in every version of the backend
//! schema, so it stays a `String` here instead of a numeric type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record type exchanged with the remote service.
///
/// Ties the Rust type to its collection name, which drives every route
/// (`/{coll}s`, `/new-{coll}`, `/update-{coll}/{id}`, `/remove-{coll}/{id}`).
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The user-supplied fields of a new record (everything but the id).
    type Fields: Send + 'static;

    /// Singular collection name used in routes.
    const COLLECTION: &'static str;

    fn id(&self) -> i64;

    fn from_fields(id: i64, fields: Self::Fields) -> Self;
}

/// A single product returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: String,
}

/// Fields for creating a product; the id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: String,
}

impl Record for Product {
    type Fields = NewProduct;
    const COLLECTION: &'static str = "product";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_fields(id: i64, fields: NewProduct) -> Self {
        Self {
            id,
            name: fields.name,
            price: fields.price,
        }
    }
}

/// A single client returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    pub id: i64,
    pub name: String,
}

/// Fields for creating a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
}

impl Record for Client {
    type Fields = NewClient;
    const COLLECTION: &'static str = "client";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_fields(id: i64, fields: NewClient) -> Self {
        Self {
            id,
            name: fields.name,
        }
    }
}
