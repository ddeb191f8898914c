//! Typed client core for the products/clients CRUD service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), then layers a blocking API
//! client and per-collection stores on top for hosts that let Rust do the I/O.
//!
//! # Design
//! - `CrudClient` is stateless and holds only `base_url`; each operation is
//!   split into `build_*` and `parse_*` so the I/O boundary is explicit.
//! - `Transport` is the I/O seam. `CrudApi` = `CrudClient` + `Transport`.
//! - `CollectionStore` keeps the last listed collection and re-lists after
//!   every create, update or delete. `CrudSession` owns one per record type.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod store;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use api::CrudApi;
pub use client::CrudClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, MutationKind, StoreError, StoreResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::CrudSession;
pub use store::{next_id, CollectionStore};
pub use transport::{Transport, UreqTransport};
pub use types::{Client, NewClient, NewProduct, Product, Record};
