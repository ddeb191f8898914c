use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
}

/// Both collections, each kept in insertion order.
#[derive(Default)]
pub struct Tables {
    products: RwLock<Vec<Product>>,
    clients: RwLock<Vec<Client>>,
}

pub type Db = Arc<Tables>;

/// A record the server stores. Ids are whatever the caller sent.
pub trait Stored: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn table(db: &Tables) -> &RwLock<Vec<Self>>;
}

impl Stored for Product {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn table(db: &Tables) -> &RwLock<Vec<Self>> {
        &db.products
    }
}

impl Stored for Client {
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn table(db: &Tables) -> &RwLock<Vec<Self>> {
        &db.clients
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(Tables::default());
    Router::new()
        .route("/products", get(list::<Product>))
        .route("/new-product", post(create::<Product>))
        .route("/update-product/{id}", put(update::<Product>))
        .route("/remove-product/{id}", delete(remove::<Product>))
        .route("/clients", get(list::<Client>))
        .route("/new-client", post(create::<Client>))
        .route("/update-client/{id}", put(update::<Client>))
        .route("/remove-client/{id}", delete(remove::<Client>))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn list<T: Stored>(State(db): State<Db>) -> Json<Vec<T>> {
    let rows = T::table(&db).read().await;
    Json(rows.clone())
}

async fn create<T: Stored>(State(db): State<Db>, Json(input): Json<T>) -> StatusCode {
    let mut rows = T::table(&db).write().await;
    if rows.iter().any(|row| row.id() == input.id()) {
        return StatusCode::CONFLICT;
    }
    rows.push(input);
    StatusCode::CREATED
}

async fn update<T: Stored>(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(mut input): Json<T>,
) -> Result<Json<T>, StatusCode> {
    let mut rows = T::table(&db).write().await;
    let row = rows.iter_mut().find(|row| row.id() == id).ok_or(StatusCode::NOT_FOUND)?;
    input.set_id(id);
    *row = input;
    Ok(Json(row.clone()))
}

async fn remove<T: Stored>(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut rows = T::table(&db).write().await;
    let before = rows.len();
    rows.retain(|row| row.id() != id);
    if rows.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}
