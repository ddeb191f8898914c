//! One client session: a shared API handle plus one store per record type.

use std::sync::Arc;

use tracing::info;

use crate::api::CrudApi;
use crate::client::CrudClient;
use crate::config::ClientConfig;
use crate::error::StoreResult;
use crate::store::CollectionStore;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Client, Product};

pub struct CrudSession<T> {
    api: Arc<CrudApi<T>>,
    products: Arc<CollectionStore<Product, T>>,
    clients: Arc<CollectionStore<Client, T>>,
}

impl CrudSession<UreqTransport> {
    /// Session talking to `config.base_url` over `ureq`.
    pub fn connect(config: &ClientConfig) -> Self {
        info!(base_url = %config.base_url, "opening session");
        let transport = UreqTransport::new(config.timeout());
        Self::new(CrudApi::new(CrudClient::new(&config.base_url), transport))
    }
}

impl<T: Transport> CrudSession<T> {
    pub fn new(api: CrudApi<T>) -> Self {
        let api = Arc::new(api);
        Self {
            products: Arc::new(CollectionStore::new(Arc::clone(&api))),
            clients: Arc::new(CollectionStore::new(Arc::clone(&api))),
            api,
        }
    }

    pub fn api(&self) -> &Arc<CrudApi<T>> {
        &self.api
    }

    pub fn products(&self) -> &Arc<CollectionStore<Product, T>> {
        &self.products
    }

    pub fn clients(&self) -> &Arc<CollectionStore<Client, T>> {
        &self.clients
    }

    /// Refresh both stores. Both are attempted; the first failure is returned.
    pub fn load_all(&self) -> StoreResult<()> {
        let products = self.products.refresh();
        let clients = self.clients.refresh();
        products.and(clients)
    }
}
