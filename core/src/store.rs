//! Last-fetched list per record type, kept in sync by re-listing after every
//! write.
//!
//! # Design
//! The list is held as an `Arc<Vec<R>>` and only ever swapped wholesale, so
//! readers get a consistent snapshot and the lock is held just for the swap.
//! Nothing sequences independent operations: when two refreshes race, the
//! one that finishes last wins.
//!
//! Each mutation runs its own round trip to completion before its refresh is
//! issued. A failed mutation skips the refresh and leaves the list as it was.

use std::sync::{Arc, PoisonError, RwLock};
use std::thread::JoinHandle;

use tracing::{info, warn};

use crate::api::CrudApi;
use crate::error::{MutationKind, StoreError, StoreResult};
use crate::transport::Transport;
use crate::types::Record;

/// Id for the next created record: `current_len + 1`.
///
/// Caller-assigned and optimistic; it collides under concurrent writers or
/// after deletes from the middle of the list.
pub fn next_id(current_len: usize) -> i64 {
    current_len as i64 + 1
}

pub struct CollectionStore<R, T> {
    api: Arc<CrudApi<T>>,
    current: RwLock<Option<Arc<Vec<R>>>>,
}

impl<R, T> CollectionStore<R, T>
where
    R: Record,
    T: Transport,
{
    pub fn new(api: Arc<CrudApi<T>>) -> Self {
        Self {
            api,
            current: RwLock::new(None),
        }
    }

    /// Snapshot of the last fetched list. Empty until the first refresh succeeds.
    pub fn current(&self) -> Arc<Vec<R>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any refresh has succeeded yet. Tells "not loaded" apart from
    /// "the server holds nothing".
    pub fn is_loaded(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Replace the stored list with the server's. On failure the old list stays.
    pub fn refresh(&self) -> StoreResult<()> {
        match self.api.list::<R>() {
            Ok(records) => {
                info!(collection = R::COLLECTION, count = records.len(), "refreshed");
                *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(records));
                Ok(())
            }
            Err(source) => {
                warn!(collection = R::COLLECTION, error = %source, "refresh failed, keeping stale list");
                Err(StoreError::Refresh {
                    collection: R::COLLECTION,
                    source,
                })
            }
        }
    }

    /// Create a record with id `len(current) + 1`, then refresh.
    ///
    /// Returns the record that was sent to the server.
    pub fn add(&self, fields: R::Fields) -> StoreResult<R> {
        let entity = R::from_fields(next_id(self.len()), fields);
        self.api
            .create(&entity)
            .map_err(|source| mutation_error::<R>(MutationKind::Create, source))?;
        self.refresh()?;
        Ok(entity)
    }

    pub fn remove(&self, id: i64) -> StoreResult<()> {
        self.api
            .delete::<R>(id)
            .map_err(|source| mutation_error::<R>(MutationKind::Delete, source))?;
        self.refresh()
    }

    /// Replace the record stored under `id` with `entity`, then refresh.
    pub fn replace(&self, id: i64, entity: R) -> StoreResult<()> {
        self.api
            .update(id, &entity)
            .map_err(|source| mutation_error::<R>(MutationKind::Update, source))?;
        self.refresh()
    }
}

impl<R, T> CollectionStore<R, T>
where
    R: Record,
    T: Transport + 'static,
{
    /// Run [`refresh`](Self::refresh) on a background thread.
    pub fn spawn_refresh(self: &Arc<Self>) -> JoinHandle<StoreResult<()>> {
        let store = Arc::clone(self);
        std::thread::spawn(move || store.refresh())
    }

    pub fn spawn_add(self: &Arc<Self>, fields: R::Fields) -> JoinHandle<StoreResult<R>> {
        let store = Arc::clone(self);
        std::thread::spawn(move || store.add(fields))
    }

    pub fn spawn_remove(self: &Arc<Self>, id: i64) -> JoinHandle<StoreResult<()>> {
        let store = Arc::clone(self);
        std::thread::spawn(move || store.remove(id))
    }

    pub fn spawn_replace(self: &Arc<Self>, id: i64, entity: R) -> JoinHandle<StoreResult<()>> {
        let store = Arc::clone(self);
        std::thread::spawn(move || store.replace(id, entity))
    }
}

fn mutation_error<R: Record>(op: MutationKind, source: crate::error::ApiError) -> StoreError {
    warn!(collection = R::COLLECTION, %op, error = %source, "mutation failed");
    StoreError::Mutation {
        op,
        collection: R::COLLECTION,
        source,
    }
}
