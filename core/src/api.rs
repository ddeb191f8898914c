//! Build, execute, parse: one call per logical operation.

use tracing::debug;

use crate::client::CrudClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::Record;

/// API client for both record types. Holds no state besides the request
/// builder and the transport, so it can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct CrudApi<T> {
    client: CrudClient,
    transport: T,
}

impl<T: Transport> CrudApi<T> {
    pub fn new(client: CrudClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &CrudClient {
        &self.client
    }

    /// The full collection the server holds, in server order.
    pub fn list<R: Record>(&self) -> Result<Vec<R>, ApiError> {
        let request = self.client.build_list::<R>();
        let response = self.transport.execute(&request)?;
        let records = self.client.parse_list::<R>(response)?;
        debug!(collection = R::COLLECTION, count = records.len(), "listed records");
        Ok(records)
    }

    pub fn create<R: Record>(&self, entity: &R) -> Result<(), ApiError> {
        let request = self.client.build_create(entity)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_ack(response)?;
        debug!(collection = R::COLLECTION, id = entity.id(), "created record");
        Ok(())
    }

    pub fn update<R: Record>(&self, id: i64, entity: &R) -> Result<(), ApiError> {
        let request = self.client.build_update(id, entity)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_ack(response)?;
        debug!(collection = R::COLLECTION, id, "updated record");
        Ok(())
    }

    pub fn delete<R: Record>(&self, id: i64) -> Result<(), ApiError> {
        let request = self.client.build_delete::<R>(id);
        let response = self.transport.execute(&request)?;
        self.client.parse_ack(response)?;
        debug!(collection = R::COLLECTION, id, "deleted record");
        Ok(())
    }
}
