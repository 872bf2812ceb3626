//! Remote CRUD client for inventory items.

use reqwest::{Method, Response};
use serde::Serialize;

use stockroom_core::{ClientError, ClientResult};
use stockroom_inventory::Item;

use crate::http::{ApiClient, body_text, decode_json};

/// Stateless item client: one request per call, no caching, no retries.
#[derive(Debug, Clone)]
pub struct RemoteItemClient {
    api: ApiClient,
}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    id: &'a str,
}

impl RemoteItemClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET endpoints/read.php`
    pub async fn list_items(&self) -> ClientResult<Vec<Item>> {
        let response = self.api.send(self.api.request(Method::GET, "read.php")).await?;
        decode_json(ensure_success(response).await?).await
    }

    /// `POST endpoints/create.php`
    pub async fn create_item(&self, item: &Item) -> ClientResult<Item> {
        let request = self.api.request(Method::POST, "create.php").json(item);
        let response = self.api.send(request).await?;
        decode_json(ensure_success(response).await?).await
    }

    /// `PUT endpoints/update.php`
    pub async fn update_item(&self, item: &Item) -> ClientResult<Item> {
        let request = self.api.request(Method::PUT, "update.php").json(item);
        let response = self.api.send(request).await?;
        decode_json(ensure_success(response).await?).await
    }

    /// `DELETE endpoints/delete.php` with body `{"id": id}`; the response
    /// body is ignored.
    pub async fn delete_item(&self, id: &str) -> ClientResult<()> {
        let request = self
            .api
            .request(Method::DELETE, "delete.php")
            .json(&DeleteRequest { id });
        let response = self.api.send(request).await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(ClientError::api(status.as_u16(), body_text(response).await))
}
