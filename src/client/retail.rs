//! Retail product line operations.

use super::{check_batch, Client, ClientError, OperationResponse, WriteResponse};
use super::{MAX_IMPORT_ITEM_COUNT, MAX_WRITE_ITEM_COUNT};
use crate::dispatch::RequestOptions;
use crate::url::RetailUrls;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

/// `{"input_config": {"<kind>_inline_source": {"<kind>": [...]}}}`
#[derive(Serialize)]
struct ImportRequest<'a, T> {
    input_config: HashMap<String, HashMap<&'static str, &'a [T]>>,
}

impl<'a, T> ImportRequest<'a, T> {
    fn inline(kind: &'static str, items: &'a [T]) -> Self {
        let source = HashMap::from([(kind, items)]);
        Self {
            input_config: HashMap::from([(format!("{}_inline_source", kind), source)]),
        }
    }
}

impl Client<RetailUrls> {
    pub async fn write_users<T: Serialize>(
        &self,
        users: &[T],
        options: &RequestOptions,
    ) -> Result<WriteResponse, ClientError> {
        check_batch("write", users.len(), MAX_WRITE_ITEM_COUNT)?;
        let url = self.urls().load().write_users.clone();
        self.post(&url, &HashMap::from([("users", users)]), options).await
    }

    pub async fn write_products<T: Serialize>(
        &self,
        products: &[T],
        options: &RequestOptions,
    ) -> Result<WriteResponse, ClientError> {
        check_batch("write", products.len(), MAX_WRITE_ITEM_COUNT)?;
        let url = self.urls().load().write_products.clone();
        self.post(&url, &HashMap::from([("products", products)]), options).await
    }

    pub async fn write_user_events<T: Serialize>(
        &self,
        user_events: &[T],
        options: &RequestOptions,
    ) -> Result<WriteResponse, ClientError> {
        check_batch("write", user_events.len(), MAX_WRITE_ITEM_COUNT)?;
        let url = self.urls().load().write_user_events.clone();
        self.post(&url, &HashMap::from([("user_events", user_events)]), options)
            .await
    }

    /// Start a bulk import; poll the returned operation for completion.
    pub async fn import_users<T: Serialize>(
        &self,
        users: &[T],
        options: &RequestOptions,
    ) -> Result<OperationResponse, ClientError> {
        check_batch("import", users.len(), MAX_IMPORT_ITEM_COUNT)?;
        let url = self.urls().load().import_users.clone();
        self.post(&url, &ImportRequest::inline("users", users), options).await
    }

    pub async fn import_products<T: Serialize>(
        &self,
        products: &[T],
        options: &RequestOptions,
    ) -> Result<OperationResponse, ClientError> {
        check_batch("import", products.len(), MAX_IMPORT_ITEM_COUNT)?;
        let url = self.urls().load().import_products.clone();
        self.post(&url, &ImportRequest::inline("products", products), options)
            .await
    }

    pub async fn import_user_events<T: Serialize>(
        &self,
        user_events: &[T],
        options: &RequestOptions,
    ) -> Result<OperationResponse, ClientError> {
        check_batch("import", user_events.len(), MAX_IMPORT_ITEM_COUNT)?;
        let url = self.urls().load().import_user_events.clone();
        self.post(&url, &ImportRequest::inline("user_events", user_events), options)
            .await
    }

    pub async fn predict<Req, Resp>(
        &self,
        scene: &str,
        request: &Req,
        options: &RequestOptions,
    ) -> Result<Resp, ClientError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.urls().load().predict(scene);
        self.post(&url, request, options).await
    }

    pub async fn ack_server_impressions<Req, Resp>(
        &self,
        request: &Req,
        options: &RequestOptions,
    ) -> Result<Resp, ClientError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.urls().load().ack_impression.clone();
        self.post(&url, request, options).await
    }
}
