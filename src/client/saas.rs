//! Retail SaaS operations.

use super::{check_batch, Client, ClientError, WriteResponse, MAX_WRITE_ITEM_COUNT};
use crate::dispatch::RequestOptions;
use crate::url::SaasUrls;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

impl Client<SaasUrls> {
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

    pub async fn predict<Req, Resp>(
        &self,
        request: &Req,
        options: &RequestOptions,
    ) -> Result<Resp, ClientError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.urls().load().predict.clone();
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
