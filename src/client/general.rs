//! General product line operations. Data is written per topic as a plain
//! JSON array.

use super::{check_batch, Client, ClientError, DoneRequest, DoneResponse};
use super::{OperationResponse, WriteResponse, MAX_IMPORT_ITEM_COUNT};
use crate::dispatch::RequestOptions;
use crate::url::GeneralUrls;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

impl Client<GeneralUrls> {
    pub async fn write_data<T: Serialize>(
        &self,
        topic: &str,
        data: &[T],
        options: &RequestOptions,
    ) -> Result<WriteResponse, ClientError> {
        check_batch("write", data.len(), MAX_IMPORT_ITEM_COUNT)?;
        let url = self.urls().load().write_data(topic);
        self.post(&url, data, options).await
    }

    pub async fn import_data<T: Serialize>(
        &self,
        topic: &str,
        data: &[T],
        options: &RequestOptions,
    ) -> Result<OperationResponse, ClientError> {
        check_batch("import", data.len(), MAX_IMPORT_ITEM_COUNT)?;
        let url = self.urls().load().import_data(topic);
        self.post(&url, data, options).await
    }

    /// Mark `topic` complete for `dates`, or for yesterday when empty.
    pub async fn done(
        &self,
        topic: &str,
        dates: &[NaiveDate],
        options: &RequestOptions,
    ) -> Result<DoneResponse, ClientError> {
        let url = self.urls().load().done(topic);
        self.post(&url, &DoneRequest::for_dates(dates), options).await
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

    pub async fn callback<Req, Resp>(
        &self,
        request: &Req,
        options: &RequestOptions,
    ) -> Result<Resp, ClientError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.urls().load().callback.clone();
        self.post(&url, request, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientBuilder, GeneralClient};
    use crate::config::Region;

    #[tokio::test]
    async fn test_oversized_write_data_rejected() {
        let client: GeneralClient = ClientBuilder::new()
            .tenant("general_demo")
            .tenant_id("012345")
            .token("token")
            .region(Region::Cn)
            .hosts(["127.0.0.1:1"])
            .build()
            .unwrap();

        let data = vec![serde_json::json!({"id": 1}); MAX_IMPORT_ITEM_COUNT + 1];
        let err = client
            .write_data("user", &data, &RequestOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::TooManyItems { max: 10_000, .. }));
    }
}
