//! Request and response bodies shared by every product line.
//!
//! Product specific payloads (users, products, predict requests) are left to
//! the caller as any `serde` type.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Status block carried by every service response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseStatus {
    pub code: i32,
    pub message: String,
    pub success: bool,
}

/// One rejected item of a write request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataError {
    pub message: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteResponse {
    pub status: ResponseStatus,
    pub errors: Vec<DataError>,
}

/// Long-running server side job, e.g. a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Operation {
    pub name: String,
    pub done: bool,
    pub metadata: Option<serde_json::Value>,
    pub response: Option<serde_json::Value>,
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationResponse {
    pub status: ResponseStatus,
    pub operation: Operation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetOperationRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListOperationsRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub page_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListOperationsResponse {
    pub status: ResponseStatus,
    pub operations: Vec<Operation>,
    pub next_page_token: String,
}

/// Calendar date as the service expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl From<NaiveDate> for DataDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// Marks the data of a topic as complete for the given dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoneRequest {
    pub data_dates: Vec<DataDate>,
}

impl DoneRequest {
    /// Request for `dates`, or for yesterday (UTC) when `dates` is empty.
    pub fn for_dates(dates: &[NaiveDate]) -> Self {
        let data_dates = if dates.is_empty() {
            let yesterday = chrono::Utc::now().date_naive() - chrono::Duration::days(1);
            vec![yesterday.into()]
        } else {
            dates.iter().copied().map(DataDate::from).collect()
        };
        Self { data_dates }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoneResponse {
    pub status: ResponseStatus,
}
