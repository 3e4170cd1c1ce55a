//! rec-client - recommendation service client
//!
//! Typed, signed and compressed access to the recommendation service HTTP
//! APIs (retail, general and SaaS product lines), with a background host
//! availability tracker that keeps requests flowing to the healthiest
//! configured endpoint.
//!
//! ```no_run
//! use rec_client::client::{ClientBuilder, RetailClient};
//! use rec_client::config::Region;
//! use rec_client::dispatch::RequestOptions;
//!
//! # async fn demo() -> Result<(), rec_client::client::ClientError> {
//! let client: RetailClient = ClientBuilder::new()
//!     .tenant("retail_demo")
//!     .tenant_id("012345")
//!     .token("secret")
//!     .region(Region::Cn)
//!     .build()?;
//!
//! let users = vec![serde_json::json!({"user_id": "u1", "gender": "male"})];
//! let response = client.write_users(&users, &RequestOptions::default()).await?;
//! assert!(response.status.success);
//!
//! client.release();
//! # Ok(())
//! # }
//! ```

pub mod availability;
pub mod cli;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod metrics;
pub mod url;
