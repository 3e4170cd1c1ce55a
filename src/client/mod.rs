//! Client construction and the operations shared by every product line.
//!
//! [`ClientBuilder::build`] validates the configuration, points the URL
//! holder at the first configured host and, when more than one host is
//! configured, starts a [`HostAvailabilityTracker`] that keeps the URLs
//! pointed at the healthiest host for the lifetime of the client.

mod error;
mod general;
mod retail;
mod saas;
mod types;

pub use error::ClientError;
pub use types::*;

use crate::availability::{AvailabilityConfig, HostAvailabilityTracker, HttpProber, TrackerError};
use crate::config::{ClientConfig, ConfigError, Region};
use crate::dispatch::{HttpCaller, RequestOptions};
use crate::url::{GeneralUrls, ProductUrls, RetailUrls, SaasUrls, UrlRefresher};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Largest batch accepted by the synchronous write endpoints.
pub const MAX_WRITE_ITEM_COUNT: usize = 100;
/// Largest batch accepted by the bulk import endpoints.
pub const MAX_IMPORT_ITEM_COUNT: usize = 10_000;

pub type RetailClient = Client<RetailUrls>;
pub type GeneralClient = Client<GeneralUrls>;
pub type SaasClient = Client<SaasUrls>;

/// Validated, immutable settings a client is built from.
#[derive(Debug, Clone)]
pub struct Context {
    tenant: String,
    tenant_id: String,
    token: String,
    schema: String,
    hosts: Vec<String>,
    headers: HashMap<String, String>,
    host_header: Option<String>,
    timeout: Duration,
    availability: AvailabilityConfig,
    log_response_bodies: bool,
}

impl Context {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            tenant: config.tenant.clone(),
            tenant_id: config.tenant_id.clone(),
            token: config.token.clone(),
            schema: config.schema.clone(),
            hosts: config.resolved_hosts(),
            headers: config.headers.clone(),
            host_header: config
                .host_header
                .clone()
                .filter(|h| !h.trim().is_empty()),
            timeout: Duration::from_millis(config.timeout_ms),
            availability: config.availability.clone(),
            log_response_bodies: config.logging.log_response_bodies,
        })
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Candidate hosts in priority order, never empty.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn host_header(&self) -> Option<&str> {
        self.host_header.as_deref()
    }

    /// Default request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn availability(&self) -> &AvailabilityConfig {
        &self.availability
    }

    pub fn log_response_bodies(&self) -> bool {
        self.log_response_bodies
    }
}

/// Fluent construction of a [`Client`].
///
/// ```no_run
/// use rec_client::client::{ClientBuilder, RetailClient};
/// use rec_client::config::Region;
///
/// # async fn demo() -> Result<(), rec_client::client::ClientError> {
/// let client: RetailClient = ClientBuilder::new()
///     .tenant("retail_demo")
///     .tenant_id("012345")
///     .token("secret")
///     .region(Region::Sg)
///     .build()?;
/// println!("using {}", client.host());
/// client.release();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn tenant(mut self, tenant: impl Into<String>) -> Self {
        self.config.tenant = tenant.into();
        self
    }

    pub fn tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.config.tenant_id = tenant_id.into();
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = token.into();
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.config.schema = schema.into();
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.config.region = region;
        self
    }

    pub fn hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(name.into(), value.into());
        self
    }

    pub fn host_header(mut self, host_header: impl Into<String>) -> Self {
        self.config.host_header = Some(host_header.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn availability(mut self, availability: AvailabilityConfig) -> Self {
        self.config.availability = availability;
        self
    }

    pub fn log_response_bodies(mut self, enabled: bool) -> Self {
        self.config.logging.log_response_bodies = enabled;
        self
    }

    /// Validate the configuration and build a client for product line `U`.
    ///
    /// With more than one host this spawns the availability tracker, so it
    /// must be called from within a tokio runtime.
    pub fn build<U: ProductUrls>(self) -> Result<Client<U>, ClientError> {
        let mut config = self.config;
        if let Some(tenant) = U::fixed_tenant() {
            config.tenant = tenant.to_string();
        }

        let context = Context::new(&config)?;
        let first = context.hosts().first().cloned().ok_or(TrackerError::NoHosts)?;

        let urls = Arc::new(U::new(&context));
        urls.refresh(&first);
        let caller = Arc::new(HttpCaller::new(&context)?);

        let tracker = if context.hosts().len() > 1 {
            if tokio::runtime::Handle::try_current().is_err() {
                return Err(ClientError::NoRuntime);
            }

            let prober = HttpProber::new(
                context.schema(),
                context.hosts(),
                context.availability(),
                context.headers().clone(),
                context.host_header().map(str::to_string),
            )?;
            let refresher: Arc<dyn UrlRefresher> = urls.clone();
            let mut tracker = HostAvailabilityTracker::new(
                context.hosts().to_vec(),
                context.availability().clone(),
                Arc::new(prober),
                refresher,
            )?;
            if context.host_header().is_some() {
                tracker = tracker.with_rebinder(caller.clone());
            }
            tracker.start()?;
            Some(tracker)
        } else {
            None
        };

        tracing::info!(
            product = U::PRODUCT,
            tenant = context.tenant(),
            host = %first,
            hosts = context.hosts().len(),
            "client created"
        );

        Ok(Client {
            context,
            urls,
            caller,
            tracker,
        })
    }
}

/// Client for one product line.
///
/// Dropping the client stops host tracking, same as [`Client::release`].
pub struct Client<U: ProductUrls> {
    context: Context,
    urls: Arc<U>,
    caller: Arc<HttpCaller>,
    tracker: Option<HostAvailabilityTracker>,
}

impl<U: ProductUrls> Client<U> {
    /// Host requests currently go to.
    pub fn host(&self) -> String {
        match &self.tracker {
            Some(tracker) => tracker.current_host(),
            None => self.context.hosts.first().cloned().unwrap_or_default(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn urls(&self) -> &U {
        &self.urls
    }

    pub fn caller(&self) -> &HttpCaller {
        &self.caller
    }

    /// `None` for single-host clients.
    pub fn tracker(&self) -> Option<&HostAvailabilityTracker> {
        self.tracker.as_ref()
    }

    /// Stop host tracking. Requests keep working against the last chosen
    /// host. Safe to call more than once.
    pub fn release(&self) {
        if let Some(tracker) = &self.tracker {
            tracker.shutdown();
        }
    }

    pub async fn get_operation(
        &self,
        request: &GetOperationRequest,
        options: &RequestOptions,
    ) -> Result<OperationResponse, ClientError> {
        let url = self.urls.common().get_operation;
        let response: OperationResponse = self.caller.do_json_request(&url, request, options).await?;
        tracing::debug!(name = %response.operation.name, done = response.operation.done, "get operation");
        Ok(response)
    }

    pub async fn list_operations(
        &self,
        request: &ListOperationsRequest,
        options: &RequestOptions,
    ) -> Result<ListOperationsResponse, ClientError> {
        let url = self.urls.common().list_operations;
        let response: ListOperationsResponse =
            self.caller.do_json_request(&url, request, options).await?;
        tracing::debug!(count = response.operations.len(), "list operations");
        Ok(response)
    }

    async fn post<Req, Resp>(
        &self,
        url: &str,
        request: &Req,
        options: &RequestOptions,
    ) -> Result<Resp, ClientError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        Ok(self.caller.do_json_request(url, request, options).await?)
    }
}

impl<U: ProductUrls> std::fmt::Debug for Client<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("product", &U::PRODUCT)
            .field("tenant", &self.context.tenant)
            .field("host", &self.host())
            .field("tracker", &self.tracker)
            .finish()
    }
}

/// Reject batches larger than `max` before any I/O happens.
fn check_batch(operation: &'static str, actual: usize, max: usize) -> Result<(), ClientError> {
    if actual > max {
        return Err(ClientError::TooManyItems {
            operation,
            max,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_context(tenant: &str) -> Context {
    let config = ClientConfig {
        tenant: tenant.to_string(),
        tenant_id: "012345".to_string(),
        token: "token".to_string(),
        region: Region::Sg,
        hosts: vec!["rec.example.com".to_string()],
        ..Default::default()
    };
    Context::new(&config).expect("test context is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ClientBuilder {
        ClientBuilder::new()
            .tenant("retail_demo")
            .tenant_id("012345")
            .token("token")
            .region(Region::Sg)
    }

    #[test]
    fn test_context_uses_region_defaults() {
        let config = ClientConfig {
            tenant: "demo".to_string(),
            tenant_id: "1".to_string(),
            token: "t".to_string(),
            region: Region::Cn,
            ..Default::default()
        };
        let context = Context::new(&config).unwrap();
        assert_eq!(context.hosts(), Region::Cn.default_hosts().as_slice());
        assert_eq!(context.schema(), "https");
        assert_eq!(context.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_blank_host_header_ignored() {
        let config = ClientConfig {
            host_header: Some("  ".to_string()),
            ..test_config()
        };
        assert_eq!(Context::new(&config).unwrap().host_header(), None);
    }

    fn test_config() -> ClientConfig {
        ClientConfig {
            tenant: "demo".to_string(),
            tenant_id: "1".to_string(),
            token: "t".to_string(),
            region: Region::Sg,
            ..Default::default()
        }
    }

    #[test]
    fn test_build_rejects_missing_token() {
        let result = ClientBuilder::new()
            .tenant("demo")
            .tenant_id("1")
            .region(Region::Sg)
            .build::<RetailUrls>();
        assert!(matches!(
            result,
            Err(ClientError::Config(ConfigError::MissingField(ref f))) if f == "token"
        ));
    }

    #[test]
    fn test_single_host_needs_no_runtime() {
        let client: RetailClient = builder().hosts(["rec.example.com"]).build().unwrap();

        assert!(client.tracker().is_none());
        assert_eq!(client.host(), "rec.example.com");
        assert!(client
            .urls()
            .load()
            .write_users
            .starts_with("https://rec.example.com/"));
        client.release();
        client.release();
        assert_eq!(client.host(), "rec.example.com");
    }

    #[test]
    fn test_multiple_hosts_without_runtime_fails() {
        let result = builder().hosts(["a.example.com", "b.example.com"]).build::<RetailUrls>();
        assert!(matches!(result, Err(ClientError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_multiple_hosts_start_tracker() {
        let client: GeneralClient = builder()
            .hosts(["127.0.0.1:1", "127.0.0.1:2"])
            .schema("http")
            .build()
            .unwrap();

        let tracker = client.tracker().expect("tracker for two hosts");
        assert_eq!(tracker.hosts().len(), 2);
        assert_eq!(client.host(), "127.0.0.1:1");

        client.release();
        assert!(tracker.is_shutdown());
    }

    #[test]
    fn test_saas_tenant_is_forced() {
        let client: SaasClient = builder()
            .tenant("ignored")
            .hosts(["rec.example.com"])
            .build()
            .unwrap();
        assert_eq!(client.context().tenant(), "saas");
    }

    #[test]
    fn test_check_batch() {
        assert!(check_batch("write", 100, MAX_WRITE_ITEM_COUNT).is_ok());
        assert!(matches!(
            check_batch("write", 101, MAX_WRITE_ITEM_COUNT),
            Err(ClientError::TooManyItems { actual: 101, max: 100, .. })
        ));
    }
}
