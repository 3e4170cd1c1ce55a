//! Retail product line endpoints.

use super::{fill, CommonUrlSet, ProductUrls, UrlRefresher};
use crate::client::Context;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Retail URLs for one host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetailUrlSet {
    /// Template with a `{}` scene placeholder,
    /// e.g. `https://host/predict/api/retail/demo/{}`
    pub predict_format: String,
    pub ack_impression: String,
    pub write_users: String,
    pub import_users: String,
    pub write_products: String,
    pub import_products: String,
    pub write_user_events: String,
    pub import_user_events: String,
    pub common: CommonUrlSet,
}

impl RetailUrlSet {
    pub fn predict(&self, scene: &str) -> String {
        fill(&self.predict_format, scene)
    }
}

pub struct RetailUrls {
    schema: String,
    tenant: String,
    urls: ArcSwap<RetailUrlSet>,
}

impl RetailUrls {
    pub fn load(&self) -> Arc<RetailUrlSet> {
        self.urls.load_full()
    }

    fn upload_url(&self, host: &str, topic: &str, method: &str) -> String {
        format!(
            "{}://{}/data/api/retail/{}/{}?method={}",
            self.schema, host, self.tenant, topic, method
        )
    }
}

impl UrlRefresher for RetailUrls {
    fn refresh(&self, host: &str) {
        self.urls.store(Arc::new(RetailUrlSet {
            predict_format: format!(
                "{}://{}/predict/api/retail/{}/{{}}",
                self.schema, host, self.tenant
            ),
            ack_impression: format!(
                "{}://{}/predict/api/retail/{}/ack_server_impressions",
                self.schema, host, self.tenant
            ),
            write_users: self.upload_url(host, "user", "write"),
            import_users: self.upload_url(host, "user", "import"),
            write_products: self.upload_url(host, "product", "write"),
            import_products: self.upload_url(host, "product", "import"),
            write_user_events: self.upload_url(host, "user_event", "write"),
            import_user_events: self.upload_url(host, "user_event", "import"),
            common: CommonUrlSet::build(&self.schema, &format!("retail/{}", self.tenant), host),
        }));
    }
}

impl ProductUrls for RetailUrls {
    const PRODUCT: &'static str = "retail";

    fn new(context: &Context) -> Self {
        Self {
            schema: context.schema().to_string(),
            tenant: context.tenant().to_string(),
            urls: ArcSwap::from_pointee(RetailUrlSet::default()),
        }
    }

    fn common(&self) -> CommonUrlSet {
        self.urls.load().common.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_context;

    #[test]
    fn test_refresh_generates_all_urls() {
        let urls = RetailUrls::new(&test_context("retail_demo"));
        urls.refresh("rec.example.com");
        let set = urls.load();

        assert_eq!(
            set.predict("home"),
            "https://rec.example.com/predict/api/retail/retail_demo/home"
        );
        assert_eq!(
            set.ack_impression,
            "https://rec.example.com/predict/api/retail/retail_demo/ack_server_impressions"
        );
        assert_eq!(
            set.write_users,
            "https://rec.example.com/data/api/retail/retail_demo/user?method=write"
        );
        assert_eq!(
            set.import_user_events,
            "https://rec.example.com/data/api/retail/retail_demo/user_event?method=import"
        );
        assert_eq!(
            set.common.get_operation,
            "https://rec.example.com/data/api/retail/retail_demo/operation?method=get"
        );
    }

    #[test]
    fn test_refresh_replaces_every_url() {
        let urls = RetailUrls::new(&test_context("demo"));
        urls.refresh("old.example.com");
        urls.refresh("new.example.com");
        let set = urls.load();

        for url in [
            &set.predict_format,
            &set.ack_impression,
            &set.write_users,
            &set.import_users,
            &set.write_products,
            &set.import_products,
            &set.write_user_events,
            &set.import_user_events,
        ] {
            assert!(url.contains("new.example.com"), "stale url: {}", url);
        }
        assert!(set.common.list_operations.contains("new.example.com"));
    }

    #[test]
    fn test_snapshot_keeps_one_host_across_refresh() {
        let urls = RetailUrls::new(&test_context("demo"));
        urls.refresh("old.example.com");
        let before = urls.load();
        urls.refresh("new.example.com");

        assert!(before.write_users.contains("old.example.com"));
        assert!(before.common.get_operation.contains("old.example.com"));
        assert!(urls.common().get_operation.contains("new.example.com"));
    }
}
