//! Retail SaaS endpoints. The tenant segment is fixed to `saas`.

use super::{CommonUrlSet, ProductUrls, UrlRefresher};
use crate::client::Context;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// SaaS URLs for one host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaasUrlSet {
    pub predict: String,
    pub ack_impression: String,
    pub write_users: String,
    pub write_products: String,
    pub write_user_events: String,
    pub common: CommonUrlSet,
}

pub struct SaasUrls {
    schema: String,
    tenant: String,
    urls: ArcSwap<SaasUrlSet>,
}

impl SaasUrls {
    pub fn load(&self) -> Arc<SaasUrlSet> {
        self.urls.load_full()
    }

    fn action_url(&self, host: &str, action: &str) -> String {
        format!("{}://{}/RetailSaaS/{}", self.schema, host, action)
    }
}

impl UrlRefresher for SaasUrls {
    fn refresh(&self, host: &str) {
        self.urls.store(Arc::new(SaasUrlSet {
            predict: self.action_url(host, "Predict"),
            ack_impression: self.action_url(host, "AckServerImpressions"),
            write_users: self.action_url(host, "WriteUsers"),
            write_products: self.action_url(host, "WriteProducts"),
            write_user_events: self.action_url(host, "WriteUserEvents"),
            common: CommonUrlSet::build(&self.schema, &self.tenant, host),
        }));
    }
}

impl ProductUrls for SaasUrls {
    const PRODUCT: &'static str = "saas";

    fn new(context: &Context) -> Self {
        Self {
            schema: context.schema().to_string(),
            tenant: context.tenant().to_string(),
            urls: ArcSwap::from_pointee(SaasUrlSet::default()),
        }
    }

    fn common(&self) -> CommonUrlSet {
        self.urls.load().common.clone()
    }

    fn fixed_tenant() -> Option<&'static str> {
        Some("saas")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_context;

    #[test]
    fn test_refresh_generates_action_urls() {
        let urls = SaasUrls::new(&test_context("saas"));
        urls.refresh("rec-api-sg1.example.com");
        let set = urls.load();

        assert_eq!(set.predict, "https://rec-api-sg1.example.com/RetailSaaS/Predict");
        assert_eq!(
            set.write_user_events,
            "https://rec-api-sg1.example.com/RetailSaaS/WriteUserEvents"
        );
        assert_eq!(
            set.common.get_operation,
            "https://rec-api-sg1.example.com/data/api/saas/operation?method=get"
        );
    }

    #[test]
    fn test_tenant_is_fixed() {
        assert_eq!(SaasUrls::fixed_tenant(), Some("saas"));
    }
}
