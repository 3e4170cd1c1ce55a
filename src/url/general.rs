//! General product line endpoints.

use super::{fill, CommonUrlSet, ProductUrls, UrlRefresher};
use crate::client::Context;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// General URLs for one host. Templates carry a `{}` placeholder for the
/// scene or data topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneralUrlSet {
    pub predict_format: String,
    pub callback: String,
    pub write_data_format: String,
    pub import_data_format: String,
    pub done_format: String,
    pub common: CommonUrlSet,
}

impl GeneralUrlSet {
    pub fn predict(&self, scene: &str) -> String {
        fill(&self.predict_format, scene)
    }

    pub fn write_data(&self, topic: &str) -> String {
        fill(&self.write_data_format, topic)
    }

    pub fn import_data(&self, topic: &str) -> String {
        fill(&self.import_data_format, topic)
    }

    pub fn done(&self, topic: &str) -> String {
        fill(&self.done_format, topic)
    }
}

pub struct GeneralUrls {
    schema: String,
    tenant: String,
    urls: ArcSwap<GeneralUrlSet>,
}

impl GeneralUrls {
    pub fn load(&self) -> Arc<GeneralUrlSet> {
        self.urls.load_full()
    }

    fn upload_format(&self, host: &str, method: &str) -> String {
        format!(
            "{}://{}/data/api/{}/{{}}?method={}",
            self.schema, host, self.tenant, method
        )
    }
}

impl UrlRefresher for GeneralUrls {
    fn refresh(&self, host: &str) {
        self.urls.store(Arc::new(GeneralUrlSet {
            predict_format: format!("{}://{}/predict/api/{}/{{}}", self.schema, host, self.tenant),
            callback: format!("{}://{}/predict/api/{}/callback", self.schema, host, self.tenant),
            write_data_format: self.upload_format(host, "write"),
            import_data_format: self.upload_format(host, "import"),
            done_format: format!(
                "{}://{}/data/api/{}/done?topic={{}}",
                self.schema, host, self.tenant
            ),
            common: CommonUrlSet::build(&self.schema, &self.tenant, host),
        }));
    }
}

impl ProductUrls for GeneralUrls {
    const PRODUCT: &'static str = "general";

    fn new(context: &Context) -> Self {
        Self {
            schema: context.schema().to_string(),
            tenant: context.tenant().to_string(),
            urls: ArcSwap::from_pointee(GeneralUrlSet::default()),
        }
    }

    fn common(&self) -> CommonUrlSet {
        self.urls.load().common.clone()
    }
}
