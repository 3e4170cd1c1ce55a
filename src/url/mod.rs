//! Host-parameterised URL holders.
//!
//! Each product line keeps its absolute endpoint URLs, including the shared
//! operation endpoints, in one immutable set published through
//! [`arc_swap::ArcSwap`]. [`UrlRefresher::refresh`] rebuilds the whole set
//! for a new host and swaps it in one store, so concurrent readers always
//! see URLs for exactly one host.

mod common;
mod general;
mod retail;
mod saas;

pub use common::CommonUrlSet;
pub use general::{GeneralUrlSet, GeneralUrls};
pub use retail::{RetailUrlSet, RetailUrls};
pub use saas::{SaasUrlSet, SaasUrls};

use crate::client::Context;

/// Placeholder substituted with a scene or topic at request time.
pub const PLACEHOLDER: &str = "{}";

/// Anything holding URLs that embed the current host.
pub trait UrlRefresher: Send + Sync {
    /// Regenerate and republish every URL for `host`.
    fn refresh(&self, host: &str);
}

/// URL holder for one product line.
pub trait ProductUrls: UrlRefresher + Sized + 'static {
    /// Short product line name, used in logs.
    const PRODUCT: &'static str;

    /// Build an empty holder; call [`UrlRefresher::refresh`] before use.
    fn new(context: &Context) -> Self;

    /// Operation endpoints of the current URL set.
    fn common(&self) -> CommonUrlSet;

    /// Tenant forced by the product line, overriding configuration.
    fn fixed_tenant() -> Option<&'static str> {
        None
    }
}

/// Substitute the `{}` placeholder of a URL template.
pub fn fill(template: &str, value: &str) -> String {
    template.replacen(PLACEHOLDER, value, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_placeholder() {
        assert_eq!(
            fill("https://h/predict/api/demo/{}", "home"),
            "https://h/predict/api/demo/home"
        );
    }

    #[test]
    fn test_fill_without_placeholder_is_identity() {
        assert_eq!(fill("https://h/ping", "x"), "https://h/ping");
    }
}
