//! Operation endpoints shared by all product lines.

/// Operation URLs for one host.
///
/// Embedded in every product line's URL set, so it is always published
/// together with the product endpoints of the same host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonUrlSet {
    /// e.g. `https://host/data/api/retail_demo/operation?method=get`
    pub get_operation: String,
    pub list_operations: String,
}

impl CommonUrlSet {
    /// `scope` is the path segment between `/data/api/` and `/operation`:
    /// `{tenant}` for most product lines and `retail/{tenant}` for retail.
    pub fn build(schema: &str, scope: &str, host: &str) -> Self {
        let operation_url = |method: &str| {
            format!(
                "{}://{}/data/api/{}/operation?method={}",
                schema, host, scope, method
            )
        };
        Self {
            get_operation: operation_url("get"),
            list_operations: operation_url("list"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let set = CommonUrlSet::default();
        assert!(set.get_operation.is_empty());
        assert!(set.list_operations.is_empty());
    }

    #[test]
    fn test_build_operation_urls() {
        let set = CommonUrlSet::build("https", "demo", "rec.example.com");
        assert_eq!(
            set.get_operation,
            "https://rec.example.com/data/api/demo/operation?method=get"
        );
        assert_eq!(
            set.list_operations,
            "https://rec.example.com/data/api/demo/operation?method=list"
        );
    }

    #[test]
    fn test_retail_scope() {
        let set = CommonUrlSet::build("http", "retail/demo", "h");
        assert_eq!(set.get_operation, "http://h/data/api/retail/demo/operation?method=get");
    }
}
