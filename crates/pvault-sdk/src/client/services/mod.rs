//! API service implementations.

mod collections;
mod objects;
mod system;
mod tokens;

pub use collections::CollectionsService;
pub use objects::ObjectsService;
pub use system::SystemService;
pub use tokens::TokensService;

/// Prefix shared by every vault endpoint.
pub(crate) const API_PREFIX: &str = "/api/pvlt/1.0";

/// Path of a control-plane endpoint.
fn ctl(path: &str) -> String {
    format!("{API_PREFIX}/ctl/{path}")
}

/// Path of a data-plane endpoint scoped to a collection.
fn collection_data(collection: &str, path: &str) -> String {
    let collection = urlencoding::encode(collection);
    if path.is_empty() {
        format!("{API_PREFIX}/data/collections/{collection}")
    } else {
        format!("{API_PREFIX}/data/collections/{collection}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(ctl("info/health"), "/api/pvlt/1.0/ctl/info/health");
        assert_eq!(
            collection_data("customers", "tokens/rotate"),
            "/api/pvlt/1.0/data/collections/customers/tokens/rotate"
        );
        assert_eq!(
            collection_data("my data", "objects"),
            "/api/pvlt/1.0/data/collections/my%20data/objects"
        );
    }
}
