use std::sync::Arc;

use crate::{data::Catalog, models::ItemMeta};

/// Resolves item identifiers to display metadata
///
/// Missing catalog data is the normal "unknown" outcome, never an error.
#[derive(Debug, Clone, Default)]
pub struct MetadataResolver {
    catalog: Option<Arc<Catalog>>,
}

impl MetadataResolver {
    pub fn new(catalog: Option<Arc<Catalog>>) -> Self {
        Self { catalog }
    }

    pub fn resolve(&self, item_id: &str) -> ItemMeta {
        let entry = self.catalog.as_ref().and_then(|catalog| catalog.get(item_id));

        ItemMeta {
            name: item_id.to_string(),
            price: entry.and_then(|e| e.price),
            category: entry.and_then(|e| e.category.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> MetadataResolver {
        let catalog =
            Catalog::from_reader("item_id,price,category\nButter,1.99,dairy\n".as_bytes()).unwrap();
        MetadataResolver::new(Some(Arc::new(catalog)))
    }

    #[test]
    fn test_resolve_known_item() {
        let meta = resolver().resolve("BUTTER");

        assert_eq!(meta.name, "BUTTER");
        assert_eq!(meta.price, Some(1.99));
        assert_eq!(meta.category.as_deref(), Some("dairy"));
    }

    #[test]
    fn test_resolve_unknown_item() {
        let meta = resolver().resolve("caviar");

        assert_eq!(
            meta,
            ItemMeta {
                name: "caviar".to_string(),
                price: None,
                category: None,
            }
        );
    }

    #[test]
    fn test_resolve_without_catalog() {
        let meta = MetadataResolver::default().resolve("butter");

        assert_eq!(meta.price, None);
        assert_eq!(meta.category, None);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("butter"), resolver.resolve("butter"));
    }
}
