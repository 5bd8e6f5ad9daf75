//! In-memory item catalog.
//!
//! Failures are lathos client errors wrapped in [`CatalogError`], so callers
//! see a domain error while the boundary can still classify the cause.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use lathos_core::{ErrClient, duplicate, not_available, not_found, unprocessable};
use lathos_shared::dto::ItemResponse;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
        }
    }
}

/// Catalog errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("lookup of item {id} failed")]
    Lookup {
        id: u64,
        #[source]
        source: ErrClient,
    },

    #[error("item {name:?} rejected")]
    Rejected {
        name: String,
        #[source]
        source: ErrClient,
    },

    #[error("catalog is in maintenance")]
    Maintenance(#[source] ErrClient),

    #[error("catalog storage lock poisoned")]
    Poisoned,
}

pub struct Catalog {
    items: RwLock<BTreeMap<u64, Item>>,
    next_id: AtomicU64,
    capacity: usize,
    maintenance: AtomicBool,
}

impl Catalog {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            capacity,
            maintenance: AtomicBool::new(false),
        }
    }

    /// While enabled, writes fail with a not available error.
    pub fn set_maintenance(&self, enabled: bool) {
        self.maintenance.store(enabled, Ordering::SeqCst);
        tracing::info!(enabled, "Catalog maintenance mode changed");
    }

    pub fn list(&self) -> Result<Vec<Item>, CatalogError> {
        let items = self.items.read().map_err(|_| CatalogError::Poisoned)?;
        Ok(items.values().cloned().collect())
    }

    pub fn get(&self, id: u64) -> Result<Item, CatalogError> {
        let items = self.items.read().map_err(|_| CatalogError::Poisoned)?;
        items.get(&id).cloned().ok_or_else(|| CatalogError::Lookup {
            id,
            source: not_found!("ITEM404", "item {id} does not exist"),
        })
    }

    pub fn create(&self, name: &str) -> Result<Item, CatalogError> {
        self.ensure_writable()?;

        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::Rejected {
                name: name.to_string(),
                source: ErrClient::bad_request("ITEM400", "item name must not be blank"),
            });
        }

        let mut items = self.items.write().map_err(|_| CatalogError::Poisoned)?;
        if items.values().any(|item| item.name == name) {
            return Err(CatalogError::Rejected {
                name: name.to_string(),
                source: duplicate!("ITEM409", "item {name:?} already exists"),
            });
        }
        if items.len() >= self.capacity {
            return Err(CatalogError::Rejected {
                name: name.to_string(),
                source: unprocessable!("ITEM422", "catalog is full ({} items)", self.capacity),
            });
        }

        let item = Item {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: name.to_string(),
        };
        items.insert(item.id, item.clone());
        Ok(item)
    }

    pub fn remove(&self, id: u64) -> Result<Item, CatalogError> {
        self.ensure_writable()?;

        let mut items = self.items.write().map_err(|_| CatalogError::Poisoned)?;
        items.remove(&id).ok_or_else(|| CatalogError::Lookup {
            id,
            source: not_found!("ITEM404", "item {id} does not exist"),
        })
    }

    fn ensure_writable(&self) -> Result<(), CatalogError> {
        if self.maintenance.load(Ordering::SeqCst) {
            return Err(CatalogError::Maintenance(not_available!(
                "CAT503",
                "the catalog is not accepting changes"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lathos_core::{
        is_bad_request, is_cannot_process, is_client_error, is_duplicate, is_not_found,
        is_unavailable,
    };

    #[test]
    fn test_create_and_get() {
        let catalog = Catalog::new(10);

        let item = catalog.create("  widget ").unwrap();
        assert_eq!(item.name, "widget");
        assert_eq!(catalog.get(item.id).unwrap(), item);
        assert_eq!(catalog.list().unwrap(), vec![item]);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let catalog = Catalog::new(10);

        let err = catalog.get(42).unwrap_err();

        assert!(matches!(err, CatalogError::Lookup { id: 42, .. }));
        assert!(is_not_found(&err));
        assert!(is_client_error(&err));
    }

    #[test]
    fn test_create_rejections() {
        let catalog = Catalog::new(1);

        let blank = catalog.create("   ").unwrap_err();
        assert!(is_bad_request(&blank));

        catalog.create("widget").unwrap();

        let dup = catalog.create("widget").unwrap_err();
        assert!(is_duplicate(&dup));
        assert!(!is_cannot_process(&dup));

        let full = catalog.create("gadget").unwrap_err();
        assert!(is_cannot_process(&full));
    }

    #[test]
    fn test_maintenance_blocks_writes() {
        let catalog = Catalog::new(10);
        let item = catalog.create("widget").unwrap();

        catalog.set_maintenance(true);
        assert!(is_unavailable(&catalog.create("gadget").unwrap_err()));
        assert!(is_unavailable(&catalog.remove(item.id).unwrap_err()));
        assert!(catalog.get(item.id).is_ok());

        catalog.set_maintenance(false);
        assert_eq!(catalog.remove(item.id).unwrap(), item);
        assert!(is_not_found(&catalog.remove(item.id).unwrap_err()));
    }

    #[test]
    fn test_poisoned_is_not_a_client_error() {
        let err = CatalogError::Poisoned;

        assert!(!is_client_error(&err));
    }
}
