//! Data storage layer
//!
//! Supplies the analytics engine with user-scoped inventory records:
//! - `memory` - JSON snapshot loaded into memory at startup
//! - `traits` - Repository trait every backend implements
//! - `error` - Unified error type for the data layer

pub mod error;
pub mod memory;
pub mod traits;

pub use error::DataError;
pub use memory::{InventorySnapshot, MemoryInventory};
pub use traits::InventoryRepository;

use std::path::Path;
use std::sync::Arc;

use crate::domain::analytics::{CategoryRecord, ItemRecord, LocationRecord};

/// One user's collections, loaded together for a single analytics call
#[derive(Debug, Clone, Default)]
pub struct UserInventory {
    pub items: Vec<ItemRecord>,
    pub categories: Vec<CategoryRecord>,
    pub locations: Vec<LocationRecord>,
}

/// Inventory service shared by the API and CLI
///
/// Wraps whichever repository backs the application behind an `Arc` so it can
/// be cloned into request state cheaply.
#[derive(Clone)]
pub struct InventoryService {
    repository: Arc<dyn InventoryRepository>,
}

impl InventoryService {
    pub fn new(repository: Arc<dyn InventoryRepository>) -> Self {
        Self { repository }
    }

    /// Initialize from a snapshot file
    pub async fn init(data_file: &Path) -> Result<Self, DataError> {
        let inventory = MemoryInventory::load(data_file).await?;
        Ok(Self::new(Arc::new(inventory)))
    }

    /// Access the underlying repository
    pub fn repository(&self) -> &dyn InventoryRepository {
        self.repository.as_ref()
    }

    /// Load items, categories and locations for one user concurrently
    pub async fn user_inventory(&self, user_id: i64) -> Result<UserInventory, DataError> {
        let repo = self.repository();
        let (items, categories, locations) = tokio::try_join!(
            repo.list_items(user_id),
            repo.list_categories(user_id),
            repo.list_locations(user_id),
        )?;
        tracing::trace!(
            user_id,
            items = items.len(),
            categories = categories.len(),
            locations = locations.len(),
            "Loaded user inventory"
        );
        Ok(UserInventory {
            items,
            categories,
            locations,
        })
    }
}
