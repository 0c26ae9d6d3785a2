//! Repository traits for inventory backends
//!
//! The analytics engine only ever sees plain records; this trait is the seam
//! through which a backend hands over one user's collections. Access control
//! happens before these calls: every method assumes `user_id` is already
//! authenticated and authorized.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::domain::analytics::{CategoryRecord, ItemRecord, LocationRecord};

/// Read-only access to one user's inventory
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// All items owned by the user, in insertion order
    async fn list_items(&self, user_id: i64) -> Result<Vec<ItemRecord>, DataError>;

    /// Categories owned by the user, ordered by name then id
    async fn list_categories(&self, user_id: i64) -> Result<Vec<CategoryRecord>, DataError>;

    /// Locations owned by the user, ordered by name then id
    async fn list_locations(&self, user_id: i64) -> Result<Vec<LocationRecord>, DataError>;
}
