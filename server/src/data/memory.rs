//! In-memory inventory repository backed by a JSON snapshot
//!
//! The snapshot is read once at startup and never written back. Every row
//! carries the `user_id` of its owner; queries filter on it.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::DataError;
use super::traits::InventoryRepository;
use crate::domain::analytics::{CategoryRecord, ItemRecord, LocationRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRow {
    pub user_id: i64,
    #[serde(flatten)]
    pub record: CategoryRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRow {
    pub user_id: i64,
    #[serde(flatten)]
    pub record: LocationRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRow {
    pub user_id: i64,
    #[serde(flatten)]
    pub record: ItemRecord,
}

/// On-disk snapshot layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(default)]
    pub categories: Vec<CategoryRow>,
    #[serde(default)]
    pub locations: Vec<LocationRow>,
    #[serde(default)]
    pub items: Vec<ItemRow>,
}

impl InventorySnapshot {
    /// Check ids are unique per table, quantities are non-negative and item
    /// references point at a category/location owned by the same user.
    ///
    /// `created_at` is left alone; the analytics engine reports bad
    /// timestamps per item.
    pub fn validate(&self) -> Result<(), DataError> {
        let category_owners = owners(
            "categories",
            self.categories.iter().map(|r| (r.record.id, r.user_id)),
        )?;
        let location_owners = owners(
            "locations",
            self.locations.iter().map(|r| (r.record.id, r.user_id)),
        )?;

        let mut item_ids = HashSet::new();
        for row in &self.items {
            let item = &row.record;
            if !item_ids.insert(item.id) {
                return Err(DataError::invalid_snapshot("items", item.id, "duplicate id"));
            }
            if item.quantity < 0 {
                return Err(DataError::invalid_snapshot(
                    "items",
                    item.id,
                    format!("negative quantity {}", item.quantity),
                ));
            }
            check_reference("category", item.id, row.user_id, item.category_id, &category_owners)?;
            check_reference("location", item.id, row.user_id, item.location_id, &location_owners)?;
        }
        Ok(())
    }
}

fn owners(
    table: &'static str,
    rows: impl Iterator<Item = (i64, i64)>,
) -> Result<HashMap<i64, i64>, DataError> {
    let mut map = HashMap::new();
    for (id, user_id) in rows {
        if map.insert(id, user_id).is_some() {
            return Err(DataError::invalid_snapshot(table, id, "duplicate id"));
        }
    }
    Ok(map)
}

fn check_reference(
    dimension: &str,
    item_id: i64,
    user_id: i64,
    reference: Option<i64>,
    owners: &HashMap<i64, i64>,
) -> Result<(), DataError> {
    let Some(ref_id) = reference else {
        return Ok(());
    };
    match owners.get(&ref_id) {
        Some(owner) if *owner == user_id => Ok(()),
        Some(_) => Err(DataError::invalid_snapshot(
            "items",
            item_id,
            format!("{} {} belongs to another user", dimension, ref_id),
        )),
        None => Err(DataError::invalid_snapshot(
            "items",
            item_id,
            format!("unknown {} {}", dimension, ref_id),
        )),
    }
}

/// Repository serving user-scoped copies of a validated snapshot
#[derive(Debug, Clone, Default)]
pub struct MemoryInventory {
    snapshot: InventorySnapshot,
}

impl MemoryInventory {
    /// Build from an already parsed snapshot
    pub fn from_snapshot(snapshot: InventorySnapshot) -> Result<Self, DataError> {
        snapshot.validate()?;
        Ok(Self { snapshot })
    }

    /// Load and validate a JSON snapshot file
    pub async fn load(path: &Path) -> Result<Self, DataError> {
        tracing::debug!(path = %path.display(), "Loading inventory snapshot");
        let content = tokio::fs::read_to_string(path).await?;
        let snapshot: InventorySnapshot = serde_json::from_str(&content)?;
        let inventory = Self::from_snapshot(snapshot)?;
        tracing::debug!(
            items = inventory.snapshot.items.len(),
            categories = inventory.snapshot.categories.len(),
            locations = inventory.snapshot.locations.len(),
            "Inventory snapshot loaded"
        );
        Ok(inventory)
    }
}

#[async_trait]
impl InventoryRepository for MemoryInventory {
    async fn list_items(&self, user_id: i64) -> Result<Vec<ItemRecord>, DataError> {
        Ok(self
            .snapshot
            .items
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(|row| row.record.clone())
            .collect())
    }

    async fn list_categories(&self, user_id: i64) -> Result<Vec<CategoryRecord>, DataError> {
        let mut categories: Vec<CategoryRecord> = self
            .snapshot
            .categories
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(|row| row.record.clone())
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn list_locations(&self, user_id: i64) -> Result<Vec<LocationRecord>, DataError> {
        let mut locations: Vec<LocationRecord> = self
            .snapshot
            .locations
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(|row| row.record.clone())
            .collect();
        locations.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r##"{
        "categories": [
            { "user_id": 1, "id": 1, "name": "Tools", "color": "#ff0000" },
            { "user_id": 1, "id": 2, "name": "Electronics", "color": "#00ff00" },
            { "user_id": 2, "id": 3, "name": "Books", "color": "#0000ff" }
        ],
        "locations": [
            { "user_id": 1, "id": 10, "name": "Garage" },
            { "user_id": 1, "id": 11, "name": "Attic" }
        ],
        "items": [
            { "user_id": 1, "id": 100, "title": "Drill", "quantity": 1,
              "category_id": 1, "location_id": 10, "image": "drill.jpg",
              "created_at": "2024-01-15 10:00:00" },
            { "user_id": 1, "id": 101, "title": "Radio", "quantity": 2,
              "category_id": 2, "created_at": "2024-02-01" },
            { "user_id": 2, "id": 200, "title": "Novel", "quantity": 5,
              "category_id": 3, "created_at": "2024-03-01" }
        ]
    }"##;

    fn snapshot() -> InventorySnapshot {
        serde_json::from_str(SNAPSHOT).unwrap()
    }

    #[test]
    fn test_snapshot_parse_flattens_records() {
        let snapshot = snapshot();
        assert_eq!(snapshot.items.len(), 3);
        assert_eq!(snapshot.items[0].user_id, 1);
        assert_eq!(snapshot.items[0].record.title, "Drill");
        assert_eq!(snapshot.items[1].record.location_id, None);
        assert_eq!(snapshot.categories[2].record.name, "Books");
    }

    #[test]
    fn test_snapshot_parse_empty_object() {
        let snapshot: InventorySnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.items.is_empty());
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_item_id() {
        let mut snapshot = snapshot();
        snapshot.items[1].record.id = 100;
        let err = snapshot.validate().unwrap_err();
        assert!(matches!(
            err,
            DataError::InvalidSnapshot { table: "items", id: 100, .. }
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_category_id() {
        let mut snapshot = snapshot();
        snapshot.categories[1].record.id = 1;
        let err = snapshot.validate().unwrap_err();
        assert!(matches!(
            err,
            DataError::InvalidSnapshot { table: "categories", id: 1, .. }
        ));
    }

    #[test]
    fn test_validate_rejects_negative_quantity() {
        let mut snapshot = snapshot();
        snapshot.items[0].record.quantity = -1;
        let err = snapshot.validate().unwrap_err();
        assert!(err.to_string().contains("negative quantity -1"));
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        let mut snapshot = snapshot();
        snapshot.items[0].record.category_id = Some(99);
        let err = snapshot.validate().unwrap_err();
        assert!(err.to_string().contains("unknown category 99"));
    }

    #[test]
    fn test_validate_rejects_foreign_location() {
        let mut snapshot = snapshot();
        snapshot.items[2].record.location_id = Some(10);
        let err = snapshot.validate().unwrap_err();
        assert!(err.to_string().contains("location 10 belongs to another user"));
    }

    #[test]
    fn test_validate_ignores_bad_timestamps() {
        let mut snapshot = snapshot();
        snapshot.items[0].record.created_at = Some("garbage".to_string());
        assert!(snapshot.validate().is_ok());
    }

    #[tokio::test]
    async fn test_list_items_scoped_to_user() {
        let inventory = MemoryInventory::from_snapshot(snapshot()).unwrap();

        let items = inventory.list_items(1).await.unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![100, 101]);

        let items = inventory.list_items(2).await.unwrap();
        assert_eq!(items.len(), 1);

        assert!(inventory.list_items(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_categories_sorted_by_name() {
        let inventory = MemoryInventory::from_snapshot(snapshot()).unwrap();
        let names: Vec<String> = inventory
            .list_categories(1)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Electronics", "Tools"]);
    }

    #[tokio::test]
    async fn test_list_locations_sorted_by_name() {
        let inventory = MemoryInventory::from_snapshot(snapshot()).unwrap();
        let ids: Vec<i64> = inventory
            .list_locations(1)
            .await
            .unwrap()
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![11, 10]);
        assert!(inventory.list_locations(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, SNAPSHOT).unwrap();

        let inventory = MemoryInventory::load(&path).await.unwrap();
        assert_eq!(inventory.list_items(1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MemoryInventory::load(&dir.path().join("missing.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }

    #[tokio::test]
    async fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = MemoryInventory::load(&path).await.unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }
}
