//! Record and statistic types for the analytics engine

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Input records
// =============================================================================

/// Inventory item snapshot handed to the engine by the repository layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub quantity: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub location_id: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
    /// Raw timestamp text as stored (RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`)
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ItemRecord {
    /// True when the item references a non-blank image
    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocationRecord {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Time buckets
// =============================================================================

/// Period key -> item count, ascending by key
pub type TimeBucketMap = BTreeMap<String, u64>;

/// Time bucket granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Year,
    Month,
    Week,
    Day,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [Self::Year, Self::Month, Self::Week, Self::Day];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
        }
    }

    /// Parse a granularity name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "year" | "yearly" => Some(Self::Year),
            "month" | "monthly" => Some(Self::Month),
            "week" | "weekly" => Some(Self::Week),
            "day" | "daily" => Some(Self::Day),
            _ => None,
        }
    }

    /// Bucket key for a date.
    ///
    /// Week keys pair the ISO week number with the ISO week-based year, so
    /// 2024-12-30 lands in `2025-01` and keys stay in chronological order.
    pub fn key_for(&self, date: NaiveDate) -> String {
        match self {
            Self::Year => format!("{:04}", date.year()),
            Self::Month => format!("{:04}-{:02}", date.year(), date.month()),
            Self::Week => {
                let week = date.iso_week();
                format!("{:04}-{:02}", week.year(), week.week())
            }
            Self::Day => format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                date.month(),
                date.day()
            ),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Aggregates
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryStat {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub count: u64,
    pub total_quantity: i64,
    pub avg_quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationStat {
    pub id: i64,
    pub name: String,
    pub count: u64,
    pub total_quantity: i64,
    pub avg_quantity: f64,
    /// Summed quantity; there is no capacity model behind this number
    pub utilization: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageStats {
    pub total_items: u64,
    pub items_with_images: u64,
    pub items_without_images: u64,
    pub coverage_percentage: f64,
    pub coverage_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuantityStats {
    pub total: i64,
    pub average: f64,
    pub min: i64,
    pub max: i64,
    pub median: f64,
}
