//! Inventory analytics engine
//!
//! Stateless aggregation over one user's items, categories and locations.
//! Every presentation layer (API routes, CLI summary) goes through
//! [`build_summary`] or the individual aggregators; none of them re-implement
//! bucketing or rounding.
//!
//! - `aggregate` - per-dimension aggregators (periods, categories, locations, images, quantities)
//! - `summary` - composition into [`AnalyticsSummary`]

pub mod aggregate;
mod error;
pub mod summary;
pub mod types;

pub use aggregate::{
    bucket_by_period, image_coverage, quantity_stats, stats_by_category, stats_by_location,
};
pub use error::AnalyticsError;
pub use summary::{AnalyticsSummary, build_summary};
pub use types::{
    CategoryRecord, CategoryStat, Granularity, ImageStats, ItemRecord, LocationRecord,
    LocationStat, QuantityStats, TimeBucketMap,
};
