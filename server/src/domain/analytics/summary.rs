//! Analytics summary assembled from the aggregators

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::aggregate::{
    bucket_by_period, image_coverage, quantity_stats, stats_by_category, stats_by_location,
};
use super::error::AnalyticsError;
use super::types::{
    CategoryRecord, CategoryStat, Granularity, ItemRecord, LocationRecord, LocationStat,
    TimeBucketMap,
};

/// Full analytics payload for one user's inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsSummary {
    pub total_items: u64,
    pub total_quantity: i64,
    pub items_by_category: Vec<CategoryStat>,
    pub items_by_location: Vec<LocationStat>,
    pub yearly_data: TimeBucketMap,
    pub monthly_data: TimeBucketMap,
    pub weekly_data: TimeBucketMap,
    pub daily_data: TimeBucketMap,
    pub items_with_images: u64,
    pub items_without_images: u64,
    /// Same value as `image_coverage_percentage`, kept under its dashboard key
    pub image_coverage: f64,
    pub image_coverage_percentage: f64,
    pub image_coverage_ratio: f64,
    pub avg_quantity: f64,
    pub min_quantity: i64,
    pub max_quantity: i64,
    pub median_quantity: f64,
}

/// Build the summary for one inventory snapshot.
///
/// Any item with an unusable `created_at` aborts the whole build.
pub fn build_summary(
    items: &[ItemRecord],
    categories: &[CategoryRecord],
    locations: &[LocationRecord],
) -> Result<AnalyticsSummary, AnalyticsError> {
    let [yearly_data, monthly_data, weekly_data, daily_data] = [
        bucket_by_period(items, Granularity::Year)?,
        bucket_by_period(items, Granularity::Month)?,
        bucket_by_period(items, Granularity::Week)?,
        bucket_by_period(items, Granularity::Day)?,
    ];

    let images = image_coverage(items);
    let quantities = quantity_stats(items);

    Ok(AnalyticsSummary {
        total_items: items.len() as u64,
        total_quantity: quantities.total,
        items_by_category: stats_by_category(items, categories),
        items_by_location: stats_by_location(items, locations),
        yearly_data,
        monthly_data,
        weekly_data,
        daily_data,
        items_with_images: images.items_with_images,
        items_without_images: images.items_without_images,
        image_coverage: images.coverage_percentage,
        image_coverage_percentage: images.coverage_percentage,
        image_coverage_ratio: images.coverage_ratio,
        avg_quantity: quantities.average,
        min_quantity: quantities.min,
        max_quantity: quantities.max,
        median_quantity: quantities.median,
    })
}
