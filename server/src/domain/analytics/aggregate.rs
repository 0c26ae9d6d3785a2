//! Pure aggregation functions over item records

use chrono::NaiveDate;

use super::error::AnalyticsError;
use super::types::{
    CategoryRecord, CategoryStat, Granularity, ImageStats, ItemRecord, LocationRecord,
    LocationStat, QuantityStats, TimeBucketMap,
};
use crate::utils::time::parse_record_date;

/// Count items per period key.
///
/// Fails on the first item whose `created_at` is missing or unparseable.
pub fn bucket_by_period(
    items: &[ItemRecord],
    granularity: Granularity,
) -> Result<TimeBucketMap, AnalyticsError> {
    let mut buckets = TimeBucketMap::new();
    for item in items {
        let date = record_date(item)?;
        *buckets.entry(granularity.key_for(date)).or_insert(0) += 1;
    }
    Ok(buckets)
}

/// Per-category counts and quantities, in the given category order
pub fn stats_by_category(items: &[ItemRecord], categories: &[CategoryRecord]) -> Vec<CategoryStat> {
    categories
        .iter()
        .map(|category| {
            let (count, total_quantity) = tally(items, |item| item.category_id == Some(category.id));
            CategoryStat {
                id: category.id,
                name: category.name.clone(),
                color: category.color.clone(),
                count,
                total_quantity: saturate(total_quantity),
                avg_quantity: average(total_quantity, count),
            }
        })
        .collect()
}

/// Per-location counts and quantities, in the given location order
pub fn stats_by_location(items: &[ItemRecord], locations: &[LocationRecord]) -> Vec<LocationStat> {
    locations
        .iter()
        .map(|location| {
            let (count, total_quantity) = tally(items, |item| item.location_id == Some(location.id));
            LocationStat {
                id: location.id,
                name: location.name.clone(),
                count,
                total_quantity: saturate(total_quantity),
                avg_quantity: average(total_quantity, count),
                utilization: saturate(total_quantity) as f64,
            }
        })
        .collect()
}

pub fn image_coverage(items: &[ItemRecord]) -> ImageStats {
    let total_items = items.len() as u64;
    let items_with_images = items.iter().filter(|item| item.has_image()).count() as u64;

    let (coverage_percentage, coverage_ratio) = if total_items == 0 {
        (0.0, 0.0)
    } else {
        let with = i128::from(items_with_images);
        let total = i128::from(total_items);
        (round_ratio(with * 100, total, 10), round_ratio(with, total, 100))
    };

    ImageStats {
        total_items,
        items_with_images,
        items_without_images: total_items - items_with_images,
        coverage_percentage,
        coverage_ratio,
    }
}

pub fn quantity_stats(items: &[ItemRecord]) -> QuantityStats {
    let mut quantities: Vec<i64> = items.iter().map(|item| item.quantity).collect();
    if quantities.is_empty() {
        return QuantityStats::default();
    }
    quantities.sort_unstable();

    let n = quantities.len();
    let total: i128 = quantities.iter().map(|q| i128::from(*q)).sum();
    let mid = n / 2;
    let median = if n % 2 == 1 {
        quantities[mid] as f64
    } else {
        let pair = i128::from(quantities[mid - 1]) + i128::from(quantities[mid]);
        round_ratio(pair, 2, 10)
    };

    QuantityStats {
        total: saturate(total),
        average: average(total, n as u64),
        min: quantities[0],
        max: quantities[n - 1],
        median,
    }
}

fn record_date(item: &ItemRecord) -> Result<NaiveDate, AnalyticsError> {
    let raw = item
        .created_at
        .as_deref()
        .ok_or_else(|| AnalyticsError::invalid_record(item.id, "missing created_at"))?;
    parse_record_date(raw).ok_or_else(|| {
        AnalyticsError::invalid_record(item.id, format!("unparseable created_at '{}'", raw))
    })
}

/// (count, summed quantity) of the items matching `pred`
///
/// Sums in `i128` so no realistic item count can overflow.
fn tally<F>(items: &[ItemRecord], pred: F) -> (u64, i128)
where
    F: Fn(&ItemRecord) -> bool,
{
    items
        .iter()
        .filter(|item| pred(item))
        .fold((0, 0), |(count, total), item| {
            (count + 1, total + i128::from(item.quantity))
        })
}

/// Mean rounded to one decimal, 0 for an empty set
fn average(total: i128, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        round_ratio(total, i128::from(count), 10)
    }
}

/// Clamp an exact sum into the `i64` wire type
fn saturate(v: i128) -> i64 {
    i64::try_from(v).unwrap_or(if v < 0 { i64::MIN } else { i64::MAX })
}

/// `num / den` rounded half-up to a multiple of `1 / scale`.
///
/// Rounds on integers; only the final multiple is converted to `f64`, so
/// ties such as 29/200 land on 0.15 rather than 0.14.
fn round_ratio(num: i128, den: i128, scale: i128) -> f64 {
    debug_assert!(den > 0 && scale > 0);
    let units = (2 * num * scale + den).div_euclid(2 * den);
    units as f64 / scale as f64
}
