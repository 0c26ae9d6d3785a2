//! Analytics API endpoints
//!
//! Every handler loads the caller's inventory through the repository and runs
//! the analytics engine over it; no handler aggregates on its own.

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::routing::get;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::types::ApiError;
use crate::data::{InventoryService, UserInventory};
use crate::domain::analytics::{
    self, AnalyticsSummary, CategoryStat, Granularity, ImageStats, LocationStat, QuantityStats,
    TimeBucketMap,
};

/// Shared state for analytics endpoints
#[derive(Clone)]
pub struct AnalyticsApiState {
    pub inventory: InventoryService,
}

#[derive(Debug, Deserialize)]
pub struct UserPath {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct PeriodPath {
    pub user_id: i64,
    pub granularity: String,
}

/// Item counts for one bucket granularity
#[derive(Debug, Serialize, ToSchema)]
pub struct PeriodResponse {
    pub granularity: Granularity,
    pub data: TimeBucketMap,
}

/// Build analytics routes (mounted under `/api/v1/users/{user_id}`)
pub fn routes(inventory: InventoryService) -> Router<()> {
    let state = AnalyticsApiState { inventory };

    Router::new()
        .route("/analytics", get(get_summary))
        .route("/analytics/periods/{granularity}", get(get_period_buckets))
        .route("/analytics/categories", get(get_category_stats))
        .route("/analytics/locations", get(get_location_stats))
        .route("/analytics/images", get(get_image_stats))
        .route("/analytics/quantities", get(get_quantity_stats))
        .with_state(state)
}

async fn load(state: &AnalyticsApiState, user_id: i64) -> Result<UserInventory, ApiError> {
    state
        .inventory
        .user_inventory(user_id)
        .await
        .map_err(ApiError::from_data)
}

/// Full analytics summary for a user's inventory
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/analytics",
    tag = "analytics",
    params(("user_id" = i64, Path, description = "Inventory owner")),
    responses(
        (status = 200, description = "Analytics summary", body = AnalyticsSummary),
        (status = 500, description = "An item has an unusable created_at")
    )
)]
pub async fn get_summary(
    State(state): State<AnalyticsApiState>,
    Path(path): Path<UserPath>,
) -> Result<Json<AnalyticsSummary>, ApiError> {
    let inv = load(&state, path.user_id).await?;
    let summary = analytics::build_summary(&inv.items, &inv.categories, &inv.locations)
        .map_err(ApiError::from_analytics)?;
    tracing::debug!(
        user_id = path.user_id,
        total_items = summary.total_items,
        "Built analytics summary"
    );
    Ok(Json(summary))
}

/// Item counts bucketed by year, month, week or day
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/analytics/periods/{granularity}",
    tag = "analytics",
    params(
        ("user_id" = i64, Path, description = "Inventory owner"),
        ("granularity" = String, Path, description = "year, month, week or day")
    ),
    responses(
        (status = 200, description = "Period buckets", body = PeriodResponse),
        (status = 400, description = "Unknown granularity"),
        (status = 500, description = "An item has an unusable created_at")
    )
)]
pub async fn get_period_buckets(
    State(state): State<AnalyticsApiState>,
    Path(path): Path<PeriodPath>,
) -> Result<Json<PeriodResponse>, ApiError> {
    let granularity = Granularity::parse(&path.granularity).ok_or_else(|| {
        ApiError::bad_request(
            "INVALID_GRANULARITY",
            format!(
                "Unknown granularity '{}'. Use year, month, week or day",
                path.granularity
            ),
        )
    })?;

    let inv = load(&state, path.user_id).await?;
    let data =
        analytics::bucket_by_period(&inv.items, granularity).map_err(ApiError::from_analytics)?;
    Ok(Json(PeriodResponse { granularity, data }))
}

/// Per-category counts and quantities
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/analytics/categories",
    tag = "analytics",
    params(("user_id" = i64, Path, description = "Inventory owner")),
    responses((status = 200, description = "Category stats", body = Vec<CategoryStat>))
)]
pub async fn get_category_stats(
    State(state): State<AnalyticsApiState>,
    Path(path): Path<UserPath>,
) -> Result<Json<Vec<CategoryStat>>, ApiError> {
    let inv = load(&state, path.user_id).await?;
    Ok(Json(analytics::stats_by_category(
        &inv.items,
        &inv.categories,
    )))
}

/// Per-location counts and quantities
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/analytics/locations",
    tag = "analytics",
    params(("user_id" = i64, Path, description = "Inventory owner")),
    responses((status = 200, description = "Location stats", body = Vec<LocationStat>))
)]
pub async fn get_location_stats(
    State(state): State<AnalyticsApiState>,
    Path(path): Path<UserPath>,
) -> Result<Json<Vec<LocationStat>>, ApiError> {
    let inv = load(&state, path.user_id).await?;
    Ok(Json(analytics::stats_by_location(
        &inv.items,
        &inv.locations,
    )))
}

/// Image coverage
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/analytics/images",
    tag = "analytics",
    params(("user_id" = i64, Path, description = "Inventory owner")),
    responses((status = 200, description = "Image coverage", body = ImageStats))
)]
pub async fn get_image_stats(
    State(state): State<AnalyticsApiState>,
    Path(path): Path<UserPath>,
) -> Result<Json<ImageStats>, ApiError> {
    let inv = load(&state, path.user_id).await?;
    Ok(Json(analytics::image_coverage(&inv.items)))
}

/// Quantity distribution
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/analytics/quantities",
    tag = "analytics",
    params(("user_id" = i64, Path, description = "Inventory owner")),
    responses((status = 200, description = "Quantity stats", body = QuantityStats))
)]
pub async fn get_quantity_stats(
    State(state): State<AnalyticsApiState>,
    Path(path): Path<UserPath>,
) -> Result<Json<QuantityStats>, ApiError> {
    let inv = load(&state, path.user_id).await?;
    Ok(Json(analytics::quantity_stats(&inv.items)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::data::{InventorySnapshot, MemoryInventory};

    const SNAPSHOT: &str = r##"{
        "categories": [
            { "user_id": 1, "id": 1, "name": "Tools", "color": "#ff0000" },
            { "user_id": 1, "id": 2, "name": "Electronics", "color": "#00ff00" }
        ],
        "locations": [
            { "user_id": 1, "id": 10, "name": "Garage" }
        ],
        "items": [
            { "user_id": 1, "id": 1, "title": "Drill", "quantity": 2, "category_id": 1,
              "location_id": 10, "image": "drill.jpg", "created_at": "2024-01-15 10:00:00" },
            { "user_id": 1, "id": 2, "title": "Saw", "quantity": 3, "category_id": 1,
              "created_at": "2024-01-20" },
            { "user_id": 1, "id": 3, "title": "Radio", "quantity": 1, "category_id": 2,
              "created_at": "2024-02-10T08:00:00Z" },
            { "user_id": 2, "id": 4, "title": "Lamp", "quantity": 1,
              "created_at": "sometime last year" }
        ]
    }"##;

    fn app() -> Router {
        let snapshot: InventorySnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        let inventory = MemoryInventory::from_snapshot(snapshot).unwrap();
        let service = InventoryService::new(Arc::new(inventory));
        Router::new().nest("/api/v1/users/{user_id}", routes(service))
    }

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_summary_endpoint() {
        let (status, body) = get("/api/v1/users/1/analytics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_items"], 3);
        assert_eq!(body["total_quantity"], 6);
        assert_eq!(body["monthly_data"]["2024-01"], 2);
        assert_eq!(body["monthly_data"]["2024-02"], 1);
        assert_eq!(body["image_coverage"], 33.3);
        assert_eq!(body["image_coverage_ratio"], 0.33);
        // Repository orders categories by name
        assert_eq!(body["items_by_category"][0]["name"], "Electronics");
        assert_eq!(body["items_by_category"][1]["avg_quantity"], 2.5);
    }

    #[tokio::test]
    async fn test_summary_unknown_user_is_empty() {
        let (status, body) = get("/api/v1/users/99/analytics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_items"], 0);
        assert_eq!(body["avg_quantity"], 0.0);
    }

    #[tokio::test]
    async fn test_summary_invalid_record_is_500() {
        let (status, body) = get("/api/v1/users/2/analytics").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["code"], "INVALID_RECORD");
        assert!(
            body["message"].as_str().unwrap().contains("Invalid record 4"),
            "message: {}",
            body["message"]
        );
    }

    #[tokio::test]
    async fn test_period_endpoint() {
        let (status, body) = get("/api/v1/users/1/analytics/periods/day").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["granularity"], "day");
        assert_eq!(body["data"]["2024-01-15"], 1);
        assert_eq!(body["data"]["2024-02-10"], 1);
    }

    #[tokio::test]
    async fn test_period_endpoint_unknown_granularity() {
        let (status, body) = get("/api/v1/users/1/analytics/periods/hour").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_GRANULARITY");
    }

    #[tokio::test]
    async fn test_dimension_endpoints() {
        let (status, body) = get("/api/v1/users/1/analytics/locations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "Garage");
        assert_eq!(body[0]["utilization"], 2.0);

        let (_, body) = get("/api/v1/users/1/analytics/categories").await;
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (_, body) = get("/api/v1/users/1/analytics/images").await;
        assert_eq!(body["items_with_images"], 1);
        assert_eq!(body["items_without_images"], 2);

        let (_, body) = get("/api/v1/users/1/analytics/quantities").await;
        assert_eq!(body["median"], 2.0);
        assert_eq!(body["max"], 3);
    }

    #[tokio::test]
    async fn test_dimension_endpoints_ignore_timestamps() {
        // Only period bucketing reads created_at
        let (status, body) = get("/api/v1/users/2/analytics/quantities").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
    }
}
