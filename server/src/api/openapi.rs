//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{analytics, health};
use crate::domain::analytics::{
    AnalyticsSummary, CategoryRecord, CategoryStat, Granularity, ImageStats, ItemRecord,
    LocationRecord, LocationStat, QuantityStats,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Inventory analytics"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "analytics", description = "Per-user inventory analytics")
    ),
    paths(
        health::health,
        analytics::get_summary,
        analytics::get_period_buckets,
        analytics::get_category_stats,
        analytics::get_location_stats,
        analytics::get_image_stats,
        analytics::get_quantity_stats,
    ),
    components(schemas(
        health::HealthResponse,
        analytics::PeriodResponse,
        AnalyticsSummary,
        Granularity,
        CategoryStat,
        LocationStat,
        ImageStats,
        QuantityStats,
        ItemRecord,
        CategoryRecord,
        LocationRecord,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Stockroom API</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>"#;
