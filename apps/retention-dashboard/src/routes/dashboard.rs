use axum::response::Html;

const DASHBOARD_PAGE: &str = include_str!("dashboard.html");

/// GET /
/// The single-page dashboard. All data comes from the JSON API.
pub async fn dashboard_handler() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}
