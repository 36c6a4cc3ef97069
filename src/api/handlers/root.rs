use axum::response::Html;

// axum handler for the landing page
pub async fn root() -> Html<&'static str> {
    Html("<h2>AU wiki backend is running.</h2>")
}
