use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use panelizer_core::{
    render_svg, PanelizationRequest, PanelizationResult, Panelizer, PanelizerError,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const SVG_SCALE: f64 = 2.0;

const OPENAPI_SPEC: &str = include_str!("../../../openapi.yaml");
const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>PCB Panelizer API Docs</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            SwaggerUIBundle({
                url: '/openapi.yaml',
                dom_id: '#swagger-ui',
                presets: [SwaggerUIBundle.presets.apis],
                layout: 'BaseLayout',
            });
        };
    </script>
</body>
</html>"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting PCB Panelizer API");

    let addr = std::env::var("PANELIZER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("Try: curl http://localhost:3000/api/health");

    axum::serve(listener, app()).await?;

    Ok(())
}

fn app() -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/panelize", post(panelize))
        .route("/api/generate/svg", post(generate_svg))
        .route("/openapi.yaml", get(serve_openapi_spec))
        .route("/docs", get(serve_swagger_ui))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "pcb-panelizer-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Main placement endpoint
async fn panelize(
    Json(request): Json<PanelizationRequest>,
) -> Result<Json<PanelizationResult>, AppError> {
    info!(
        "Received panelization request for {} x {} PCB on {} panel formats",
        request.pcb_width,
        request.pcb_height,
        request.panel_sizes.len()
    );

    let panelizer = Panelizer::new(request)?;
    let result = panelizer.run();

    for report in &result.reports {
        info!(
            "Panel {}: {} PCB, {:.2}% fill, {} panels needed",
            report.panel_id, report.pcb_per_panel, report.fill_percentage, report.panels_needed
        );
    }

    Ok(Json(result))
}

/// Generate SVG visualization
async fn generate_svg(Json(result): Json<PanelizationResult>) -> Result<Response, AppError> {
    info!("Generating SVG for {} panels", result.reports.len());

    let svg = render_svg(&result, SVG_SCALE).map_err(anyhow::Error::from)?;

    Ok((StatusCode::OK, [("Content-Type", "image/svg+xml")], svg).into_response())
}

/// Application error type
struct AppError(anyhow::Error);

impl From<PanelizerError> for AppError {
    fn from(err: PanelizerError) -> Self {
        AppError(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request error: {}", self.0);

        let status = if self.0.downcast_ref::<PanelizerError>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (
            status,
            Json(json!({
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

async fn serve_openapi_spec() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("Content-Type", "application/yaml")],
        OPENAPI_SPEC,
    )
}

async fn serve_swagger_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}
