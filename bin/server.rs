// Billionaires Database - Web Server
// JSON API over the seeded SQLite file. Each request opens its own
// connection; the shared state carries only the database path.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;
use std::collections::HashMap;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use billionaires_db::{
    age_distribution, billionaires_by_country, city_stats, company_stats, country_stats,
    get_billionaire, get_subject, industries_with_min_count, industry_stats, list_billionaires,
    search_billionaires, stats_summary, BillionaireFilter, Database, QueryError, DEFAULT_DB_PATH,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    db: Database,
}

/// Error wrapper mapping the library's classification onto HTTP status codes
/// with `{"error": message}` bodies.
struct ApiError(QueryError);

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            QueryError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            QueryError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            QueryError::Database(err) => {
                eprintln!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal database error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "OK" }))
}

/// GET /api/billionaires - Listing with optional filters and pagination
async fn api_billionaires(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = BillionaireFilter::from_params(&params)?;
    let conn = state.db.connect()?;
    let rows = list_billionaires(&conn, &filter)?;
    Ok(Json(rows))
}

/// GET /api/billionaire/:rank - Single profile by rank
async fn api_billionaire(
    State(state): State<AppState>,
    Path(rank): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = state.db.connect()?;
    let detail = get_billionaire(&conn, rank)?;
    Ok(Json(detail))
}

/// GET /api/search?q= - Name search
async fn api_search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let term = params.get("q").map(String::as_str).unwrap_or("");
    let conn = state.db.connect()?;
    let hits = search_billionaires(&conn, term)?;
    Ok(Json(hits))
}

/// GET /api/subject/:name - Profile with prev/next navigation
async fn api_subject(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let decoded = urlencoding::decode(&name)
        .unwrap_or_else(|_| name.clone().into())
        .into_owned();
    let conn = state.db.connect()?;
    let profile = get_subject(&conn, &decoded)?;
    Ok(Json(profile))
}

/// GET /api/countries - Per-country statistics
async fn api_countries(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let conn = state.db.connect()?;
    Ok(Json(country_stats(&conn)?))
}

/// GET /api/countries/:name - Billionaires of one country with context
async fn api_country_billionaires(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let decoded = urlencoding::decode(&name)
        .unwrap_or_else(|_| name.clone().into())
        .into_owned();
    let conn = state.db.connect()?;
    Ok(Json(billionaires_by_country(&conn, &decoded)?))
}

/// GET /api/industries - Per-industry statistics
async fn api_industries(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let conn = state.db.connect()?;
    Ok(Json(industry_stats(&conn)?))
}

/// GET /api/industries/top?minCount= - Industries above a member threshold
async fn api_industries_top(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let min_count: i64 = params
        .get("minCount")
        .ok_or_else(|| {
            QueryError::BadRequest("parameter 'minCount' is required".to_string())
        })?
        .parse()
        .map_err(|_| QueryError::BadRequest("parameter 'minCount' must be an integer".to_string()))?;

    let conn = state.db.connect()?;
    Ok(Json(industries_with_min_count(&conn, min_count)?))
}

/// GET /api/cities - Per-city statistics
async fn api_cities(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let conn = state.db.connect()?;
    Ok(Json(city_stats(&conn)?))
}

/// GET /api/companies - Per-company statistics
async fn api_companies(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let conn = state.db.connect()?;
    Ok(Json(company_stats(&conn)?))
}

/// GET /api/stats - Combined overall statistics
async fn api_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let conn = state.db.connect()?;
    Ok(Json(stats_summary(&conn)?))
}

/// GET /api/age-distribution - Age histogram over fixed decade bands
async fn api_age_distribution(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = state.db.connect()?;
    Ok(Json(age_distribution(&conn)?))
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Billionaires Database - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let db_path =
        std::env::var("BILLIONAIRES_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    let db = Database::new(&db_path);

    if !db.exists() {
        eprintln!("❌ Database not found at {}", db_path);
        eprintln!("   Run: cargo run -- seed");
        eprintln!("   to create it first.");
        std::process::exit(1);
    }
    println!("✓ Database: {}", db_path);

    let state = AppState { db };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/billionaires", get(api_billionaires))
        .route("/billionaire/:rank", get(api_billionaire))
        .route("/search", get(api_search))
        .route("/subject/:name", get(api_subject))
        .route("/countries", get(api_countries))
        .route("/countries/:name", get(api_country_billionaires))
        .route("/industries", get(api_industries))
        .route("/industries/top", get(api_industries_top))
        .route("/cities", get(api_cities))
        .route("/companies", get(api_companies))
        .route("/stats", get(api_stats))
        .route("/age-distribution", get(api_age_distribution))
        .with_state(state);

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/billionaires");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
