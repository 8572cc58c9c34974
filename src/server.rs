//! HTTP API for the product catalog.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST`   | `/products` | Create a product (201) |
//! | `GET`    | `/products?limit=&offset=` | List a page of products |
//! | `GET`    | `/products/{term}` | Lookup by id, title, or slug |
//! | `PATCH`  | `/products/{id}` | Partially update a product by id |
//! | `DELETE` | `/products/{term}` | Delete by id, title, or slug (204) |
//! | `GET`    | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Product with shoes not found" } }
//! ```
//!
//! Error codes: `bad_request` (400, validation and duplicate keys),
//! `not_found` (404), `internal` (500).

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use catalog_core::models::{CreateProduct, Pagination, Product, UpdateProduct};
use catalog_core::service::{parse_product_id, CatalogError, ProductService};

use crate::config::{Config, PaginationConfig};
use crate::db;
use crate::schema;
use crate::sqlite_store::SqliteStore;

/// Shared state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    service: ProductService,
    pagination: PaginationConfig,
}

impl AppState {
    pub fn new(service: ProductService, pagination: PaginationConfig) -> Self {
        Self {
            service,
            pagination,
        }
    }
}

/// Build the router. Exposed so tests can drive it without a socket.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/products", get(handle_list).post(handle_create))
        .route(
            "/products/{term}",
            get(handle_get).patch(handle_update).delete(handle_delete),
        )
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Starts the HTTP server on `[server].bind`.
///
/// Opens the SQLite pool, ensures the schema exists, and serves until
/// Ctrl-C.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pool = db::connect(config).await?;
    schema::ensure_schema(&pool).await?;

    let service = ProductService::new(Arc::new(SqliteStore::new(pool.clone())));
    let app = router(AppState::new(service, config.pagination.clone()));

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, "catalog server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    pool.close().await;
    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Error type that converts into an Axum HTTP response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request",
        message: message.into(),
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let status = match err {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::DuplicateKey(_) => StatusCode::BAD_REQUEST,
            CatalogError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let code = match err {
            CatalogError::NotFound(_) => "not_found",
            CatalogError::DuplicateKey(_) => "bad_request",
            CatalogError::Internal => "internal",
        };
        AppError {
            status,
            code,
            message: err.to_string(),
        }
    }
}

// ============ Validation ============

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(bad_request("title must not be empty"));
    }
    Ok(())
}

fn validate_gender(gender: &str) -> Result<(), AppError> {
    if gender.trim().is_empty() {
        return Err(bad_request("gender must not be empty"));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(bad_request("price must be a non-negative number"));
    }
    Ok(())
}

fn validate_stock(stock: i64) -> Result<(), AppError> {
    if stock < 0 {
        return Err(bad_request("stock must be >= 0"));
    }
    Ok(())
}

fn validate_create(input: &CreateProduct) -> Result<(), AppError> {
    validate_title(&input.title)?;
    validate_gender(&input.gender)?;
    validate_price(input.price)?;
    validate_stock(input.stock)
}

fn validate_update(changes: &UpdateProduct) -> Result<(), AppError> {
    if let Some(ref title) = changes.title {
        validate_title(title)?;
    }
    if let Some(ref gender) = changes.gender {
        validate_gender(gender)?;
    }
    if let Some(price) = changes.price {
        validate_price(price)?;
    }
    if let Some(stock) = changes.stock {
        validate_stock(stock)?;
    }
    Ok(())
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ /products ============

#[derive(Debug, Deserialize)]
struct ListParams {
    limit: Option<u32>,
    offset: Option<u32>,
}

async fn handle_create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let Json(input) = payload.map_err(|e| bad_request(e.body_text()))?;
    validate_create(&input)?;

    let product = state.service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn handle_list(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, AppError> {
    let Query(params) = params.map_err(|e| bad_request(e.body_text()))?;

    let limit = params.limit.unwrap_or(state.pagination.default_limit);
    if limit == 0 || limit > state.pagination.max_limit {
        return Err(bad_request(format!(
            "limit must be between 1 and {}",
            state.pagination.max_limit
        )));
    }
    let page = Pagination {
        limit,
        offset: params.offset.unwrap_or(0),
    };

    Ok(Json(state.service.find_all(page).await?))
}

async fn handle_get(
    State(state): State<Arc<AppState>>,
    Path(term): Path<String>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(state.service.find_one(&term).await?))
}

async fn handle_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProduct>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let id = parse_product_id(&id)
        .ok_or_else(|| bad_request(format!("id must be a UUID, got '{}'", id)))?;
    let Json(changes) = payload.map_err(|e| bad_request(e.body_text()))?;
    validate_update(&changes)?;

    Ok(Json(state.service.update(id, changes).await?))
}

async fn handle_delete(
    State(state): State<Arc<AppState>>,
    Path(term): Path<String>,
) -> Result<StatusCode, AppError> {
    state.service.remove(&term).await?;
    Ok(StatusCode::NO_CONTENT)
}
