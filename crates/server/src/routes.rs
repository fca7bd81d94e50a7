use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::{IntoParams, OpenApi};

use common::types::Health;
use service::company::{CompanyService, SeaOrmCompanyRepository};
use service::employee::{EmployeeService, SeaOrmEmployeeRepository};
use service::pagination::Pagination;

use crate::errors::ApiError;

pub mod companies;
pub mod employees;

#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<CompanyService<SeaOrmCompanyRepository>>,
    pub employees: Arc<EmployeeService<SeaOrmEmployeeRepository>>,
}

/// List window. Windowing activates only when both parameters arrive;
/// one-sided input returns the full list.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Zero-based page index
    pub page: Option<u64>,
    /// Items per page, >= 1
    pub page_size: Option<u64>,
}

impl ListQuery {
    pub fn window(&self) -> Result<Option<Pagination>, ApiError> {
        if self.page_size == Some(0) {
            return Err(ApiError::Validation("pageSize must be >= 1".into()));
        }
        Ok(Pagination::from_parts(self.page, self.page_size))
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service alive"))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, both entity surfaces, and the
/// Swagger UI, behind CORS and request tracing.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let docs = utoipa_swagger_ui::SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi());

    let public = Router::new().route("/health", get(health));

    let company_routes = Router::new()
        .route("/companies", get(companies::list).post(companies::create))
        .route(
            "/companies/:company_id",
            get(companies::get_one).patch(companies::update).delete(companies::remove),
        )
        .route("/companies/:company_id/employees", post(companies::add_employees))
        .route(
            "/companies/:company_id/employees/:employee_id",
            delete(companies::remove_employee),
        );

    let employee_routes = Router::new()
        .route("/employees", get(employees::list).post(employees::create))
        .route(
            "/employees/:employee_id",
            get(employees::get_one).patch(employees::update).delete(employees::remove),
        )
        .route("/employees/:employee_id/companies", post(employees::add_companies))
        .route(
            "/employees/:employee_id/companies/:company_id",
            delete(employees::remove_company),
        );

    public
        .merge(company_routes)
        .merge(employee_routes)
        .merge(docs)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
