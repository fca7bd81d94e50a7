use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use models::company as company_model;
use service::company::{CompanyAggregate, CreateCompany, UpdateCompany};

use crate::errors::{ApiError, ApiJson};
use crate::routes::{AppState, ListQuery};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    pub name: String,
    /// National registry of legal entity, exactly 14 digits
    pub national_registry_of_legal_entity: String,
    pub address: String,
    /// Employee ids to associate at creation
    #[serde(default)]
    pub employees: Vec<Uuid>,
}

impl CreateCompanyRequest {
    fn validate(&self) -> Result<(), ApiError> {
        company_model::validate_name(&self.name)?;
        company_model::validate_registry_number(&self.national_registry_of_legal_entity)?;
        company_model::validate_address(&self.address)?;
        Ok(())
    }
}

#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    pub address: Option<String>,
}

impl UpdateCompanyRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            company_model::validate_name(name)?;
        }
        if let Some(address) = &self.address {
            company_model::validate_address(address)?;
        }
        Ok(())
    }
}

/// Members to attach: a single id, a list, or both merged.
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct AddEmployeesRequest {
    pub employee: Option<Uuid>,
    #[serde(default)]
    pub employees: Vec<Uuid>,
}

impl AddEmployeesRequest {
    fn into_ids(self) -> Result<Vec<Uuid>, ApiError> {
        let mut ids = self.employees;
        if let Some(one) = self.employee {
            ids.push(one);
        }
        if ids.is_empty() {
            return Err(ApiError::Validation("at least one employee id is required".into()));
        }
        Ok(ids)
    }
}

async fn fetch(state: &AppState, id: Uuid) -> Result<CompanyAggregate, ApiError> {
    state
        .companies
        .get_company(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Company {id} not found")))
}

#[utoipa::path(
    get, path = "/companies", tag = "companies",
    params(ListQuery),
    responses(
        (status = 200, description = "Active companies with their employees"),
        (status = 400, description = "Invalid pagination")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CompanyAggregate>>, ApiError> {
    let window = query.window()?;
    let list = state.companies.list_companies(window).await?;
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/companies", tag = "companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Registry number already in use")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CompanyAggregate>), ApiError> {
    input.validate()?;
    let created = state
        .companies
        .create_company(CreateCompany {
            name: input.name,
            national_registry_of_legal_entity: input.national_registry_of_legal_entity,
            address: input.address,
            employees: input.employees,
        })
        .await?;
    info!(id = %created.company.id, "company created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/companies/{companyId}", tag = "companies",
    params(("companyId" = Uuid, Path, description = "Company id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_one(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<CompanyAggregate>, ApiError> {
    let company = fetch(&state, company_id).await?;
    Ok(Json(company))
}

#[utoipa::path(
    patch, path = "/companies/{companyId}", tag = "companies",
    params(("companyId" = Uuid, Path, description = "Company id")),
    request_body = UpdateCompanyRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    ApiJson(input): ApiJson<UpdateCompanyRequest>,
) -> Result<Json<CompanyAggregate>, ApiError> {
    input.validate()?;
    let target = fetch(&state, company_id).await?;
    let updated = state
        .companies
        .update_company(target, UpdateCompany { name: input.name, address: input.address })
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    post, path = "/companies/{companyId}/employees", tag = "companies",
    params(("companyId" = Uuid, Path, description = "Company id")),
    request_body = AddEmployeesRequest,
    responses(
        (status = 201, description = "Members attached"),
        (status = 400, description = "Empty id set"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn add_employees(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    ApiJson(input): ApiJson<AddEmployeesRequest>,
) -> Result<(StatusCode, Json<CompanyAggregate>), ApiError> {
    let ids = input.into_ids()?;
    let target = fetch(&state, company_id).await?;
    let updated = state.companies.add_employee_to_company(target, &ids).await?;
    info!(id = %company_id, added = ids.len(), "employees attached to company");
    Ok((StatusCode::CREATED, Json(updated)))
}

#[utoipa::path(
    delete, path = "/companies/{companyId}/employees/{employeeId}", tag = "companies",
    params(
        ("companyId" = Uuid, Path, description = "Company id"),
        ("employeeId" = Uuid, Path, description = "Employee id to detach")
    ),
    responses(
        (status = 200, description = "Member detached"),
        (status = 404, description = "Company Not Found"),
        (status = 422, description = "Employee is not a member")
    )
)]
pub async fn remove_employee(
    State(state): State<AppState>,
    Path((company_id, employee_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<CompanyAggregate>, ApiError> {
    let target = fetch(&state, company_id).await?;
    // Membership is checked here, not in the manager: a manager-level remove
    // of a non-member is a silent no-op by contract.
    if !target.has_employee(employee_id) {
        return Err(ApiError::Unprocessable(format!(
            "Employee {employee_id} is not a member of company {company_id}"
        )));
    }
    let updated = state
        .companies
        .remove_employee_from_company(target, &[employee_id])
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/companies/{companyId}", tag = "companies",
    params(("companyId" = Uuid, Path, description = "Company id")),
    responses(
        (status = 200, description = "Soft-deleted entity returned"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn remove(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<CompanyAggregate>, ApiError> {
    let target = fetch(&state, company_id).await?;
    let removed = state.companies.remove_company(target).await?;
    Ok(Json(removed))
}
