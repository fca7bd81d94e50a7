use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use models::employee as employee_model;
use service::employee::{CreateEmployee, EmployeeAggregate, UpdateEmployee};

use crate::errors::{ApiError, ApiJson};
use crate::routes::{AppState, ListQuery};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub name: String,
    /// Social security number, exactly 11 digits
    pub social_security_number: String,
    pub email: String,
    pub address: String,
    /// Company ids to associate at creation
    #[serde(default)]
    pub companies: Vec<Uuid>,
}

impl CreateEmployeeRequest {
    fn validate(&self) -> Result<(), ApiError> {
        employee_model::validate_name(&self.name)?;
        employee_model::validate_social_security_number(&self.social_security_number)?;
        employee_model::validate_email(&self.email)?;
        employee_model::validate_address(&self.address)?;
        Ok(())
    }
}

#[derive(Debug, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl UpdateEmployeeRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            employee_model::validate_name(name)?;
        }
        if let Some(email) = &self.email {
            employee_model::validate_email(email)?;
        }
        if let Some(address) = &self.address {
            employee_model::validate_address(address)?;
        }
        Ok(())
    }
}

/// Memberships to attach: a single id, a list, or both merged.
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct AddCompaniesRequest {
    pub company: Option<Uuid>,
    #[serde(default)]
    pub companies: Vec<Uuid>,
}

impl AddCompaniesRequest {
    fn into_ids(self) -> Result<Vec<Uuid>, ApiError> {
        let mut ids = self.companies;
        if let Some(one) = self.company {
            ids.push(one);
        }
        if ids.is_empty() {
            return Err(ApiError::Validation("at least one company id is required".into()));
        }
        Ok(ids)
    }
}

async fn fetch(state: &AppState, id: Uuid) -> Result<EmployeeAggregate, ApiError> {
    state
        .employees
        .get_employee(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Employee {id} not found")))
}

#[utoipa::path(
    get, path = "/employees", tag = "employees",
    params(ListQuery),
    responses(
        (status = 200, description = "Active employees with their companies"),
        (status = 400, description = "Invalid pagination")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<EmployeeAggregate>>, ApiError> {
    let window = query.window()?;
    let list = state.employees.list_employees(window).await?;
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/employees", tag = "employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "SSN already in use")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeAggregate>), ApiError> {
    input.validate()?;
    let created = state
        .employees
        .create_employee(CreateEmployee {
            name: input.name,
            social_security_number: input.social_security_number,
            email: input.email,
            address: input.address,
            companies: input.companies,
        })
        .await?;
    info!(id = %created.employee.id, "employee created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/employees/{employeeId}", tag = "employees",
    params(("employeeId" = Uuid, Path, description = "Employee id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_one(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<EmployeeAggregate>, ApiError> {
    let employee = fetch(&state, employee_id).await?;
    Ok(Json(employee))
}

#[utoipa::path(
    patch, path = "/employees/{employeeId}", tag = "employees",
    params(("employeeId" = Uuid, Path, description = "Employee id")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
    ApiJson(input): ApiJson<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeAggregate>, ApiError> {
    input.validate()?;
    let target = fetch(&state, employee_id).await?;
    let updated = state
        .employees
        .update_employee(
            target,
            UpdateEmployee { name: input.name, email: input.email, address: input.address },
        )
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    post, path = "/employees/{employeeId}/companies", tag = "employees",
    params(("employeeId" = Uuid, Path, description = "Employee id")),
    request_body = AddCompaniesRequest,
    responses(
        (status = 201, description = "Memberships attached"),
        (status = 400, description = "Empty id set"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn add_companies(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
    ApiJson(input): ApiJson<AddCompaniesRequest>,
) -> Result<(StatusCode, Json<EmployeeAggregate>), ApiError> {
    let ids = input.into_ids()?;
    let target = fetch(&state, employee_id).await?;
    let updated = state.employees.add_company_to_employee(target, &ids).await?;
    info!(id = %employee_id, added = ids.len(), "companies attached to employee");
    Ok((StatusCode::CREATED, Json(updated)))
}

#[utoipa::path(
    delete, path = "/employees/{employeeId}/companies/{companyId}", tag = "employees",
    params(
        ("employeeId" = Uuid, Path, description = "Employee id"),
        ("companyId" = Uuid, Path, description = "Company id to detach")
    ),
    responses(
        (status = 200, description = "Membership detached"),
        (status = 404, description = "Employee Not Found"),
        (status = 422, description = "Company is not a membership")
    )
)]
pub async fn remove_company(
    State(state): State<AppState>,
    Path((employee_id, company_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<EmployeeAggregate>, ApiError> {
    let target = fetch(&state, employee_id).await?;
    if !target.has_company(company_id) {
        return Err(ApiError::Unprocessable(format!(
            "Company {company_id} is not a membership of employee {employee_id}"
        )));
    }
    let updated = state
        .employees
        .remove_company_from_employee(target, &[company_id])
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/employees/{employeeId}", tag = "employees",
    params(("employeeId" = Uuid, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Soft-deleted entity returned"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn remove(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<EmployeeAggregate>, ApiError> {
    let target = fetch(&state, employee_id).await?;
    let removed = state.employees.remove_employee(target).await?;
    Ok(Json(removed))
}
