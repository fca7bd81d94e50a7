use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::routes::{companies, employees};

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        companies::list,
        companies::create,
        companies::get_one,
        companies::update,
        companies::add_employees,
        companies::remove_employee,
        companies::remove,
        employees::list,
        employees::create,
        employees::get_one,
        employees::update,
        employees::add_companies,
        employees::remove_company,
        employees::remove,
    ),
    components(
        schemas(
            HealthResponse,
            companies::CreateCompanyRequest,
            companies::UpdateCompanyRequest,
            companies::AddEmployeesRequest,
            employees::CreateEmployeeRequest,
            employees::UpdateEmployeeRequest,
            employees::AddCompaniesRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "companies"),
        (name = "employees")
    )
)]
pub struct ApiDoc;
