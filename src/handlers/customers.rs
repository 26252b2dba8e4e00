use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::sales::{Customer, CustomerInput};
use crate::errors::AppError;
use crate::handlers::created;
use crate::AppService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCustomerRequest {
    /// Must match the id in the path.
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/customers",
    responses(
        (status = 200, description = "All customers", body = Vec<CustomerResponse>),
    ),
    tag = "customers"
)]
pub async fn list_customers(service: web::Data<AppService>) -> Result<HttpResponse, AppError> {
    let customers: Vec<CustomerResponse> = service
        .list_customers()?
        .into_iter()
        .map(CustomerResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(customers))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn get_customer(
    service: web::Data<AppService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let customer = service.get_customer(path.into_inner())?;
    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Invalid customer"),
    ),
    tag = "customers"
)]
pub async fn create_customer(
    service: web::Data<AppService>,
    body: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let customer = service.create_customer(CustomerInput {
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
    })?;
    let location = format!("/api/customers/{}", customer.id);
    Ok(created(location, &CustomerResponse::from(customer)))
}

#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 204, description = "Customer updated"),
        (status = 400, description = "Id mismatch or invalid customer"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn update_customer(
    service: web::Data<AppService>,
    path: web::Path<i32>,
    body: web::Json<UpdateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    service.update_customer(
        path.into_inner(),
        body.id,
        CustomerInput {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
        },
    )?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "customers"
)]
pub async fn delete_customer(
    service: web::Data<AppService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    service.delete_customer(path.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
