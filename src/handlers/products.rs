use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::sales::{Product, ProductInput};
use crate::errors::AppError;
use crate::handlers::{created, parse_decimal};
use crate::AppService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    /// Must match the id in the path.
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Decimal price as a string, e.g. "9.99"
    pub price: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price.to_string(),
        }
    }
}

fn to_responses(products: Vec<Product>) -> Vec<ProductResponse> {
    products.into_iter().map(ProductResponse::from).collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products", body = Vec<ProductResponse>),
    ),
    tag = "products"
)]
pub async fn list_products(service: web::Data<AppService>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(to_responses(service.list_products()?)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    service: web::Data<AppService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let product = service.get_product(path.into_inner())?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// GET /api/products/price/{maxPrice}
///
/// Products whose price is at most `maxPrice` (inclusive).
#[utoipa::path(
    get,
    path = "/api/products/price/{max_price}",
    params(("max_price" = String, Path, description = "Inclusive upper bound, e.g. 500.00")),
    responses(
        (status = 200, description = "Matching products", body = Vec<ProductResponse>),
        (status = 400, description = "max_price is not a decimal"),
    ),
    tag = "products"
)]
pub async fn list_products_by_price(
    service: web::Data<AppService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let max_price = parse_decimal("max_price", &path.into_inner())?;
    Ok(HttpResponse::Ok().json(to_responses(service.list_products_up_to(&max_price)?)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product"),
    ),
    tag = "products"
)]
pub async fn create_product(
    service: web::Data<AppService>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let product = service.create_product(ProductInput {
        price: parse_decimal("price", &body.price)?,
        name: body.name,
        description: body.description,
    })?;
    let location = format!("/api/products/{}", product.id);
    Ok(created(location, &ProductResponse::from(product)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 204, description = "Product updated"),
        (status = 400, description = "Id mismatch or invalid product"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn update_product(
    service: web::Data<AppService>,
    path: web::Path<i32>,
    body: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    service.update_product(
        path.into_inner(),
        body.id,
        ProductInput {
            price: parse_decimal("price", &body.price)?,
            name: body.name,
            description: body.description,
        },
    )?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    service: web::Data<AppService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    service.delete_product(path.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
