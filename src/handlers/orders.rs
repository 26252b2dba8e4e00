use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::sales::{Order, OrderItemInput, OrderUpdate, OrderView};
use crate::errors::AppError;
use crate::handlers::customers::CustomerResponse;
use crate::handlers::order_items::{self, OrderItemResponse};
use crate::handlers::{created, parse_decimal};
use crate::AppService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderLineRequest {
    pub product_id: i32,
    pub quantity: i32,
}

/// The order date is assigned by the server and prices come from the
/// products, so neither is accepted here.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_id: i32,
    #[serde(default)]
    pub order_items: Vec<CreateOrderLineRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    /// Must match the id in the path.
    pub id: i32,
    pub customer_id: i32,
    pub order_date: DateTime<Utc>,
    /// Stored as given; not reconciled with the order's items.
    pub total_amount: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub customer_id: i32,
    pub order_date: String,
    pub total_amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_items: Option<Vec<OrderItemResponse>>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            customer_id: o.customer_id,
            order_date: o.order_date.to_rfc3339(),
            total_amount: o.total_amount.to_string(),
            customer: None,
            order_items: None,
        }
    }
}

impl From<OrderView> for OrderResponse {
    fn from(v: OrderView) -> Self {
        Self {
            customer: v.customer.map(CustomerResponse::from),
            order_items: v.items.map(order_items::to_responses),
            ..Self::from(v.order)
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/orders
///
/// Every order with its customer populated.
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "All orders", body = Vec<OrderResponse>),
    ),
    tag = "orders"
)]
pub async fn list_orders(service: web::Data<AppService>) -> Result<HttpResponse, AppError> {
    let orders: Vec<OrderResponse> = service
        .list_orders()?
        .into_iter()
        .map(OrderResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(orders))
}

/// GET /api/orders/{id}
///
/// The order with its customer and its items.
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<AppService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let order = service.get_order(path.into_inner())?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /api/orders/customer/{customer_id}
///
/// Orders of one customer, without customer or items populated.
#[utoipa::path(
    get,
    path = "/api/orders/customer/{customer_id}",
    params(("customer_id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Orders placed by the customer", body = Vec<OrderResponse>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "orders"
)]
pub async fn list_orders_for_customer(
    service: web::Data<AppService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let orders: Vec<OrderResponse> = service
        .list_orders_for_customer(path.into_inner())?
        .into_iter()
        .map(OrderResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(orders))
}

/// POST /api/orders
///
/// Creates an order together with its items. The request is rejected as a
/// whole if the customer or any product is unknown.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Unknown customer or product, or invalid quantity"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<AppService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let items = body
        .order_items
        .into_iter()
        .map(|l| OrderItemInput {
            product_id: l.product_id,
            quantity: l.quantity,
        })
        .collect();

    let view = service.create_order(body.customer_id, items)?;
    let location = format!("/api/orders/{}", view.order.id);
    Ok(created(location, &OrderResponse::from(view)))
}

/// PUT /api/orders/{id}
///
/// Overwrites customer, date and total. Items are managed through
/// /api/orderitems.
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 204, description = "Order updated"),
        (status = 400, description = "Id mismatch or unknown customer"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn update_order(
    service: web::Data<AppService>,
    path: web::Path<i32>,
    body: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    service.update_order(
        path.into_inner(),
        body.id,
        OrderUpdate {
            customer_id: body.customer_id,
            order_date: body.order_date,
            total_amount: parse_decimal("total_amount", &body.total_amount)?,
        },
    )?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/orders/{id}
///
/// Deletes the order and all of its items.
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 204, description = "Order and its items deleted"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<AppService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    service.delete_order(path.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
