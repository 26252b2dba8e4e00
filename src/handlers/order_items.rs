use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::sales::{NewOrderItem, OrderItem, OrderItemUpdate, OrderItemView};
use crate::errors::AppError;
use crate::handlers::created;
use crate::handlers::products::ProductResponse;
use crate::AppService;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// The unit price is always taken from the product; any price in the body is
/// ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderItemRequest {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderItemRequest {
    /// Must match the id in the path.
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductResponse>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(i: OrderItem) -> Self {
        Self {
            id: i.id,
            order_id: i.order_id,
            product_id: i.product_id,
            quantity: i.quantity,
            unit_price: i.unit_price.to_string(),
            product: None,
        }
    }
}

impl From<OrderItemView> for OrderItemResponse {
    fn from(v: OrderItemView) -> Self {
        Self {
            product: v.product.map(ProductResponse::from),
            ..Self::from(v.item)
        }
    }
}

pub(crate) fn to_responses(items: Vec<OrderItemView>) -> Vec<OrderItemResponse> {
    items.into_iter().map(OrderItemResponse::from).collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/orderitems
///
/// Every item with its product populated.
#[utoipa::path(
    get,
    path = "/api/orderitems",
    responses(
        (status = 200, description = "All order items with their products", body = Vec<OrderItemResponse>),
    ),
    tag = "order items"
)]
pub async fn list_order_items(service: web::Data<AppService>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(to_responses(service.list_order_items()?)))
}

/// GET /api/orderitems/{id}
#[utoipa::path(
    get,
    path = "/api/orderitems/{id}",
    params(("id" = i32, Path, description = "Order item id")),
    responses(
        (status = 200, description = "Order item found", body = OrderItemResponse),
        (status = 404, description = "Order item not found"),
    ),
    tag = "order items"
)]
pub async fn get_order_item(
    service: web::Data<AppService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let item = service.get_order_item(path.into_inner())?;
    Ok(HttpResponse::Ok().json(OrderItemResponse::from(item)))
}

/// GET /api/orderitems/order/{order_id}
#[utoipa::path(
    get,
    path = "/api/orderitems/order/{order_id}",
    params(("order_id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Items of the order", body = Vec<OrderItemResponse>),
        (status = 404, description = "Order not found"),
    ),
    tag = "order items"
)]
pub async fn list_items_for_order(
    service: web::Data<AppService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let items = service.list_items_for_order(path.into_inner())?;
    Ok(HttpResponse::Ok().json(to_responses(items)))
}

/// POST /api/orderitems
///
/// Adds an item to an existing order, snapshotting the product price and
/// adding the line total to the order's total amount.
#[utoipa::path(
    post,
    path = "/api/orderitems",
    request_body = CreateOrderItemRequest,
    responses(
        (status = 201, description = "Order item created", body = OrderItemResponse),
        (status = 400, description = "Unknown order or product, or invalid quantity"),
    ),
    tag = "order items"
)]
pub async fn create_order_item(
    service: web::Data<AppService>,
    body: web::Json<CreateOrderItemRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let item = service.create_order_item(NewOrderItem {
        order_id: body.order_id,
        product_id: body.product_id,
        quantity: body.quantity,
    })?;
    let location = format!("/api/orderitems/{}", item.id);
    Ok(created(location, &OrderItemResponse::from(item)))
}

/// PUT /api/orderitems/{id}
///
/// Changes the product and quantity of an item and moves the order total by
/// the difference in line totals. The unit price is re-read from the product
/// only when the product changes.
#[utoipa::path(
    put,
    path = "/api/orderitems/{id}",
    params(("id" = i32, Path, description = "Order item id")),
    request_body = UpdateOrderItemRequest,
    responses(
        (status = 204, description = "Order item updated"),
        (status = 400, description = "Id mismatch, unknown product or invalid quantity"),
        (status = 404, description = "Order item not found"),
    ),
    tag = "order items"
)]
pub async fn update_order_item(
    service: web::Data<AppService>,
    path: web::Path<i32>,
    body: web::Json<UpdateOrderItemRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    service.update_order_item(
        path.into_inner(),
        body.id,
        OrderItemUpdate {
            product_id: body.product_id,
            quantity: body.quantity,
        },
    )?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/orderitems/{id}
///
/// Removes the item and takes its line total off the order.
#[utoipa::path(
    delete,
    path = "/api/orderitems/{id}",
    params(("id" = i32, Path, description = "Order item id")),
    responses(
        (status = 204, description = "Order item deleted"),
        (status = 404, description = "Order item not found"),
    ),
    tag = "order items"
)]
pub async fn delete_order_item(
    service: web::Data<AppService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    service.delete_order_item(path.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
