use utoipa::OpenApi;

use crate::handlers::{customers, order_items, orders, products};

#[derive(OpenApi)]
#[openapi(
    info(title = "Sales API", description = "Customers, products, orders and order items"),
    paths(
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        products::list_products,
        products::get_product,
        products::list_products_by_price,
        products::create_product,
        products::update_product,
        products::delete_product,
        orders::list_orders,
        orders::get_order,
        orders::list_orders_for_customer,
        orders::create_order,
        orders::update_order,
        orders::delete_order,
        order_items::list_order_items,
        order_items::get_order_item,
        order_items::list_items_for_order,
        order_items::create_order_item,
        order_items::update_order_item,
        order_items::delete_order_item,
    ),
    components(schemas(
        customers::CreateCustomerRequest,
        customers::UpdateCustomerRequest,
        customers::CustomerResponse,
        products::CreateProductRequest,
        products::UpdateProductRequest,
        products::ProductResponse,
        orders::CreateOrderLineRequest,
        orders::CreateOrderRequest,
        orders::UpdateOrderRequest,
        orders::OrderResponse,
        order_items::CreateOrderItemRequest,
        order_items::UpdateOrderItemRequest,
        order_items::OrderItemResponse,
    )),
    tags(
        (name = "customers"),
        (name = "products"),
        (name = "orders"),
        (name = "order items"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn document_lists_every_resource_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/customers/{id}",
            "/api/products/price/{max_price}",
            "/api/orders/customer/{customer_id}",
            "/api/orderitems/order/{order_id}",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {}",
                expected
            );
        }
    }
}
