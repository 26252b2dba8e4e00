use bigdecimal::BigDecimal;

use super::errors::DomainError;
use super::sales::{
    Customer, CustomerInput, NewOrderItem, Order, OrderItem, OrderItemInput, OrderItemUpdate,
    OrderItemView, OrderUpdate, OrderView, Product, ProductInput,
};

pub trait CustomerRepository: Send + Sync + 'static {
    fn list_customers(&self) -> Result<Vec<Customer>, DomainError>;
    fn find_customer(&self, id: i32) -> Result<Option<Customer>, DomainError>;
    fn create_customer(&self, input: CustomerInput) -> Result<Customer, DomainError>;
    fn update_customer(&self, id: i32, input: CustomerInput) -> Result<(), DomainError>;
    fn delete_customer(&self, id: i32) -> Result<(), DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn list_products(&self) -> Result<Vec<Product>, DomainError>;
    fn find_product(&self, id: i32) -> Result<Option<Product>, DomainError>;
    fn list_products_up_to(&self, max_price: &BigDecimal) -> Result<Vec<Product>, DomainError>;
    fn create_product(&self, input: ProductInput) -> Result<Product, DomainError>;
    fn update_product(&self, id: i32, input: ProductInput) -> Result<(), DomainError>;
    fn delete_product(&self, id: i32) -> Result<(), DomainError>;
}

/// Orders and their items form one aggregate; implementations must apply each
/// mutation atomically so that order totals track item changes.
pub trait OrderRepository: Send + Sync + 'static {
    fn list_orders(&self) -> Result<Vec<OrderView>, DomainError>;
    fn find_order(&self, id: i32) -> Result<Option<OrderView>, DomainError>;
    fn list_orders_for_customer(&self, customer_id: i32) -> Result<Vec<Order>, DomainError>;
    fn create_order(
        &self,
        customer_id: i32,
        items: Vec<OrderItemInput>,
    ) -> Result<OrderView, DomainError>;
    fn update_order(&self, id: i32, update: OrderUpdate) -> Result<(), DomainError>;
    fn delete_order(&self, id: i32) -> Result<(), DomainError>;

    fn list_order_items(&self) -> Result<Vec<OrderItemView>, DomainError>;
    fn find_order_item(&self, id: i32) -> Result<Option<OrderItemView>, DomainError>;
    fn list_items_for_order(&self, order_id: i32) -> Result<Vec<OrderItemView>, DomainError>;
    fn create_order_item(&self, item: NewOrderItem) -> Result<OrderItem, DomainError>;
    fn update_order_item(&self, id: i32, update: OrderItemUpdate) -> Result<(), DomainError>;
    fn delete_order_item(&self, id: i32) -> Result<(), DomainError>;
}
