use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
}

/// An order header. `total_amount` is denormalized: the store keeps it equal
/// to the sum of the order's item line totals on every item mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub order_date: DateTime<Utc>,
    pub total_amount: BigDecimal,
}

/// A single order line. `unit_price` is a snapshot of the product price taken
/// when the item first referenced the product.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl OrderItem {
    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

// ── Inputs ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CustomerInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
}

/// One requested line of a new order. The price is always taken from the
/// product, never from the caller.
#[derive(Debug, Clone)]
pub struct OrderItemInput {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct OrderItemUpdate {
    pub product_id: i32,
    pub quantity: i32,
}

/// Raw overwrite of an order header. `total_amount` is stored as given and is
/// not reconciled against the order's items.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub customer_id: i32,
    pub order_date: DateTime<Utc>,
    pub total_amount: BigDecimal,
}

// ── Read projections ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub item: OrderItem,
    pub product: Option<Product>,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub order: Order,
    pub customer: Option<Customer>,
    /// `None` when the projection was built without items (order listings).
    pub items: Option<Vec<OrderItemView>>,
}
