use bigdecimal::BigDecimal;

use crate::domain::errors::DomainError;
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::domain::sales::{
    Customer, CustomerInput, NewOrderItem, Order, OrderItem, OrderItemInput, OrderItemUpdate,
    OrderItemView, OrderUpdate, OrderView, Product, ProductInput,
};

const NAME_MAX_LEN: usize = 50;
const PRODUCT_NAME_MAX_LEN: usize = 100;
const DESCRIPTION_MAX_LEN: usize = 500;

pub struct SalesService<R> {
    repo: R,
}

impl<R> SalesService<R>
where
    R: CustomerRepository + ProductRepository + OrderRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    // ── Customers ────────────────────────────────────────────────────────────

    pub fn list_customers(&self) -> Result<Vec<Customer>, DomainError> {
        self.repo.list_customers()
    }

    pub fn get_customer(&self, id: i32) -> Result<Customer, DomainError> {
        self.repo
            .find_customer(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Customer {}", id)))
    }

    pub fn create_customer(&self, input: CustomerInput) -> Result<Customer, DomainError> {
        validate_customer(&input)?;
        let customer = self.repo.create_customer(input)?;
        log::info!("Created customer {}", customer.id);
        Ok(customer)
    }

    pub fn update_customer(
        &self,
        path_id: i32,
        body_id: i32,
        input: CustomerInput,
    ) -> Result<(), DomainError> {
        ensure_same_id(path_id, body_id)?;
        validate_customer(&input)?;
        self.repo.update_customer(path_id, input)?;
        log::info!("Updated customer {}", path_id);
        Ok(())
    }

    pub fn delete_customer(&self, id: i32) -> Result<(), DomainError> {
        self.repo.delete_customer(id)?;
        log::info!("Deleted customer {}", id);
        Ok(())
    }

    // ── Products ─────────────────────────────────────────────────────────────

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.list_products()
    }

    pub fn get_product(&self, id: i32) -> Result<Product, DomainError> {
        self.repo
            .find_product(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Product {}", id)))
    }

    pub fn list_products_up_to(&self, max_price: &BigDecimal) -> Result<Vec<Product>, DomainError> {
        self.repo.list_products_up_to(max_price)
    }

    pub fn create_product(&self, input: ProductInput) -> Result<Product, DomainError> {
        validate_product(&input)?;
        let product = self.repo.create_product(input)?;
        log::info!("Created product {} at {}", product.id, product.price);
        Ok(product)
    }

    pub fn update_product(
        &self,
        path_id: i32,
        body_id: i32,
        input: ProductInput,
    ) -> Result<(), DomainError> {
        ensure_same_id(path_id, body_id)?;
        validate_product(&input)?;
        self.repo.update_product(path_id, input)?;
        log::info!("Updated product {}", path_id);
        Ok(())
    }

    pub fn delete_product(&self, id: i32) -> Result<(), DomainError> {
        self.repo.delete_product(id)?;
        log::info!("Deleted product {}", id);
        Ok(())
    }

    // ── Orders ───────────────────────────────────────────────────────────────

    pub fn list_orders(&self) -> Result<Vec<OrderView>, DomainError> {
        self.repo.list_orders()
    }

    pub fn get_order(&self, id: i32) -> Result<OrderView, DomainError> {
        self.repo
            .find_order(id)?
            .ok_or_else(|| DomainError::NotFound(format!("Order {}", id)))
    }

    pub fn list_orders_for_customer(&self, customer_id: i32) -> Result<Vec<Order>, DomainError> {
        self.repo.list_orders_for_customer(customer_id)
    }

    pub fn create_order(
        &self,
        customer_id: i32,
        items: Vec<OrderItemInput>,
    ) -> Result<OrderView, DomainError> {
        for item in &items {
            validate_quantity(item.quantity)?;
        }
        let view = self
            .repo
            .create_order(customer_id, items)
            .inspect_err(warn_rejected)?;
        log::info!(
            "Created order {} for customer {} totalling {}",
            view.order.id,
            view.order.customer_id,
            view.order.total_amount
        );
        Ok(view)
    }

    /// Overwrites the order header as supplied, including its total.
    pub fn update_order(
        &self,
        path_id: i32,
        body_id: i32,
        update: OrderUpdate,
    ) -> Result<(), DomainError> {
        ensure_same_id(path_id, body_id)?;
        self.repo
            .update_order(path_id, update)
            .inspect_err(warn_rejected)?;
        log::info!("Updated order {}", path_id);
        Ok(())
    }

    pub fn delete_order(&self, id: i32) -> Result<(), DomainError> {
        self.repo.delete_order(id)?;
        log::info!("Deleted order {} and its items", id);
        Ok(())
    }

    // ── Order items ──────────────────────────────────────────────────────────

    pub fn list_order_items(&self) -> Result<Vec<OrderItemView>, DomainError> {
        self.repo.list_order_items()
    }

    pub fn get_order_item(&self, id: i32) -> Result<OrderItemView, DomainError> {
        self.repo
            .find_order_item(id)?
            .ok_or_else(|| DomainError::NotFound(format!("OrderItem {}", id)))
    }

    pub fn list_items_for_order(&self, order_id: i32) -> Result<Vec<OrderItemView>, DomainError> {
        self.repo.list_items_for_order(order_id)
    }

    pub fn create_order_item(&self, item: NewOrderItem) -> Result<OrderItem, DomainError> {
        validate_quantity(item.quantity)?;
        let item = self
            .repo
            .create_order_item(item)
            .inspect_err(warn_rejected)?;
        log::info!("Added item {} to order {}", item.id, item.order_id);
        Ok(item)
    }

    pub fn update_order_item(
        &self,
        path_id: i32,
        body_id: i32,
        update: OrderItemUpdate,
    ) -> Result<(), DomainError> {
        ensure_same_id(path_id, body_id)?;
        // An unknown item is reported as missing before its body is judged.
        self.get_order_item(path_id)?;
        validate_quantity(update.quantity)?;
        self.repo
            .update_order_item(path_id, update)
            .inspect_err(warn_rejected)?;
        log::info!("Updated order item {}", path_id);
        Ok(())
    }

    pub fn delete_order_item(&self, id: i32) -> Result<(), DomainError> {
        self.repo.delete_order_item(id)?;
        log::info!("Deleted order item {}", id);
        Ok(())
    }
}

fn warn_rejected(e: &DomainError) {
    if let DomainError::InvalidReference(_) = e {
        log::warn!("Rejected write: {}", e);
    }
}

fn ensure_same_id(path_id: i32, body_id: i32) -> Result<(), DomainError> {
    if path_id != body_id {
        return Err(DomainError::IdMismatch {
            path: path_id,
            body: body_id,
        });
    }
    Ok(())
}

fn validate_quantity(quantity: i32) -> Result<(), DomainError> {
    if quantity <= 0 {
        return Err(DomainError::InvalidInput(format!(
            "quantity must be greater than zero, got {}",
            quantity
        )));
    }
    Ok(())
}

fn validate_required(field: &str, value: &str, max_len: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidInput(format!("{} is required", field)));
    }
    validate_max_len(field, value, max_len)
}

fn validate_max_len(field: &str, value: &str, max_len: usize) -> Result<(), DomainError> {
    if value.chars().count() > max_len {
        return Err(DomainError::InvalidInput(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}

fn validate_customer(input: &CustomerInput) -> Result<(), DomainError> {
    validate_required("first_name", &input.first_name, NAME_MAX_LEN)?;
    validate_required("last_name", &input.last_name, NAME_MAX_LEN)?;
    if !input.email.is_empty() && !looks_like_email(&input.email) {
        return Err(DomainError::InvalidInput(format!(
            "'{}' is not a valid email address",
            input.email
        )));
    }
    Ok(())
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

fn validate_product(input: &ProductInput) -> Result<(), DomainError> {
    validate_required("name", &input.name, PRODUCT_NAME_MAX_LEN)?;
    if let Some(description) = &input.description {
        validate_max_len("description", description, DESCRIPTION_MAX_LEN)?;
    }
    if input.price < BigDecimal::from(0) {
        return Err(DomainError::InvalidInput(format!(
            "price must not be negative, got {}",
            input.price
        )));
    }
    Ok(())
}
