use std::sync::{Mutex, MutexGuard, PoisonError};

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use crate::domain::errors::DomainError;
use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
use crate::domain::sales::{
    Customer, CustomerInput, NewOrderItem, Order, OrderItem, OrderItemInput, OrderItemUpdate,
    OrderItemView, OrderUpdate, OrderView, Product, ProductInput,
};

use super::seed;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl<T> From<PoisonError<T>> for DomainError {
    fn from(e: PoisonError<T>) -> Self {
        DomainError::Internal(format!("store lock poisoned: {}", e))
    }
}

// ── Id allocation ────────────────────────────────────────────────────────────

/// Monotonic id counter for one entity type. Ids handed out are never reused,
/// even after the entity carrying them is deleted.
#[derive(Debug, Clone, Copy)]
struct IdSequence {
    next: i32,
}

impl IdSequence {
    fn starting_after(ids: impl Iterator<Item = i32>) -> Self {
        Self {
            next: ids.max().map_or(1, |max| max + 1),
        }
    }

    fn advance(&mut self) -> i32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

// ── Collections ──────────────────────────────────────────────────────────────

/// The four collections plus their id counters. Every method here assumes the
/// caller holds the store lock, so a whole read-modify-write across orders and
/// items is applied as one step.
#[derive(Debug, Default)]
pub struct SalesData {
    customers: Vec<Customer>,
    products: Vec<Product>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
    customer_ids: IdSequence,
    product_ids: IdSequence,
    order_ids: IdSequence,
    order_item_ids: IdSequence,
}

impl SalesData {
    /// Builds the collections from existing rows; each counter starts after
    /// the highest id already present.
    pub fn from_parts(
        customers: Vec<Customer>,
        products: Vec<Product>,
        orders: Vec<Order>,
        order_items: Vec<OrderItem>,
    ) -> Self {
        Self {
            customer_ids: IdSequence::starting_after(customers.iter().map(|c| c.id)),
            product_ids: IdSequence::starting_after(products.iter().map(|p| p.id)),
            order_ids: IdSequence::starting_after(orders.iter().map(|o| o.id)),
            order_item_ids: IdSequence::starting_after(order_items.iter().map(|i| i.id)),
            customers,
            products,
            orders,
            order_items,
        }
    }

    fn customer(&self, id: i32) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    fn product(&self, id: i32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn order_mut(&mut self, id: i32) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == id)
    }

    fn snapshot_price(&self, product_id: i32) -> Result<BigDecimal, DomainError> {
        self.product(product_id)
            .map(|p| p.price.clone())
            .ok_or_else(|| DomainError::InvalidReference(format!("ProductId: {}", product_id)))
    }

    fn item_view(&self, item: &OrderItem) -> OrderItemView {
        OrderItemView {
            item: item.clone(),
            product: self.product(item.product_id).cloned(),
        }
    }

    // ── Customers ────────────────────────────────────────────────────────────

    pub fn create_customer(&mut self, input: CustomerInput) -> Customer {
        let customer = Customer {
            id: self.customer_ids.advance(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
        };
        self.customers.push(customer.clone());
        customer
    }

    pub fn update_customer(&mut self, id: i32, input: CustomerInput) -> Result<(), DomainError> {
        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("Customer {}", id)))?;
        customer.first_name = input.first_name;
        customer.last_name = input.last_name;
        customer.email = input.email;
        Ok(())
    }

    /// Removes the customer only; orders that reference it are left in place.
    pub fn delete_customer(&mut self, id: i32) -> Result<(), DomainError> {
        let idx = self
            .customers
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("Customer {}", id)))?;
        self.customers.remove(idx);
        Ok(())
    }

    // ── Products ─────────────────────────────────────────────────────────────

    pub fn products_up_to(&self, max_price: &BigDecimal) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| &p.price <= max_price)
            .cloned()
            .collect()
    }

    pub fn create_product(&mut self, input: ProductInput) -> Product {
        let product = Product {
            id: self.product_ids.advance(),
            name: input.name,
            description: input.description,
            price: input.price,
        };
        self.products.push(product.clone());
        product
    }

    /// Overwrites the product. Price snapshots already taken by order items
    /// are not touched.
    pub fn update_product(&mut self, id: i32, input: ProductInput) -> Result<(), DomainError> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("Product {}", id)))?;
        product.name = input.name;
        product.description = input.description;
        product.price = input.price;
        Ok(())
    }

    pub fn delete_product(&mut self, id: i32) -> Result<(), DomainError> {
        let idx = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("Product {}", id)))?;
        self.products.remove(idx);
        Ok(())
    }

    // ── Orders ───────────────────────────────────────────────────────────────

    pub fn order_views(&self) -> Vec<OrderView> {
        self.orders
            .iter()
            .map(|o| OrderView {
                order: o.clone(),
                customer: self.customer(o.customer_id).cloned(),
                items: None,
            })
            .collect()
    }

    pub fn order_view(&self, id: i32) -> Option<OrderView> {
        let order = self.orders.iter().find(|o| o.id == id)?;
        Some(OrderView {
            order: order.clone(),
            customer: self.customer(order.customer_id).cloned(),
            items: Some(self.items_of(id)),
        })
    }

    pub fn orders_for_customer(&self, customer_id: i32) -> Result<Vec<Order>, DomainError> {
        if self.customer(customer_id).is_none() {
            return Err(DomainError::NotFound(format!("Customer {}", customer_id)));
        }
        Ok(self
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect())
    }

    /// Creates an order with its items. Every reference is resolved and every
    /// price snapshotted before anything is written, so a rejected request
    /// leaves the collections and the id counters untouched.
    pub fn create_order(
        &mut self,
        customer_id: i32,
        items: Vec<OrderItemInput>,
        order_date: DateTime<Utc>,
    ) -> Result<Order, DomainError> {
        if self.customer(customer_id).is_none() {
            return Err(DomainError::InvalidReference(format!(
                "CustomerId: {}",
                customer_id
            )));
        }

        let priced = items
            .into_iter()
            .map(|input| -> Result<_, DomainError> {
                Ok((self.snapshot_price(input.product_id)?, input))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let order_id = self.order_ids.advance();
        let mut total_amount = BigDecimal::from(0);
        for (unit_price, input) in priced {
            let item = OrderItem {
                id: self.order_item_ids.advance(),
                order_id,
                product_id: input.product_id,
                quantity: input.quantity,
                unit_price,
            };
            total_amount += item.line_total();
            self.order_items.push(item);
        }

        let order = Order {
            id: order_id,
            customer_id,
            order_date,
            total_amount,
        };
        self.orders.push(order.clone());
        Ok(order)
    }

    /// Overwrites the order header verbatim. The supplied total is not
    /// checked against the order's items.
    pub fn update_order(&mut self, id: i32, update: OrderUpdate) -> Result<(), DomainError> {
        let current_customer = self
            .orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.customer_id)
            .ok_or_else(|| DomainError::NotFound(format!("Order {}", id)))?;

        if update.customer_id != current_customer && self.customer(update.customer_id).is_none() {
            return Err(DomainError::InvalidReference(format!(
                "CustomerId: {}",
                update.customer_id
            )));
        }

        if let Some(order) = self.order_mut(id) {
            order.customer_id = update.customer_id;
            order.order_date = update.order_date;
            order.total_amount = update.total_amount;
        }
        Ok(())
    }

    /// Deletes the order and every item that belongs to it.
    pub fn delete_order(&mut self, id: i32) -> Result<(), DomainError> {
        let idx = self
            .orders
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("Order {}", id)))?;
        self.order_items.retain(|i| i.order_id != id);
        self.orders.remove(idx);
        Ok(())
    }

    // ── Order items ──────────────────────────────────────────────────────────

    fn items_of(&self, order_id: i32) -> Vec<OrderItemView> {
        self.order_items
            .iter()
            .filter(|i| i.order_id == order_id)
            .map(|i| self.item_view(i))
            .collect()
    }

    pub fn item_views(&self) -> Vec<OrderItemView> {
        self.order_items.iter().map(|i| self.item_view(i)).collect()
    }

    pub fn item_view_by_id(&self, id: i32) -> Option<OrderItemView> {
        self.order_items
            .iter()
            .find(|i| i.id == id)
            .map(|i| self.item_view(i))
    }

    pub fn items_for_order(&self, order_id: i32) -> Result<Vec<OrderItemView>, DomainError> {
        if !self.orders.iter().any(|o| o.id == order_id) {
            return Err(DomainError::NotFound(format!("Order {}", order_id)));
        }
        Ok(self.items_of(order_id))
    }

    /// Appends an item and adds its line total to the parent order.
    pub fn create_order_item(&mut self, new: NewOrderItem) -> Result<OrderItem, DomainError> {
        if !self.orders.iter().any(|o| o.id == new.order_id) {
            return Err(DomainError::InvalidReference(format!(
                "OrderId: {}",
                new.order_id
            )));
        }
        let unit_price = self.snapshot_price(new.product_id)?;

        let item = OrderItem {
            id: self.order_item_ids.advance(),
            order_id: new.order_id,
            product_id: new.product_id,
            quantity: new.quantity,
            unit_price,
        };
        if let Some(order) = self.order_mut(item.order_id) {
            order.total_amount += item.line_total();
        }
        self.order_items.push(item.clone());
        Ok(item)
    }

    /// Changes an item's product and quantity. The unit price is snapshotted
    /// again only when the product changes; otherwise the frozen price stays,
    /// whatever the product costs now.
    pub fn update_order_item(
        &mut self,
        id: i32,
        update: OrderItemUpdate,
    ) -> Result<(), DomainError> {
        let existing = self
            .order_items
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("OrderItem {}", id)))?;

        let unit_price = if update.product_id != existing.product_id {
            self.snapshot_price(update.product_id)?
        } else {
            existing.unit_price.clone()
        };

        let old_line_total = existing.line_total();
        let updated = OrderItem {
            id,
            order_id: existing.order_id,
            product_id: update.product_id,
            quantity: update.quantity,
            unit_price,
        };
        let new_line_total = updated.line_total();

        if let Some(order) = self.order_mut(updated.order_id) {
            order.total_amount -= old_line_total;
            order.total_amount += new_line_total;
        }
        if let Some(slot) = self.order_items.iter_mut().find(|i| i.id == id) {
            *slot = updated;
        }
        Ok(())
    }

    /// Removes an item and subtracts its line total from the parent order.
    pub fn delete_order_item(&mut self, id: i32) -> Result<(), DomainError> {
        let idx = self
            .order_items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("OrderItem {}", id)))?;
        let item = self.order_items.remove(idx);
        if let Some(order) = self.order_mut(item.order_id) {
            order.total_amount -= item.line_total();
        }
        Ok(())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// Process-lifetime store for customers, products, orders and order items.
/// All access goes through one mutex.
pub struct InMemorySalesStore {
    data: Mutex<SalesData>,
}

impl InMemorySalesStore {
    pub fn new() -> Self {
        Self::from_data(SalesData::default())
    }

    /// A store preloaded with the sample catalogue, customers and orders.
    pub fn seeded() -> Self {
        Self::from_data(seed::sample_data(Utc::now()))
    }

    pub fn from_data(data: SalesData) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, SalesData>, DomainError> {
        Ok(self.data.lock()?)
    }
}

impl Default for InMemorySalesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerRepository for InMemorySalesStore {
    fn list_customers(&self) -> Result<Vec<Customer>, DomainError> {
        Ok(self.lock()?.customers.clone())
    }

    fn find_customer(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        Ok(self.lock()?.customer(id).cloned())
    }

    fn create_customer(&self, input: CustomerInput) -> Result<Customer, DomainError> {
        Ok(self.lock()?.create_customer(input))
    }

    fn update_customer(&self, id: i32, input: CustomerInput) -> Result<(), DomainError> {
        self.lock()?.update_customer(id, input)
    }

    fn delete_customer(&self, id: i32) -> Result<(), DomainError> {
        self.lock()?.delete_customer(id)
    }
}

impl ProductRepository for InMemorySalesStore {
    fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.lock()?.products.clone())
    }

    fn find_product(&self, id: i32) -> Result<Option<Product>, DomainError> {
        Ok(self.lock()?.product(id).cloned())
    }

    fn list_products_up_to(&self, max_price: &BigDecimal) -> Result<Vec<Product>, DomainError> {
        Ok(self.lock()?.products_up_to(max_price))
    }

    fn create_product(&self, input: ProductInput) -> Result<Product, DomainError> {
        Ok(self.lock()?.create_product(input))
    }

    fn update_product(&self, id: i32, input: ProductInput) -> Result<(), DomainError> {
        self.lock()?.update_product(id, input)
    }

    fn delete_product(&self, id: i32) -> Result<(), DomainError> {
        self.lock()?.delete_product(id)
    }
}

impl OrderRepository for InMemorySalesStore {
    fn list_orders(&self) -> Result<Vec<OrderView>, DomainError> {
        Ok(self.lock()?.order_views())
    }

    fn find_order(&self, id: i32) -> Result<Option<OrderView>, DomainError> {
        Ok(self.lock()?.order_view(id))
    }

    fn list_orders_for_customer(&self, customer_id: i32) -> Result<Vec<Order>, DomainError> {
        self.lock()?.orders_for_customer(customer_id)
    }

    fn create_order(
        &self,
        customer_id: i32,
        items: Vec<OrderItemInput>,
    ) -> Result<OrderView, DomainError> {
        let mut data = self.lock()?;
        let order = data.create_order(customer_id, items, Utc::now())?;
        Ok(OrderView {
            customer: data.customer(order.customer_id).cloned(),
            items: Some(data.items_of(order.id)),
            order,
        })
    }

    fn update_order(&self, id: i32, update: OrderUpdate) -> Result<(), DomainError> {
        self.lock()?.update_order(id, update)
    }

    fn delete_order(&self, id: i32) -> Result<(), DomainError> {
        self.lock()?.delete_order(id)
    }

    fn list_order_items(&self) -> Result<Vec<OrderItemView>, DomainError> {
        Ok(self.lock()?.item_views())
    }

    fn find_order_item(&self, id: i32) -> Result<Option<OrderItemView>, DomainError> {
        Ok(self.lock()?.item_view_by_id(id))
    }

    fn list_items_for_order(&self, order_id: i32) -> Result<Vec<OrderItemView>, DomainError> {
        self.lock()?.items_for_order(order_id)
    }

    fn create_order_item(&self, item: NewOrderItem) -> Result<OrderItem, DomainError> {
        self.lock()?.create_order_item(item)
    }

    fn update_order_item(&self, id: i32, update: OrderItemUpdate) -> Result<(), DomainError> {
        self.lock()?.update_order_item(id, update)
    }

    fn delete_order_item(&self, id: i32) -> Result<(), DomainError> {
        self.lock()?.delete_order_item(id)
    }
}
