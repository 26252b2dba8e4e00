use bigdecimal::{num_bigint::BigInt, BigDecimal};
use chrono::{DateTime, Duration, Utc};

use crate::domain::sales::{Customer, Order, OrderItem, Product};

use super::memory_store::SalesData;

// (id, name, description, price in cents)
const PRODUCTS: [(i32, &str, &str, i64); 5] = [
    (1, "Laptop", "High-performance laptop", 129_999),
    (2, "Smartphone", "Latest model smartphone", 79_999),
    (3, "Headphones", "Wireless noise-canceling headphones", 19_999),
    (4, "Tablet", "10-inch tablet with stylus", 49_999),
    (5, "Smartwatch", "Fitness tracking smartwatch", 29_999),
];

// (id, first name, last name, email)
const CUSTOMERS: [(i32, &str, &str, &str); 5] = [
    (1, "John", "Doe", "john.doe@email.com"),
    (2, "Jane", "Smith", "jane.smith@email.com"),
    (3, "Bob", "Johnson", "bob.johnson@email.com"),
    (4, "Alice", "Brown", "alice.brown@email.com"),
    (5, "Charlie", "Wilson", "charlie.wilson@email.com"),
];

// (id, customer id, days before now)
const ORDERS: [(i32, i32, i64); 5] = [(1, 1, 5), (2, 2, 3), (3, 1, 2), (4, 3, 1), (5, 4, 0)];

// (id, order id, product id, quantity)
const ORDER_ITEMS: [(i32, i32, i32, i32); 8] = [
    (1, 1, 1, 1),
    (2, 1, 3, 1),
    (3, 2, 2, 1),
    (4, 3, 4, 1),
    (5, 3, 3, 1),
    (6, 4, 1, 1),
    (7, 4, 2, 1),
    (8, 5, 4, 1),
];

/// Sample catalogue, customers and orders. Item prices are snapshots of the
/// seeded product prices and order totals are summed from the seeded items.
pub fn sample_data(now: DateTime<Utc>) -> SalesData {
    let products: Vec<Product> = PRODUCTS
        .iter()
        .map(|&(id, name, description, cents)| Product {
            id,
            name: name.to_string(),
            description: Some(description.to_string()),
            price: BigDecimal::new(BigInt::from(cents), 2),
        })
        .collect();

    let customers = CUSTOMERS
        .iter()
        .map(|&(id, first_name, last_name, email)| Customer {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        })
        .collect();

    let order_items: Vec<OrderItem> = ORDER_ITEMS
        .iter()
        .filter_map(|&(id, order_id, product_id, quantity)| {
            let product = products.iter().find(|p| p.id == product_id)?;
            Some(OrderItem {
                id,
                order_id,
                product_id,
                quantity,
                unit_price: product.price.clone(),
            })
        })
        .collect();

    let orders = ORDERS
        .iter()
        .map(|&(id, customer_id, days_ago)| Order {
            id,
            customer_id,
            order_date: now - Duration::days(days_ago),
            total_amount: order_items
                .iter()
                .filter(|i| i.order_id == id)
                .map(OrderItem::line_total)
                .fold(BigDecimal::from(0), |acc, line| acc + line),
        })
        .collect();

    SalesData::from_parts(customers, products, orders, order_items)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use chrono::Utc;

    use super::sample_data;
    use crate::domain::ports::{CustomerRepository, OrderRepository, ProductRepository};
    use crate::infrastructure::memory_store::InMemorySalesStore;

    #[test]
    fn sample_data_has_expected_shape() {
        let store = InMemorySalesStore::from_data(sample_data(Utc::now()));
        assert_eq!(store.list_customers().unwrap().len(), 5);
        assert_eq!(store.list_products().unwrap().len(), 5);
        assert_eq!(store.list_orders().unwrap().len(), 5);
        assert_eq!(store.list_order_items().unwrap().len(), 8);
    }

    #[test]
    fn fourth_order_total_follows_its_items() {
        let store = InMemorySalesStore::from_data(sample_data(Utc::now()));
        let order = store.find_order(4).unwrap().expect("order exists").order;
        assert_eq!(
            order.total_amount,
            BigDecimal::from_str("2099.98").unwrap()
        );
    }

    #[test]
    fn seeded_prices_are_exact_and_snapshotted_into_items() {
        let store = InMemorySalesStore::from_data(sample_data(Utc::now()));
        let prices: Vec<String> = store
            .list_products()
            .unwrap()
            .iter()
            .map(|p| p.price.to_string())
            .collect();
        assert_eq!(
            prices,
            vec!["1299.99", "799.99", "199.99", "499.99", "299.99"]
        );

        for view in store.list_order_items().unwrap() {
            let product = view.product.expect("seeded item references a seeded product");
            assert_eq!(view.item.unit_price, product.price, "item {}", view.item.id);
        }
    }

    #[test]
    fn orders_are_dated_relative_to_now() {
        let now = Utc::now();
        let store = InMemorySalesStore::from_data(sample_data(now));
        let orders = store.list_orders().unwrap();
        assert_eq!(orders[0].order.order_date, now - chrono::Duration::days(5));
        assert_eq!(orders[4].order.order_date, now);
    }
}
