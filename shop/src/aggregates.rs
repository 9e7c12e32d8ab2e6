use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;

use crate::entities::{customer, order, order_item, product};

/// Derived views over the base entities, computed on demand and never
/// persisted. All functions are pure: they take the current collections and
/// return computed values, so the same logic serves storage wrappers and
/// tests alike.

pub const DEFAULT_MIN_ORDERS: u64 = 2;
pub const DEFAULT_RECENT_DAYS: i64 = 7;

pub fn default_min_price() -> Decimal {
    Decimal::new(100, 0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerOrderCount {
    pub customer: customer::Model,
    pub order_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerSpending {
    pub customer: customer::Model,
    pub total_spent: Decimal,
}

/// Annotate every customer with the number of orders it owns.
pub fn order_counts(
    customers: &[customer::Model],
    orders: &[order::Model],
) -> Vec<CustomerOrderCount> {
    customers
        .iter()
        .map(|c| CustomerOrderCount {
            customer: c.clone(),
            order_count: orders.iter().filter(|o| o.customer_id == c.id).count() as u64,
        })
        .collect()
}

/// Annotate every customer with the sum of price * quantity across the
/// items of its orders. Customers without items total zero.
pub fn spending_totals(
    customers: &[customer::Model],
    orders: &[order::Model],
    items: &[order_item::Model],
    products: &[product::Model],
) -> Vec<CustomerSpending> {
    let price_of: HashMap<i64, Decimal> = products.iter().map(|p| (p.id, p.price)).collect();

    customers
        .iter()
        .map(|c| {
            let order_ids: HashSet<i64> = orders
                .iter()
                .filter(|o| o.customer_id == c.id)
                .map(|o| o.id)
                .collect();
            let total_spent = items
                .iter()
                .filter(|i| order_ids.contains(&i.order_id))
                .filter_map(|i| price_of.get(&i.product_id).map(|p| *p * Decimal::from(i.quantity)))
                .sum();
            CustomerSpending {
                customer: c.clone(),
                total_spent,
            }
        })
        .collect()
}

/// Customers with at least `min_orders` orders, built on top of
/// [`order_counts`].
pub fn frequent_customers(
    customers: &[customer::Model],
    orders: &[order::Model],
    min_orders: u64,
) -> Vec<CustomerOrderCount> {
    order_counts(customers, orders)
        .into_iter()
        .filter(|c| c.order_count >= min_orders)
        .collect()
}

/// Products priced at or above `min_price`.
pub fn expensive_products(products: Vec<product::Model>, min_price: Decimal) -> Vec<product::Model> {
    products.into_iter().filter(|p| p.price >= min_price).collect()
}

/// Orders placed within the last `days` days of `now`.
pub fn recent_orders(orders: Vec<order::Model>, days: i64, now: NaiveDateTime) -> Vec<order::Model> {
    let threshold = now - Duration::days(days);
    orders.into_iter().filter(|o| o.order_date >= threshold).collect()
}

/// Sum of quantities across a set of order items, zero when empty.
pub fn total_quantity(items: &[order_item::Model]) -> u64 {
    items.iter().map(|i| i.quantity as u64).sum()
}
