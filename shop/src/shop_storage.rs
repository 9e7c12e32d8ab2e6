use std::time::Instant;

use chrono::Utc;
use metrics::histogram;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    Set,
};
use tracing::{debug, info};

use crate::aggregates::{self, CustomerOrderCount, CustomerSpending};
use crate::entities::{customer, order, order_item, product};
use crate::error::ShopError;
use crate::transfer_model::{
    CustomerPatch, NewCustomer, NewOrder, NewOrderItem, NewProduct, OrderItemPatch, OrderPatch,
    OrderReplace, ProductPatch,
};

/// Storage for the four shop entities over an injected SeaORM connection.
///
/// The connection is opened once at process start and closed at shutdown;
/// everything in between is a single-statement read or write, with
/// multi-row deletes handled by the database's cascading foreign keys.
pub struct ShopStorage {
    db: DatabaseConnection,
}

impl ShopStorage {
    pub async fn connect(database_url: &str) -> Result<Self, ShopError> {
        let db = Database::connect(database_url).await?;
        Ok(Self { db })
    }

    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn close(self) -> Result<(), ShopError> {
        self.db.close().await?;
        Ok(())
    }

    // Customers

    pub async fn create_customer(&self, new: &NewCustomer) -> Result<customer::Model, ShopError> {
        new.validate()?;
        let created = customer::ActiveModel {
            id: NotSet,
            name: Set(new.name.clone()),
            email: Set(new.email.clone()),
        }
        .insert(&self.db)
        .await?;
        info!(customer_id = created.id, "created customer");
        Ok(created)
    }

    pub async fn get_customer(&self, id: i64) -> Result<customer::Model, ShopError> {
        debug!(customer_id = id, "looking up customer");
        customer::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ShopError::not_found("customer", id))
    }

    pub async fn list_customers(&self) -> Result<Vec<customer::Model>, ShopError> {
        Ok(customer::Entity::find().all(&self.db).await?)
    }

    pub async fn replace_customer(
        &self,
        id: i64,
        fields: &NewCustomer,
    ) -> Result<customer::Model, ShopError> {
        fields.validate()?;
        let mut active: customer::ActiveModel = self.get_customer(id).await?.into();
        active.name = Set(fields.name.clone());
        active.email = Set(fields.email.clone());
        Ok(active.update(&self.db).await?)
    }

    pub async fn update_customer(
        &self,
        id: i64,
        patch: &CustomerPatch,
    ) -> Result<customer::Model, ShopError> {
        patch.validate()?;
        let existing = self.get_customer(id).await?;
        if patch.is_empty() {
            return Ok(existing);
        }
        let mut active: customer::ActiveModel = existing.into();
        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
        }
        if let Some(email) = &patch.email {
            active.email = Set(email.clone());
        }
        Ok(active.update(&self.db).await?)
    }

    pub async fn delete_customer(&self, id: i64) -> Result<(), ShopError> {
        let result = customer::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ShopError::not_found("customer", id));
        }
        info!(customer_id = id, "deleted customer");
        Ok(())
    }

    // Products

    pub async fn create_product(&self, new: &NewProduct) -> Result<product::Model, ShopError> {
        new.validate()?;
        let created = product::ActiveModel {
            id: NotSet,
            name: Set(new.name.clone()),
            price: Set(new.price),
        }
        .insert(&self.db)
        .await?;
        info!(product_id = created.id, "created product");
        Ok(created)
    }

    pub async fn get_product(&self, id: i64) -> Result<product::Model, ShopError> {
        debug!(product_id = id, "looking up product");
        product::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ShopError::not_found("product", id))
    }

    pub async fn list_products(&self) -> Result<Vec<product::Model>, ShopError> {
        Ok(product::Entity::find().all(&self.db).await?)
    }

    pub async fn replace_product(
        &self,
        id: i64,
        fields: &NewProduct,
    ) -> Result<product::Model, ShopError> {
        fields.validate()?;
        let mut active: product::ActiveModel = self.get_product(id).await?.into();
        active.name = Set(fields.name.clone());
        active.price = Set(fields.price);
        Ok(active.update(&self.db).await?)
    }

    pub async fn update_product(
        &self,
        id: i64,
        patch: &ProductPatch,
    ) -> Result<product::Model, ShopError> {
        patch.validate()?;
        let existing = self.get_product(id).await?;
        if patch.is_empty() {
            return Ok(existing);
        }
        let mut active: product::ActiveModel = existing.into();
        if let Some(name) = &patch.name {
            active.name = Set(name.clone());
        }
        if let Some(price) = patch.price {
            active.price = Set(price);
        }
        Ok(active.update(&self.db).await?)
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ShopError> {
        let result = product::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ShopError::not_found("product", id));
        }
        info!(product_id = id, "deleted product");
        Ok(())
    }

    // Orders

    pub async fn create_order(&self, new: &NewOrder) -> Result<order::Model, ShopError> {
        self.ensure_customer_exists(new.customer).await?;
        let created = order::ActiveModel {
            id: NotSet,
            customer_id: Set(new.customer),
            order_date: Set(Utc::now().naive_utc()),
        }
        .insert(&self.db)
        .await?;
        info!(order_id = created.id, customer_id = created.customer_id, "created order");
        Ok(created)
    }

    pub async fn get_order(&self, id: i64) -> Result<order::Model, ShopError> {
        debug!(order_id = id, "looking up order");
        order::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ShopError::not_found("order", id))
    }

    pub async fn list_orders(&self) -> Result<Vec<order::Model>, ShopError> {
        Ok(order::Entity::find().all(&self.db).await?)
    }

    pub async fn replace_order(
        &self,
        id: i64,
        fields: &OrderReplace,
    ) -> Result<order::Model, ShopError> {
        fields.validate()?;
        let existing = self.get_order(id).await?;
        self.ensure_customer_exists(fields.customer).await?;
        let mut active: order::ActiveModel = existing.into();
        active.customer_id = Set(fields.customer);
        Ok(active.update(&self.db).await?)
    }

    pub async fn update_order(&self, id: i64, patch: &OrderPatch) -> Result<order::Model, ShopError> {
        patch.validate()?;
        let existing = self.get_order(id).await?;
        if patch.is_empty() {
            return Ok(existing);
        }
        let mut active: order::ActiveModel = existing.into();
        if let Some(customer_id) = patch.customer {
            self.ensure_customer_exists(customer_id).await?;
            active.customer_id = Set(customer_id);
        }
        Ok(active.update(&self.db).await?)
    }

    pub async fn delete_order(&self, id: i64) -> Result<(), ShopError> {
        let result = order::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ShopError::not_found("order", id));
        }
        info!(order_id = id, "deleted order");
        Ok(())
    }

    // Order items

    pub async fn create_order_item(
        &self,
        new: &NewOrderItem,
    ) -> Result<order_item::Model, ShopError> {
        new.validate()?;
        self.ensure_order_exists(new.order).await?;
        self.ensure_product_exists(new.product).await?;
        let created = order_item::ActiveModel {
            id: NotSet,
            order_id: Set(new.order),
            product_id: Set(new.product),
            quantity: Set(new.quantity),
        }
        .insert(&self.db)
        .await?;
        info!(order_item_id = created.id, order_id = created.order_id, "created order item");
        Ok(created)
    }

    pub async fn get_order_item(&self, id: i64) -> Result<order_item::Model, ShopError> {
        debug!(order_item_id = id, "looking up order item");
        order_item::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ShopError::not_found("order item", id))
    }

    pub async fn list_order_items(&self) -> Result<Vec<order_item::Model>, ShopError> {
        Ok(order_item::Entity::find().all(&self.db).await?)
    }

    pub async fn replace_order_item(
        &self,
        id: i64,
        fields: &NewOrderItem,
    ) -> Result<order_item::Model, ShopError> {
        fields.validate()?;
        let existing = self.get_order_item(id).await?;
        self.ensure_order_exists(fields.order).await?;
        self.ensure_product_exists(fields.product).await?;
        let mut active: order_item::ActiveModel = existing.into();
        active.order_id = Set(fields.order);
        active.product_id = Set(fields.product);
        active.quantity = Set(fields.quantity);
        Ok(active.update(&self.db).await?)
    }

    pub async fn update_order_item(
        &self,
        id: i64,
        patch: &OrderItemPatch,
    ) -> Result<order_item::Model, ShopError> {
        patch.validate()?;
        let existing = self.get_order_item(id).await?;
        if patch.is_empty() {
            return Ok(existing);
        }
        let mut active: order_item::ActiveModel = existing.into();
        if let Some(order_id) = patch.order {
            self.ensure_order_exists(order_id).await?;
            active.order_id = Set(order_id);
        }
        if let Some(product_id) = patch.product {
            self.ensure_product_exists(product_id).await?;
            active.product_id = Set(product_id);
        }
        if let Some(quantity) = patch.quantity {
            active.quantity = Set(quantity);
        }
        Ok(active.update(&self.db).await?)
    }

    pub async fn delete_order_item(&self, id: i64) -> Result<(), ShopError> {
        let result = order_item::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ShopError::not_found("order item", id));
        }
        info!(order_item_id = id, "deleted order item");
        Ok(())
    }

    // Derived views

    pub async fn customer_order_counts(&self) -> Result<Vec<CustomerOrderCount>, ShopError> {
        let customers = customer::Entity::find().all(&self.db).await?;
        let orders = order::Entity::find().all(&self.db).await?;
        Ok(aggregates::order_counts(&customers, &orders))
    }

    pub async fn customer_spending(&self) -> Result<Vec<CustomerSpending>, ShopError> {
        let t0 = Instant::now();
        let customers = customer::Entity::find().all(&self.db).await?;
        let orders = order::Entity::find().all(&self.db).await?;
        let items = order_item::Entity::find().all(&self.db).await?;
        let products = product::Entity::find().all(&self.db).await?;
        let totals = aggregates::spending_totals(&customers, &orders, &items, &products);
        let h = histogram!("shop_storage_query_seconds", "op" => "customer_spending");
        h.record(t0.elapsed().as_secs_f64());
        Ok(totals)
    }

    pub async fn frequent_customers(
        &self,
        min_orders: u64,
    ) -> Result<Vec<CustomerOrderCount>, ShopError> {
        let customers = customer::Entity::find().all(&self.db).await?;
        let orders = order::Entity::find().all(&self.db).await?;
        Ok(aggregates::frequent_customers(&customers, &orders, min_orders))
    }

    pub async fn expensive_products(
        &self,
        min_price: Decimal,
    ) -> Result<Vec<product::Model>, ShopError> {
        let products = product::Entity::find().all(&self.db).await?;
        Ok(aggregates::expensive_products(products, min_price))
    }

    pub async fn recent_orders(&self, days: i64) -> Result<Vec<order::Model>, ShopError> {
        let orders = order::Entity::find().all(&self.db).await?;
        Ok(aggregates::recent_orders(orders, days, Utc::now().naive_utc()))
    }

    pub async fn order_total_quantity(&self, order_id: i64) -> Result<u64, ShopError> {
        self.get_order(order_id).await?;
        let items = order_item::Entity::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .all(&self.db)
            .await?;
        Ok(aggregates::total_quantity(&items))
    }

    // Reference checks, reported with the offending field before a write is
    // attempted. A concurrent delete can still trip the database constraint,
    // which surfaces as a conflict instead.

    async fn ensure_customer_exists(&self, id: i64) -> Result<(), ShopError> {
        if customer::Entity::find_by_id(id).one(&self.db).await?.is_none() {
            return Err(ShopError::validation(
                "customer",
                format!("customer {} does not exist", id),
            ));
        }
        Ok(())
    }

    async fn ensure_order_exists(&self, id: i64) -> Result<(), ShopError> {
        if order::Entity::find_by_id(id).one(&self.db).await?.is_none() {
            return Err(ShopError::validation(
                "order",
                format!("order {} does not exist", id),
            ));
        }
        Ok(())
    }

    async fn ensure_product_exists(&self, id: i64) -> Result<(), ShopError> {
        if product::Entity::find_by_id(id).one(&self.db).await?.is_none() {
            return Err(ShopError::validation(
                "product",
                format!("product {} does not exist", id),
            ));
        }
        Ok(())
    }
}
