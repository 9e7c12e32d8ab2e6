use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{customer, order, order_item, product};
use crate::error::ShopError;

/// Flat projections exchanged at the HTTP boundary. Foreign keys travel as
/// plain ids, never as nested objects.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerData {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<customer::Model> for CustomerData {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductData {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}

impl From<product::Model> for ProductData {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderData {
    pub id: i64,
    pub customer: i64,
    pub order_date: NaiveDateTime,
}

impl From<order::Model> for OrderData {
    fn from(model: order::Model) -> Self {
        Self {
            id: model.id,
            customer: model.customer_id,
            order_date: model.order_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemData {
    pub id: i64,
    pub order: i64,
    pub product: i64,
    pub quantity: i32,
}

impl From<order_item::Model> for OrderItemData {
    fn from(model: order_item::Model) -> Self {
        Self {
            id: model.id,
            order: model.order_id,
            product: model.product_id,
            quantity: model.quantity,
        }
    }
}

/// Inbound payloads. `New*` types serve create and full update; `*Patch`
/// types carry only the fields the caller wants changed. Scalar-field
/// validation happens here, before anything touches the database.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}

impl NewCustomer {
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.name.trim().is_empty() {
            return Err(ShopError::validation("name", "must not be empty"));
        }
        if self.email.trim().is_empty() {
            return Err(ShopError::validation("email", "must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CustomerPatch {
    pub fn validate(&self) -> Result<(), ShopError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ShopError::validation("name", "must not be empty"));
            }
        }
        if let Some(email) = &self.email {
            if email.trim().is_empty() {
                return Err(ShopError::validation("email", "must not be empty"));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.name.trim().is_empty() {
            return Err(ShopError::validation("name", "must not be empty"));
        }
        if self.price.is_sign_negative() {
            return Err(ShopError::validation("price", "must not be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

impl ProductPatch {
    pub fn validate(&self) -> Result<(), ShopError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ShopError::validation("name", "must not be empty"));
            }
        }
        if let Some(price) = &self.price {
            if price.is_sign_negative() {
                return Err(ShopError::validation("price", "must not be negative"));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer: i64,
}

/// Full update of an order. order_date is accepted in the payload solely so
/// an attempt to change it can be rejected instead of silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReplace {
    pub customer: i64,
    #[serde(default)]
    pub order_date: Option<NaiveDateTime>,
}

impl OrderReplace {
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.order_date.is_some() {
            return Err(ShopError::validation(
                "order_date",
                "is assigned at creation and cannot be changed",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderPatch {
    pub customer: Option<i64>,
    #[serde(default)]
    pub order_date: Option<NaiveDateTime>,
}

impl OrderPatch {
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.order_date.is_some() {
            return Err(ShopError::validation(
                "order_date",
                "is assigned at creation and cannot be changed",
            ));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.customer.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub order: i64,
    pub product: i64,
    pub quantity: i32,
}

impl NewOrderItem {
    pub fn validate(&self) -> Result<(), ShopError> {
        if self.quantity < 1 {
            return Err(ShopError::validation("quantity", "must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItemPatch {
    pub order: Option<i64>,
    pub product: Option<i64>,
    pub quantity: Option<i32>,
}

impl OrderItemPatch {
    pub fn validate(&self) -> Result<(), ShopError> {
        if let Some(quantity) = self.quantity {
            if quantity < 1 {
                return Err(ShopError::validation("quantity", "must be at least 1"));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_none() && self.product.is_none() && self.quantity.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_quantity_is_rejected() {
        let item = NewOrderItem {
            order: 1,
            product: 1,
            quantity: 0,
        };
        let err = item.validate().unwrap_err();
        assert!(matches!(err, ShopError::Validation { field: "quantity", .. }));
    }

    #[test]
    fn order_date_in_patch_is_rejected() {
        let patch = OrderPatch {
            customer: None,
            order_date: Some(chrono::Utc::now().naive_utc()),
        };
        let err = patch.validate().unwrap_err();
        assert!(matches!(err, ShopError::Validation { field: "order_date", .. }));
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(CustomerPatch::default().is_empty());
        assert!(OrderItemPatch::default().is_empty());
    }

    #[test]
    fn transfer_object_keeps_foreign_keys_flat() {
        let data = OrderItemData::from(crate::entities::order_item::Model {
            id: 9,
            order_id: 4,
            product_id: 6,
            quantity: 2,
        });
        assert_eq!(data.order, 4);
        assert_eq!(data.product, 6);
    }
}
