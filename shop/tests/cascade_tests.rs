use std::error::Error;

use common::test_helpers::generate_unique_email;
use rust_decimal::Decimal;
use shop::error::ShopError;
use shop::shop_storage::ShopStorage;
use shop::transfer_model::{NewCustomer, NewOrder, NewOrderItem, NewProduct};

mod test_helpers;

struct Fixture {
    customer_id: i64,
    product_id: i64,
    order_id: i64,
    item_id: i64,
}

/// One customer with one order holding one item of one product.
async fn seed(storage: &ShopStorage, tag: &str) -> Result<Fixture, Box<dyn Error + Send + Sync>> {
    let customer = storage
        .create_customer(&NewCustomer {
            name: format!("Customer {}", tag),
            email: generate_unique_email(tag),
        })
        .await?;
    let product = storage
        .create_product(&NewProduct {
            name: format!("Product {}", tag),
            price: Decimal::new(1500, 2),
        })
        .await?;
    let order = storage.create_order(&NewOrder { customer: customer.id }).await?;
    let item = storage
        .create_order_item(&NewOrderItem {
            order: order.id,
            product: product.id,
            quantity: 1,
        })
        .await?;

    Ok(Fixture {
        customer_id: customer.id,
        product_id: product.id,
        order_id: order.id,
        item_id: item.id,
    })
}

#[tokio::test]
async fn deleting_a_customer_cascades_to_orders_and_items() -> Result<(), Box<dyn Error + Send + Sync>> {
    let storage = test_helpers::setup_storage().await;
    let doomed = seed(&storage, "cascade-doomed").await?;
    let survivor = seed(&storage, "cascade-survivor").await?;

    storage.delete_customer(doomed.customer_id).await?;

    let err = storage.get_order(doomed.order_id).await.unwrap_err();
    assert!(matches!(err, ShopError::NotFound { .. }));
    let err = storage.get_order_item(doomed.item_id).await.unwrap_err();
    assert!(matches!(err, ShopError::NotFound { .. }));

    // The doomed customer's product is referenced by nothing else now, but
    // products are never owned by customers and must survive.
    assert!(storage.get_product(doomed.product_id).await.is_ok());

    // Unrelated rows are untouched
    assert!(storage.get_customer(survivor.customer_id).await.is_ok());
    assert!(storage.get_order(survivor.order_id).await.is_ok());
    assert!(storage.get_order_item(survivor.item_id).await.is_ok());

    Ok(())
}

#[tokio::test]
async fn deleting_a_product_cascades_to_its_items() -> Result<(), Box<dyn Error + Send + Sync>> {
    let storage = test_helpers::setup_storage().await;
    let fixture = seed(&storage, "product-cascade").await?;

    storage.delete_product(fixture.product_id).await?;

    let err = storage.get_order_item(fixture.item_id).await.unwrap_err();
    assert!(matches!(err, ShopError::NotFound { .. }));

    // The order itself survives, now empty
    assert!(storage.get_order(fixture.order_id).await.is_ok());
    assert_eq!(storage.order_total_quantity(fixture.order_id).await?, 0);

    Ok(())
}

#[tokio::test]
async fn deleting_an_order_cascades_to_its_items() -> Result<(), Box<dyn Error + Send + Sync>> {
    let storage = test_helpers::setup_storage().await;
    let fixture = seed(&storage, "order-cascade").await?;

    storage.delete_order(fixture.order_id).await?;

    let err = storage.get_order_item(fixture.item_id).await.unwrap_err();
    assert!(matches!(err, ShopError::NotFound { .. }));

    // Customer and product are left alone
    assert!(storage.get_customer(fixture.customer_id).await.is_ok());
    assert!(storage.get_product(fixture.product_id).await.is_ok());

    Ok(())
}
