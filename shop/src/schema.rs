use sea_orm::{ConnectionTrait, DbErr, Schema};

use crate::entities::{customer, order, order_item, product};

/// Create the four shop tables from the entity definitions, in dependency
/// order so every foreign key has its referent. Existing tables are left
/// untouched.
pub async fn create_schema(db: &impl ConnectionTrait) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut customers = schema.create_table_from_entity(customer::Entity);
    db.execute(backend.build(customers.if_not_exists())).await?;

    let mut products = schema.create_table_from_entity(product::Entity);
    db.execute(backend.build(products.if_not_exists())).await?;

    let mut orders = schema.create_table_from_entity(order::Entity);
    db.execute(backend.build(orders.if_not_exists())).await?;

    let mut order_items = schema.create_table_from_entity(order_item::Entity);
    db.execute(backend.build(order_items.if_not_exists())).await?;

    Ok(())
}
