use crate::api::config::Config;
use crate::data::database::Database;
use crate::data::models::cart_item::CartItem;
use crate::data::models::order::{NewOrder, Order, OrderStatus, PaymentStatus};
use crate::data::models::order_item::NewOrderItem;
use crate::data::models::product::{Product, ProductStatus};
use crate::services::errors::CheckoutError;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

/// Converts a user's cart into a committed order, all or nothing.
///
/// Secondhand listings are one of a kind, so the whole sequence runs in a
/// single transaction that locks every referenced product row: of two
/// concurrent checkouts holding the same product, the second blocks on the
/// lock, re-reads the product as sold and fails without side effects.
pub struct CheckoutService {
    db: Database,
}

impl CheckoutService {
    pub fn new(db: Database) -> Self {
        CheckoutService { db }
    }

    pub async fn place_order(
        &self,
        buyer_id: i32,
        shipping_address: &str,
    ) -> Result<Order, CheckoutError> {
        if shipping_address.trim().is_empty() {
            return Err(CheckoutError::MissingAddress);
        }

        let mut conn = self.db.get_connection().await.map_err(|e| {
            tracing::error!("Checkout could not obtain a connection: {}", e);
            CheckoutError::PersistenceFailure
        })?;

        // Bound the wait on competing row locks; expiry rolls back and
        // surfaces as PersistenceFailure instead of hanging the request.
        diesel::sql_query(format!(
            "SET SESSION innodb_lock_wait_timeout = {}",
            Config::default().checkout_lock_wait_secs
        ))
        .execute(&mut conn)
        .await?;

        let address = shipping_address.to_string();

        conn.transaction::<Order, CheckoutError, _>(|connection| {
            async move {
                use crate::data::models::schema::cart_items::dsl::{
                    cart_items, user_id as cart_user_id,
                };
                use crate::data::models::schema::order_items::dsl::order_items;
                use crate::data::models::schema::orders::dsl::{order_id, orders};
                use crate::data::models::schema::products::dsl::{product_id, products, status};

                // Cart lines with their products, locked until commit.
                let lines: Vec<(CartItem, Product)> = cart_items
                    .inner_join(products)
                    .filter(cart_user_id.eq(buyer_id))
                    .select((CartItem::as_select(), Product::as_select()))
                    .for_update()
                    .load::<(CartItem, Product)>(connection)
                    .await?;

                if lines.is_empty() {
                    return Err(CheckoutError::EmptyCart);
                }

                // A stale cart line (product sold, rejected or withdrawn
                // since it was added) fails the whole checkout.
                for (_, product) in &lines {
                    if !product.is_active() {
                        return Err(CheckoutError::ProductUnavailable(product.title.clone()));
                    }
                }

                let total_amount = lines
                    .iter()
                    .map(|(line, product)| &product.price * BigDecimal::from(line.quantity))
                    .fold(BigDecimal::from(0), |acc, line_total| acc + line_total);

                let new_order = NewOrder {
                    user_id: buyer_id,
                    total_amount,
                    status: OrderStatus::Placed.as_str(),
                    payment_status: PaymentStatus::Pending.as_str(),
                    shipping_address: &address,
                };

                diesel::insert_into(orders)
                    .values(&new_order)
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;

                // Prices captured in the locked read above, not re-fetched.
                let new_items: Vec<NewOrderItem> = lines
                    .iter()
                    .map(|(line, product)| NewOrderItem {
                        order_id: new_id,
                        product_id: line.product_id,
                        quantity: line.quantity,
                        price_at_purchase: product.price.clone(),
                    })
                    .collect();

                diesel::insert_into(order_items)
                    .values(&new_items)
                    .execute(connection)
                    .await?;

                // The step that prevents double-selling.
                let sold_ids: Vec<i32> = lines.iter().map(|(line, _)| line.product_id).collect();
                diesel::update(products.filter(product_id.eq_any(sold_ids)))
                    .set(status.eq(ProductStatus::Sold.as_str()))
                    .execute(connection)
                    .await?;

                diesel::delete(cart_items.filter(cart_user_id.eq(buyer_id)))
                    .execute(connection)
                    .await?;

                orders
                    .filter(order_id.eq(new_id))
                    .first::<Order>(connection)
                    .await
                    .map_err(CheckoutError::from)
            }
            .scope_boxed()
        })
        .await
    }
}
