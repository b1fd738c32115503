use crate::data::database::Database;
use crate::data::models::cart_item::{CartItem, NewCartItem};
use crate::data::models::product::Product;
use diesel::prelude::*;
use diesel::result;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};

pub struct CartRepo {}

impl CartRepo {
    pub fn new() -> Self {
        CartRepo {}
    }

    /// Cart view: each line joined with its live product.
    pub async fn get_with_products(
        &self,
        owner_id: i32,
    ) -> Result<Vec<(CartItem, Product)>, result::Error> {
        use crate::data::models::schema::cart_items::dsl::{cart_items, created_at, user_id};
        use crate::data::models::schema::products::dsl::products;

        let db = Database::new().await;
        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        cart_items
            .inner_join(products)
            .filter(user_id.eq(owner_id))
            .order(created_at.desc())
            .select((CartItem::as_select(), Product::as_select()))
            .load::<(CartItem, Product)>(&mut conn)
            .await
    }

    /// Adds a product to the cart, or bumps the quantity of an existing
    /// line. One row per (user, product).
    pub async fn add_or_bump(
        &self,
        owner_id: i32,
        target_product_id: i32,
        amount: i32,
    ) -> Result<(), result::Error> {
        use crate::data::models::schema::cart_items::dsl::{
            cart_items, product_id, quantity, user_id,
        };

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                let existing = match cart_items
                    .filter(user_id.eq(owner_id))
                    .filter(product_id.eq(target_product_id))
                    .for_update()
                    .first::<CartItem>(connection)
                    .await
                {
                    Ok(value) => Some(value),
                    Err(result::Error::NotFound) => None,
                    Err(e) => return Err(e),
                };

                match existing {
                    Some(line) => {
                        diesel::update(
                            cart_items.filter(
                                user_id
                                    .eq(owner_id)
                                    .and(product_id.eq(target_product_id)),
                            ),
                        )
                        .set(quantity.eq(line.quantity + amount))
                        .execute(connection)
                        .await?;
                    }
                    None => {
                        let new_line = NewCartItem {
                            user_id: owner_id,
                            product_id: target_product_id,
                            quantity: amount,
                        };
                        diesel::insert_into(cart_items)
                            .values(&new_line)
                            .execute(connection)
                            .await?;
                    }
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    /// Removes one product from the cart. Returns false when there was no
    /// such line.
    pub async fn remove(
        &self,
        owner_id: i32,
        target_product_id: i32,
    ) -> Result<bool, result::Error> {
        use crate::data::models::schema::cart_items::dsl::{cart_items, product_id, user_id};

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        let affected = diesel::delete(
            cart_items.filter(user_id.eq(owner_id).and(product_id.eq(target_product_id))),
        )
        .execute(&mut conn)
        .await?;

        Ok(affected > 0)
    }

    /// Empties a user's cart outside of checkout (checkout clears the cart
    /// inside its own transaction).
    pub async fn clear_for_user(&self, owner_id: i32) -> Result<(), result::Error> {
        use crate::data::models::schema::cart_items::dsl::{cart_items, user_id};

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        diesel::delete(cart_items.filter(user_id.eq(owner_id)))
            .execute(&mut conn)
            .await?;

        Ok(())
    }
}

impl Default for CartRepo {
    fn default() -> Self {
        Self::new()
    }
}
