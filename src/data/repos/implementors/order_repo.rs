use crate::data::database::Database;
use crate::data::models::order::{Order, OrderStatus};
use crate::data::models::order_item::OrderItem;
use crate::data::models::product::Product;
use crate::data::models::product_image::ProductImage;
use crate::data::models::user::User;
use diesel::prelude::*;
use diesel::result;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};
use std::collections::HashMap;

/// One order line as the read model sees it: the frozen item plus the
/// referenced product and a representative image for display.
pub type OrderLine = (OrderItem, Product, Option<ProductImage>);

/// Orders are created exclusively by the checkout engine, so this repo
/// only reads and advances existing rows.
pub struct OrderRepo {}

impl OrderRepo {
    pub fn new() -> Self {
        OrderRepo {}
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Order>, result::Error> {
        use crate::data::models::schema::orders::dsl::{order_id, orders};

        let db = Database::new().await;
        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match orders
            .filter(order_id.eq(id))
            .first::<Order>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// One user's orders, newest first.
    pub async fn get_by_user_id(
        &self,
        user_id_query: i32,
    ) -> Result<Option<Vec<Order>>, result::Error> {
        use crate::data::models::schema::orders::dsl::{created_at, orders, user_id};

        let db = Database::new().await;
        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match orders
            .filter(user_id.eq(user_id_query))
            .order(created_at.desc())
            .load::<Order>(&mut conn)
            .await
        {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Admin view: every order joined with its purchaser, newest first.
    pub async fn get_all_with_users(&self) -> Result<Option<Vec<(Order, User)>>, result::Error> {
        use crate::data::models::schema::{orders, users};

        let db = Database::new().await;
        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match orders::table
            .inner_join(users::table)
            .order(orders::created_at.desc())
            .select((Order::as_select(), User::as_select()))
            .load::<(Order, User)>(&mut conn)
            .await
        {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Pairs each order with its lines; every line carries its product and
    /// a representative image (primary preferred).
    pub async fn attach_items(
        &self,
        orders_list: Vec<Order>,
    ) -> Result<Vec<(Order, Vec<OrderLine>)>, result::Error> {
        if orders_list.is_empty() {
            return Ok(Vec::new());
        }

        use crate::data::models::schema::order_items::dsl::{order_id, order_items};
        use crate::data::models::schema::product_images::dsl::{
            is_primary, product_id as image_product_id, product_images,
        };
        use crate::data::models::schema::products::dsl::products;

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        let ids: Vec<i32> = orders_list.iter().map(|o| o.order_id).collect();

        let items_data: Vec<(OrderItem, Product)> = order_items
            .inner_join(products)
            .filter(order_id.eq_any(ids))
            .select((OrderItem::as_select(), Product::as_select()))
            .load::<(OrderItem, Product)>(&mut conn)
            .await?;

        let referenced: Vec<i32> = items_data.iter().map(|(item, _)| item.product_id).collect();

        let images: Vec<ProductImage> = product_images
            .filter(image_product_id.eq_any(referenced))
            .order(is_primary.desc())
            .load::<ProductImage>(&mut conn)
            .await?;

        let mut image_map: HashMap<i32, ProductImage> = HashMap::new();
        for image in images {
            image_map.entry(image.product_id).or_insert(image);
        }

        let mut line_map: HashMap<i32, Vec<OrderLine>> = HashMap::new();
        for (item, product) in items_data {
            let image = image_map.get(&item.product_id).cloned();
            line_map
                .entry(item.order_id)
                .or_default()
                .push((item, product, image));
        }

        let result = orders_list
            .into_iter()
            .map(|o| {
                let lines = line_map.remove(&o.order_id).unwrap_or_default();
                (o, lines)
            })
            .collect();

        Ok(result)
    }

    pub async fn update_status(
        &self,
        id: i32,
        new_status: OrderStatus,
    ) -> Result<(), result::Error> {
        use crate::data::models::schema::orders::dsl::{order_id, orders, status};

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                diesel::update(orders.filter(order_id.eq(id)))
                    .set(status.eq(new_status.as_str()))
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}

impl Default for OrderRepo {
    fn default() -> Self {
        Self::new()
    }
}
