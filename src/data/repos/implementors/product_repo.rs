use crate::data::database::Database;
use crate::data::models::product::{NewProduct, Product, ProductStatus, UpdateProduct};
use crate::data::models::product_image::{NewProductImage, ProductImage};
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::pooled_connection::deadpool::Object;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};
use std::collections::HashMap;

/// Result of a lock-guarded listing mutation. The guard runs inside the
/// same row-lock scope checkout uses, so a seller cannot delete or reprice
/// a product while a buyer's transaction holds it.
#[derive(Debug, PartialEq, Eq)]
pub enum ListingWriteOutcome {
    Applied,
    NotFound,
    NotOwner,
    Unavailable,
}

pub struct ProductRepo {}

impl ProductRepo {
    pub fn new() -> Self {
        ProductRepo {}
    }

    /// Inserts a listing and its images in one transaction. The first image
    /// becomes the primary one. Returns the new product id.
    pub async fn add_with_images(
        &self,
        new_product: NewProduct<'_>,
        image_urls: Vec<String>,
    ) -> Result<i32, result::Error> {
        use crate::data::models::schema::product_images::dsl::product_images;
        use crate::data::models::schema::products::dsl::products;

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction::<i32, result::Error, _>(|connection| {
            async move {
                diesel::insert_into(products)
                    .values(&new_product)
                    .execute(connection)
                    .await?;

                let new_id: i32 = diesel::select(diesel::dsl::sql::<diesel::sql_types::Integer>(
                    "LAST_INSERT_ID()",
                ))
                .get_result(connection)
                .await?;

                if !image_urls.is_empty() {
                    let rows: Vec<NewProductImage> = image_urls
                        .iter()
                        .enumerate()
                        .map(|(index, url)| NewProductImage {
                            product_id: new_id,
                            image_url: url.as_str(),
                            is_primary: index == 0,
                        })
                        .collect();

                    diesel::insert_into(product_images)
                        .values(&rows)
                        .execute(connection)
                        .await?;
                }

                Ok(new_id)
            }
            .scope_boxed()
        })
        .await
    }

    /// Browse view: active listings, newest first.
    pub async fn get_active(&self) -> Result<Option<Vec<Product>>, result::Error> {
        use crate::data::models::schema::products::dsl::{created_at, products, status};

        let db = Database::new().await;
        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match products
            .filter(status.eq(ProductStatus::Active.as_str()))
            .order(created_at.desc())
            .load::<Product>(&mut conn)
            .await
        {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// All of one seller's listings, regardless of status, newest first.
    pub async fn get_by_owner(&self, owner_id: i32) -> Result<Option<Vec<Product>>, result::Error> {
        use crate::data::models::schema::products::dsl::{created_at, products, user_id};

        let db = Database::new().await;
        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match products
            .filter(user_id.eq(owner_id))
            .order(created_at.desc())
            .load::<Product>(&mut conn)
            .await
        {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn set_status(
        &self,
        id: i32,
        new_status: ProductStatus,
    ) -> Result<(), result::Error> {
        use crate::data::models::schema::products::dsl::{product_id, products, status};

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                diesel::update(products.filter(product_id.eq(id)))
                    .set(status.eq(new_status.as_str()))
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    /// Owner-initiated delete. Locks the product row, refuses sold listings
    /// and foreign owners, and removes the listing's images and any cart
    /// lines still referencing it in the same transaction.
    pub async fn delete_listing(
        &self,
        id: i32,
        owner_id: i32,
    ) -> Result<ListingWriteOutcome, result::Error> {
        use crate::data::models::schema::cart_items::dsl::{
            cart_items, product_id as cart_product_id,
        };
        use crate::data::models::schema::product_images::dsl::{
            product_id as image_product_id, product_images,
        };
        use crate::data::models::schema::products::dsl::{product_id, products};

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction::<ListingWriteOutcome, result::Error, _>(|connection| {
            async move {
                let product = match products
                    .filter(product_id.eq(id))
                    .for_update()
                    .first::<Product>(connection)
                    .await
                {
                    Ok(value) => value,
                    Err(result::Error::NotFound) => return Ok(ListingWriteOutcome::NotFound),
                    Err(e) => return Err(e),
                };

                if product.user_id != owner_id {
                    return Ok(ListingWriteOutcome::NotOwner);
                }
                if product.status == ProductStatus::Sold.as_str() {
                    return Ok(ListingWriteOutcome::Unavailable);
                }

                diesel::delete(cart_items.filter(cart_product_id.eq(id)))
                    .execute(connection)
                    .await?;
                diesel::delete(product_images.filter(image_product_id.eq(id)))
                    .execute(connection)
                    .await?;
                diesel::delete(products.filter(product_id.eq(id)))
                    .execute(connection)
                    .await?;

                Ok(ListingWriteOutcome::Applied)
            }
            .scope_boxed()
        })
        .await
    }

    /// Owner-initiated edit (reprice etc.) under the same lock scope as
    /// checkout. Sold and rejected listings are immutable.
    pub async fn update_listing(
        &self,
        id: i32,
        owner_id: i32,
        changes: UpdateProduct<'_>,
    ) -> Result<ListingWriteOutcome, result::Error> {
        use crate::data::models::schema::products::dsl::{product_id, products};

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction::<ListingWriteOutcome, result::Error, _>(|connection| {
            async move {
                let product = match products
                    .filter(product_id.eq(id))
                    .for_update()
                    .first::<Product>(connection)
                    .await
                {
                    Ok(value) => value,
                    Err(result::Error::NotFound) => return Ok(ListingWriteOutcome::NotFound),
                    Err(e) => return Err(e),
                };

                if product.user_id != owner_id {
                    return Ok(ListingWriteOutcome::NotOwner);
                }
                if product.status == ProductStatus::Sold.as_str()
                    || product.status == ProductStatus::Rejected.as_str()
                {
                    return Ok(ListingWriteOutcome::Unavailable);
                }

                diesel::update(products.filter(product_id.eq(id)))
                    .set(&changes)
                    .execute(connection)
                    .await?;

                Ok(ListingWriteOutcome::Applied)
            }
            .scope_boxed()
        })
        .await
    }

    /// Pairs each product with its images, primary image first.
    pub async fn attach_images(
        &self,
        product_list: Vec<Product>,
    ) -> Result<Vec<(Product, Vec<ProductImage>)>, result::Error> {
        if product_list.is_empty() {
            return Ok(Vec::new());
        }

        use crate::data::models::schema::product_images::dsl::{
            is_primary, product_id, product_images,
        };

        let db = Database::new().await;
        let mut conn = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        let ids: Vec<i32> = product_list.iter().map(|p| p.product_id).collect();

        let images: Vec<ProductImage> = product_images
            .filter(product_id.eq_any(ids))
            .order(is_primary.desc())
            .load::<ProductImage>(&mut conn)
            .await?;

        let mut map: HashMap<i32, Vec<ProductImage>> = HashMap::new();
        for image in images {
            map.entry(image.product_id).or_default().push(image);
        }

        let result = product_list
            .into_iter()
            .map(|p| {
                let imgs = map.remove(&p.product_id).unwrap_or_default();
                (p, imgs)
            })
            .collect();

        Ok(result)
    }
}

#[async_trait]
impl Repository for ProductRepo {
    type Id = i32;
    type Item = Product;
    type NewItem<'a> = NewProduct<'a>;
    type UpdateForm<'a> = UpdateProduct<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        use crate::data::models::schema::products::dsl::products;

        let db = Database::new().await;
        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match products.load::<Self::Item>(&mut conn).await {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::products::dsl::{product_id, products};

        let db = Database::new().await;
        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        match products
            .filter(product_id.eq(id))
            .first::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<(), result::Error> {
        use crate::data::models::schema::products::dsl::products;

        let db = Database::new().await;
        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(products)
                    .values(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn update<'a>(
        &self,
        id: Self::Id,
        item: Self::UpdateForm<'a>,
    ) -> Result<(), result::Error> {
        use crate::data::models::schema::products::dsl::{product_id, products};

        let db = Database::new().await;
        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                diesel::update(products.filter(product_id.eq(id)))
                    .set(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: Self::Id) -> Result<(), result::Error> {
        use crate::data::models::schema::products::dsl::{product_id, products};

        let db = Database::new().await;
        let mut conn: Object<AsyncMysqlConnection> = db.get_connection().await.map_err(|e| {
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })?;

        conn.transaction(|connection| {
            async move {
                diesel::delete(products.filter(product_id.eq(id)))
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}

impl Default for ProductRepo {
    fn default() -> Self {
        Self::new()
    }
}
