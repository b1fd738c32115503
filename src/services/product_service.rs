use crate::data::models::product::{NewProduct, Product, ProductStatus, UpdateProduct};
use crate::data::models::product_image::ProductImage;
use crate::data::repos::implementors::product_repo::{ListingWriteOutcome, ProductRepo};
use crate::services::errors::ProductServiceError;
use bigdecimal::BigDecimal;

/// Everything a listing goes through outside of checkout: creation with
/// images, browsing, seller edits, owner deletes and admin moderation.
pub struct ProductService;

pub struct NewListing<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub price: BigDecimal,
    pub condition: &'a str,
    pub seller_id: i32,
    pub category_id: i32,
    pub sub_category_id: Option<i32>,
    pub age_group_id: i32,
    pub gender_id: i32,
    pub color_id: i32,
    pub material_id: Option<i32>,
    pub image_urls: Vec<String>,
}

impl ProductService {
    pub fn new() -> Self {
        ProductService
    }

    /// Lists a product for sale. New listings go live immediately.
    pub async fn create_listing(
        &self,
        listing: NewListing<'_>,
    ) -> Result<i32, ProductServiceError> {
        let repo = ProductRepo::new();

        let new_product = NewProduct {
            title: listing.title,
            description: listing.description,
            price: listing.price,
            condition: listing.condition,
            status: ProductStatus::Active.as_str(),
            user_id: listing.seller_id,
            category_id: listing.category_id,
            sub_category_id: listing.sub_category_id,
            age_group_id: listing.age_group_id,
            gender_id: listing.gender_id,
            color_id: listing.color_id,
            material_id: listing.material_id,
        };

        repo.add_with_images(new_product, listing.image_urls)
            .await
            .map_err(|_| ProductServiceError::ProductCreationFailed)
    }

    /// Storefront browse view: active listings with their images.
    pub async fn get_active_listings(
        &self,
    ) -> Result<Vec<(Product, Vec<ProductImage>)>, ProductServiceError> {
        let repo = ProductRepo::new();

        let listings = repo
            .get_active()
            .await
            .map_err(|_| ProductServiceError::DatabaseError)?
            .unwrap_or_default();

        repo.attach_images(listings)
            .await
            .map_err(|_| ProductServiceError::DatabaseError)
    }

    pub async fn get_listing(
        &self,
        product_id: i32,
    ) -> Result<(Product, Vec<ProductImage>), ProductServiceError> {
        use crate::data::repos::traits::repository::Repository;

        let repo = ProductRepo::new();

        let product = repo
            .get_by_id(product_id)
            .await
            .map_err(|_| ProductServiceError::DatabaseError)?
            .ok_or(ProductServiceError::ProductNotFound)?;

        let mut with_images = repo
            .attach_images(vec![product])
            .await
            .map_err(|_| ProductServiceError::DatabaseError)?;

        Ok(with_images.remove(0))
    }

    /// A seller's own listings, sold ones included.
    pub async fn get_my_listings(
        &self,
        seller_id: i32,
    ) -> Result<Vec<(Product, Vec<ProductImage>)>, ProductServiceError> {
        let repo = ProductRepo::new();

        let listings = repo
            .get_by_owner(seller_id)
            .await
            .map_err(|_| ProductServiceError::DatabaseError)?
            .unwrap_or_default();

        repo.attach_images(listings)
            .await
            .map_err(|_| ProductServiceError::DatabaseError)
    }

    /// Owner delete. Sold listings are part of order history and stay.
    pub async fn delete_listing(
        &self,
        product_id: i32,
        seller_id: i32,
    ) -> Result<(), ProductServiceError> {
        let repo = ProductRepo::new();

        match repo
            .delete_listing(product_id, seller_id)
            .await
            .map_err(|_| ProductServiceError::DatabaseError)?
        {
            ListingWriteOutcome::Applied => Ok(()),
            ListingWriteOutcome::NotFound => Err(ProductServiceError::ProductNotFound),
            ListingWriteOutcome::NotOwner => Err(ProductServiceError::NotListingOwner),
            ListingWriteOutcome::Unavailable => Err(ProductServiceError::ListingUnavailable),
        }
    }

    /// Owner edit (title, description, price, condition). Runs under the
    /// same product-row lock as checkout, so a reprice cannot interleave
    /// with a sale.
    pub async fn update_listing(
        &self,
        product_id: i32,
        seller_id: i32,
        changes: UpdateProduct<'_>,
    ) -> Result<(), ProductServiceError> {
        let repo = ProductRepo::new();

        match repo
            .update_listing(product_id, seller_id, changes)
            .await
            .map_err(|_| ProductServiceError::DatabaseError)?
        {
            ListingWriteOutcome::Applied => Ok(()),
            ListingWriteOutcome::NotFound => Err(ProductServiceError::ProductNotFound),
            ListingWriteOutcome::NotOwner => Err(ProductServiceError::NotListingOwner),
            ListingWriteOutcome::Unavailable => Err(ProductServiceError::ListingUnavailable),
        }
    }

    /// Admin moderation: approve or reject a listing.
    pub async fn set_listing_status(
        &self,
        product_id: i32,
        new_status: ProductStatus,
    ) -> Result<(), ProductServiceError> {
        use crate::data::repos::traits::repository::Repository;

        let repo = ProductRepo::new();

        repo.get_by_id(product_id)
            .await
            .map_err(|_| ProductServiceError::DatabaseError)?
            .ok_or(ProductServiceError::ProductNotFound)?;

        repo.set_status(product_id, new_status)
            .await
            .map_err(|_| ProductServiceError::DatabaseError)
    }
}

impl Default for ProductService {
    fn default() -> Self {
        Self::new()
    }
}
