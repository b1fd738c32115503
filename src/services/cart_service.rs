use crate::data::models::cart_item::CartItem;
use crate::data::models::product::Product;
use crate::data::models::product_image::ProductImage;
use crate::data::repos::implementors::cart_repo::CartRepo;
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::data::repos::traits::repository::Repository;
use crate::services::errors::CartServiceError;

/// The per-user cart: lines referencing live products. Checkout-time
/// validation of the lines belongs to the checkout engine; this service
/// only keeps obviously dead products (sold, rejected) out of carts.
pub struct CartService;

impl CartService {
    pub fn new() -> Self {
        CartService
    }

    pub async fn add_to_cart(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<(), CartServiceError> {
        if quantity < 1 {
            return Err(CartServiceError::InvalidQuantity);
        }

        let product_repo = ProductRepo::new();
        let product = product_repo
            .get_by_id(product_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)?
            .ok_or(CartServiceError::ProductNotFound)?;

        if !product.is_active() {
            return Err(CartServiceError::ProductUnavailable(product.title));
        }

        let repo = CartRepo::new();
        repo.add_or_bump(user_id, product_id, quantity)
            .await
            .map_err(|_| CartServiceError::DatabaseError)
    }

    /// Cart view with product details and images for rendering.
    pub async fn get_cart(
        &self,
        user_id: i32,
    ) -> Result<Vec<(CartItem, Product, Vec<ProductImage>)>, CartServiceError> {
        let repo = CartRepo::new();
        let product_repo = ProductRepo::new();

        let lines = repo
            .get_with_products(user_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)?;

        let (items, products): (Vec<CartItem>, Vec<Product>) = lines.into_iter().unzip();

        let with_images = product_repo
            .attach_images(products)
            .await
            .map_err(|_| CartServiceError::DatabaseError)?;

        Ok(items
            .into_iter()
            .zip(with_images)
            .map(|(item, (product, images))| (item, product, images))
            .collect())
    }

    /// Empties the cart without ordering anything.
    pub async fn clear_cart(&self, user_id: i32) -> Result<(), CartServiceError> {
        let repo = CartRepo::new();
        repo.clear_for_user(user_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)
    }

    pub async fn remove_from_cart(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<(), CartServiceError> {
        let repo = CartRepo::new();

        let removed = repo
            .remove(user_id, product_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)?;

        if !removed {
            return Err(CartServiceError::ItemNotInCart);
        }

        Ok(())
    }
}

impl Default for CartService {
    fn default() -> Self {
        Self::new()
    }
}
