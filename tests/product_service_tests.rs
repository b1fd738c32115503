use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::result;
use diesel_async::RunQueryDsl;
use std::str::FromStr;
use toybox_server_lib::data::database::Database;
use toybox_server_lib::data::models::product::{ProductCondition, ProductStatus, UpdateProduct};
use toybox_server_lib::data::models::product_image::ProductImage;
use toybox_server_lib::data::models::user::NewUser;
use toybox_server_lib::data::repos::implementors::user_repo::UserRepo;
use toybox_server_lib::data::repos::traits::repository::Repository;
use toybox_server_lib::services::errors::ProductServiceError;
use toybox_server_lib::services::product_service::{NewListing, ProductService};

async fn setup() -> Result<(), result::Error> {
    let db = Database::new().await;

    let mut conn = db
        .get_connection()
        .await
        .expect("Failed to get a database connection");

    use toybox_server_lib::data::models::schema::cart_items::dsl::cart_items;
    use toybox_server_lib::data::models::schema::order_items::dsl::order_items;
    use toybox_server_lib::data::models::schema::orders::dsl::orders;
    use toybox_server_lib::data::models::schema::product_images::dsl::product_images;
    use toybox_server_lib::data::models::schema::products::dsl::products;
    use toybox_server_lib::data::models::schema::users::dsl::users;
    use toybox_server_lib::data::models::schema::wallets::dsl::wallets;

    diesel::delete(order_items).execute(&mut conn).await?;
    diesel::delete(orders).execute(&mut conn).await?;
    diesel::delete(cart_items).execute(&mut conn).await?;
    diesel::delete(product_images).execute(&mut conn).await?;
    diesel::delete(products).execute(&mut conn).await?;
    diesel::delete(wallets).execute(&mut conn).await?;
    diesel::delete(users).execute(&mut conn).await?;

    Ok(())
}

async fn create_test_user(mobile: &str) -> i32 {
    let repo = UserRepo::new();

    let test_user = NewUser {
        mobile,
        name: Some("Seller"),
        email: None,
        role: "seller",
        is_active: true,
    };

    repo.add(test_user).await.expect("Failed to add user");

    repo.get_by_mobile(mobile)
        .await
        .expect("Failed to get user")
        .expect("User not found")
        .user_id
}

fn listing<'a>(seller_id: i32, title: &'a str, images: Vec<String>) -> NewListing<'a> {
    NewListing {
        title,
        description: "From a smoke-free home",
        price: BigDecimal::from_str("30.00").unwrap(),
        condition: ProductCondition::Good.as_str(),
        seller_id,
        category_id: 1,
        sub_category_id: Some(2),
        age_group_id: 1,
        gender_id: 1,
        color_id: 1,
        material_id: None,
        image_urls: images,
    }
}

#[tokio::test]
#[serial_test::serial]
async fn test_create_listing_with_images() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let service = ProductService::new();

    let pid = service
        .create_listing(listing(
            seller,
            "Dollhouse",
            vec![
                "https://cdn.example.com/front.jpg".to_string(),
                "https://cdn.example.com/back.jpg".to_string(),
            ],
        ))
        .await
        .expect("Creation should succeed");

    let (product, images) = service.get_listing(pid).await.expect("Query failed");
    assert_eq!(product.title, "Dollhouse");
    assert_eq!(product.status, ProductStatus::Active.as_str());
    assert_eq!(images.len(), 2);
    // First uploaded image is the primary one and sorts first
    assert!(images[0].is_primary);
    assert_eq!(images[0].image_url, "https://cdn.example.com/front.jpg");
    assert!(!images[1].is_primary);
}

#[tokio::test]
#[serial_test::serial]
async fn test_browse_shows_only_active_listings() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let service = ProductService::new();

    let live = service
        .create_listing(listing(seller, "Scooter", Vec::new()))
        .await
        .expect("Creation failed");
    let moderated = service
        .create_listing(listing(seller, "Chemistry Set", Vec::new()))
        .await
        .expect("Creation failed");
    let sold = service
        .create_listing(listing(seller, "Pogo Stick", Vec::new()))
        .await
        .expect("Creation failed");

    service
        .set_listing_status(moderated, ProductStatus::Pending)
        .await
        .expect("Status change failed");
    service
        .set_listing_status(sold, ProductStatus::Sold)
        .await
        .expect("Status change failed");

    let browse = service.get_active_listings().await.expect("Query failed");
    let ids: Vec<i32> = browse.iter().map(|(p, _)| p.product_id).collect();

    assert_eq!(ids, vec![live]);
}

#[tokio::test]
#[serial_test::serial]
async fn test_my_listings_include_every_status() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let service = ProductService::new();

    let a = service
        .create_listing(listing(seller, "Abacus", Vec::new()))
        .await
        .expect("Creation failed");
    let b = service
        .create_listing(listing(seller, "Bead Maze", Vec::new()))
        .await
        .expect("Creation failed");

    service
        .set_listing_status(b, ProductStatus::Sold)
        .await
        .expect("Status change failed");

    let mine = service.get_my_listings(seller).await.expect("Query failed");
    let mut ids: Vec<i32> = mine.iter().map(|(p, _)| p.product_id).collect();
    ids.sort();

    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
#[serial_test::serial]
async fn test_delete_removes_listing_and_images() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let service = ProductService::new();

    let pid = service
        .create_listing(listing(
            seller,
            "Puppet Theatre",
            vec!["https://cdn.example.com/stage.jpg".to_string()],
        ))
        .await
        .expect("Creation failed");

    service
        .delete_listing(pid, seller)
        .await
        .expect("Delete should succeed");

    let gone = service.get_listing(pid).await;
    assert_eq!(gone.err(), Some(ProductServiceError::ProductNotFound));

    // The image rows go with the listing
    use toybox_server_lib::data::models::schema::product_images::dsl::{
        product_id, product_images,
    };
    let db = Database::new().await;
    let mut conn = db.get_connection().await.expect("Connection failed");
    let orphans: Vec<ProductImage> = product_images
        .filter(product_id.eq(pid))
        .load::<ProductImage>(&mut conn)
        .await
        .expect("Query failed");
    assert!(orphans.is_empty(), "Deleting a listing must delete its images");
}

#[tokio::test]
#[serial_test::serial]
async fn test_delete_drops_stale_cart_lines() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let buyer = create_test_user("7000000002").await;
    let service = ProductService::new();

    let pid = service
        .create_listing(listing(seller, "Slot Cars", Vec::new()))
        .await
        .expect("Creation failed");

    use toybox_server_lib::services::cart_service::CartService;
    let carts = CartService::new();
    carts
        .add_to_cart(buyer, pid, 1)
        .await
        .expect("Cart add failed");

    service
        .delete_listing(pid, seller)
        .await
        .expect("Delete should succeed despite the cart reference");

    let lines = carts.get_cart(buyer).await.expect("Query failed");
    assert!(lines.is_empty(), "Cart lines die with the listing");
}

#[tokio::test]
#[serial_test::serial]
async fn test_only_the_owner_may_delete() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let stranger = create_test_user("7000000002").await;
    let service = ProductService::new();

    let pid = service
        .create_listing(listing(seller, "Trampoline", Vec::new()))
        .await
        .expect("Creation failed");

    let result = service.delete_listing(pid, stranger).await;
    assert_eq!(result.err(), Some(ProductServiceError::NotListingOwner));
}

#[tokio::test]
#[serial_test::serial]
async fn test_sold_listings_refuse_deletion() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let service = ProductService::new();

    let pid = service
        .create_listing(listing(seller, "Balance Bike", Vec::new()))
        .await
        .expect("Creation failed");

    service
        .set_listing_status(pid, ProductStatus::Sold)
        .await
        .expect("Status change failed");

    let result = service.delete_listing(pid, seller).await;
    assert_eq!(result.err(), Some(ProductServiceError::ListingUnavailable));
}

#[tokio::test]
#[serial_test::serial]
async fn test_owner_can_reprice_active_listing() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let service = ProductService::new();

    let pid = service
        .create_listing(listing(seller, "Kaleidoscope", Vec::new()))
        .await
        .expect("Creation failed");

    let changes = UpdateProduct {
        title: None,
        description: None,
        price: Some(BigDecimal::from_str("19.50").unwrap()),
        condition: None,
    };
    service
        .update_listing(pid, seller, changes)
        .await
        .expect("Reprice should succeed");

    let (product, _) = service.get_listing(pid).await.expect("Query failed");
    assert_eq!(product.price, BigDecimal::from_str("19.50").unwrap());
}

#[tokio::test]
#[serial_test::serial]
async fn test_sold_listings_cannot_be_repriced() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let service = ProductService::new();

    let pid = service
        .create_listing(listing(seller, "Teddy Bear", Vec::new()))
        .await
        .expect("Creation failed");

    service
        .set_listing_status(pid, ProductStatus::Sold)
        .await
        .expect("Status change failed");

    let changes = UpdateProduct {
        title: None,
        description: None,
        price: Some(BigDecimal::from_str("1.00").unwrap()),
        condition: None,
    };
    let result = service.update_listing(pid, seller, changes).await;

    assert_eq!(result.err(), Some(ProductServiceError::ListingUnavailable));
}

#[tokio::test]
#[serial_test::serial]
async fn test_moderation_flow() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let service = ProductService::new();

    let pid = service
        .create_listing(listing(seller, "Water Pistol", Vec::new()))
        .await
        .expect("Creation failed");

    service
        .set_listing_status(pid, ProductStatus::Rejected)
        .await
        .expect("Moderation failed");

    let (product, _) = service.get_listing(pid).await.expect("Query failed");
    assert_eq!(product.status, ProductStatus::Rejected.as_str());

    let missing = service
        .set_listing_status(424242, ProductStatus::Active)
        .await;
    assert_eq!(missing.err(), Some(ProductServiceError::ProductNotFound));
}
