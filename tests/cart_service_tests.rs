use bigdecimal::BigDecimal;
use diesel::result;
use diesel_async::RunQueryDsl;
use std::str::FromStr;
use toybox_server_lib::data::database::Database;
use toybox_server_lib::data::models::product::{NewProduct, ProductCondition, ProductStatus};
use toybox_server_lib::data::models::user::NewUser;
use toybox_server_lib::data::repos::implementors::product_repo::ProductRepo;
use toybox_server_lib::data::repos::implementors::user_repo::UserRepo;
use toybox_server_lib::data::repos::traits::repository::Repository;
use toybox_server_lib::services::cart_service::CartService;
use toybox_server_lib::services::errors::CartServiceError;

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
        name: Some("Cart Tester"),
        email: None,
        role: "user",
        is_active: true,
    };

    repo.add(test_user).await.expect("Failed to add user");

    repo.get_by_mobile(mobile)
        .await
        .expect("Failed to get user")
        .expect("User not found")
        .user_id
}

async fn create_test_product(seller_id: i32, title: &str, status: ProductStatus) -> i32 {
    let repo = ProductRepo::new();

    let new_product = NewProduct {
        title,
        description: "Barely played with",
        price: BigDecimal::from_str("22.00").unwrap(),
        condition: ProductCondition::New.as_str(),
        status: status.as_str(),
        user_id: seller_id,
        category_id: 1,
        sub_category_id: None,
        age_group_id: 1,
        gender_id: 1,
        color_id: 1,
        material_id: None,
    };

    repo.add_with_images(new_product, Vec::new())
        .await
        .expect("Failed to add product")
}

#[tokio::test]
#[serial_test::serial]
async fn test_add_and_read_cart() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let buyer = create_test_user("7000000002").await;
    let pid = create_test_product(seller, "Stacking Rings", ProductStatus::Active).await;

    let service = CartService::new();
    service
        .add_to_cart(buyer, pid, 2)
        .await
        .expect("Add should succeed");

    let lines = service.get_cart(buyer).await.expect("Query failed");
    assert_eq!(lines.len(), 1);
    let (item, product, _) = &lines[0];
    assert_eq!(item.quantity, 2);
    assert_eq!(product.title, "Stacking Rings");
}

#[tokio::test]
#[serial_test::serial]
async fn test_re_adding_bumps_quantity() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let buyer = create_test_user("7000000002").await;
    let pid = create_test_product(seller, "Toy Soldiers", ProductStatus::Active).await;

    let service = CartService::new();
    service.add_to_cart(buyer, pid, 1).await.expect("Add failed");
    service.add_to_cart(buyer, pid, 2).await.expect("Add failed");

    let lines = service.get_cart(buyer).await.expect("Query failed");
    assert_eq!(lines.len(), 1, "One row per (user, product)");
    assert_eq!(lines[0].0.quantity, 3);
}

#[tokio::test]
#[serial_test::serial]
async fn test_quantity_must_be_positive() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let buyer = create_test_user("7000000002").await;
    let pid = create_test_product(seller, "Play Kitchen", ProductStatus::Active).await;

    let result = CartService::new().add_to_cart(buyer, pid, 0).await;

    assert_eq!(result.err(), Some(CartServiceError::InvalidQuantity));
}

#[tokio::test]
#[serial_test::serial]
async fn test_sold_products_stay_out_of_carts() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let buyer = create_test_user("7000000002").await;
    let pid = create_test_product(seller, "Race Track", ProductStatus::Sold).await;

    let result = CartService::new().add_to_cart(buyer, pid, 1).await;

    assert_eq!(
        result.err(),
        Some(CartServiceError::ProductUnavailable("Race Track".to_string()))
    );
}

#[tokio::test]
#[serial_test::serial]
async fn test_unknown_product() {
    setup().await.expect("Setup failed");

    let buyer = create_test_user("7000000002").await;

    let result = CartService::new().add_to_cart(buyer, 424242, 1).await;

    assert_eq!(result.err(), Some(CartServiceError::ProductNotFound));
}

#[tokio::test]
#[serial_test::serial]
async fn test_clear_cart() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let buyer = create_test_user("7000000002").await;
    let blocks = create_test_product(seller, "Lincoln Logs", ProductStatus::Active).await;
    let train = create_test_product(seller, "Wind-up Train", ProductStatus::Active).await;

    let service = CartService::new();
    service.add_to_cart(buyer, blocks, 1).await.expect("Add failed");
    service.add_to_cart(buyer, train, 1).await.expect("Add failed");

    service.clear_cart(buyer).await.expect("Clear should succeed");

    let lines = service.get_cart(buyer).await.expect("Query failed");
    assert!(lines.is_empty());
}

#[tokio::test]
#[serial_test::serial]
async fn test_remove_from_cart() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let buyer = create_test_user("7000000002").await;
    let pid = create_test_product(seller, "Sandbox Set", ProductStatus::Active).await;

    let service = CartService::new();
    service.add_to_cart(buyer, pid, 1).await.expect("Add failed");

    service
        .remove_from_cart(buyer, pid)
        .await
        .expect("Remove should succeed");

    let lines = service.get_cart(buyer).await.expect("Query failed");
    assert!(lines.is_empty());

    let again = service.remove_from_cart(buyer, pid).await;
    assert_eq!(again.err(), Some(CartServiceError::ItemNotInCart));
}
