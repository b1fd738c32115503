use bigdecimal::BigDecimal;
use diesel::result;
use diesel_async::RunQueryDsl;
use std::str::FromStr;
use toybox_server_lib::data::database::Database;
use toybox_server_lib::data::models::product::{
    NewProduct, ProductCondition, ProductStatus, UpdateProduct,
};
use toybox_server_lib::data::models::user::NewUser;
use toybox_server_lib::data::repos::implementors::cart_repo::CartRepo;
use toybox_server_lib::data::repos::implementors::product_repo::ProductRepo;
use toybox_server_lib::data::repos::implementors::user_repo::UserRepo;
use toybox_server_lib::data::repos::traits::repository::Repository;
use toybox_server_lib::services::checkout_service::CheckoutService;
use toybox_server_lib::services::errors::CheckoutError;
use toybox_server_lib::services::order_service::OrderService;

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
        name: Some("Test User"),
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

async fn create_test_product(seller_id: i32, title: &str, price: &str) -> i32 {
    let repo = ProductRepo::new();

    let new_product = NewProduct {
        title,
        description: "Gently used, complete set",
        price: BigDecimal::from_str(price).unwrap(),
        condition: ProductCondition::Good.as_str(),
        status: ProductStatus::Active.as_str(),
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
async fn test_place_order_success() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let buyer = create_test_user("7000000002").await;
    let pid = create_test_product(seller, "Wooden Train Set", "100.00").await;

    let cart = CartRepo::new();
    cart.add_or_bump(buyer, pid, 2).await.expect("Cart add failed");

    let service = CheckoutService::new(Database::new().await);
    let order = service
        .place_order(buyer, "12 Rocking Horse Lane")
        .await
        .expect("Checkout should succeed");

    assert_eq!(order.user_id, buyer);
    assert_eq!(order.status, "placed");
    assert_eq!(order.payment_status, "pending");
    assert_eq!(order.total_amount, BigDecimal::from_str("200.00").unwrap());

    // One line, price frozen at checkout
    let orders = OrderService::new()
        .get_user_orders(buyer)
        .await
        .expect("Query failed");
    assert_eq!(orders.len(), 1);
    let (_, lines) = &orders[0];
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0.quantity, 2);
    assert_eq!(
        lines[0].0.price_at_purchase,
        BigDecimal::from_str("100.00").unwrap()
    );

    // The product is off the market
    let product = ProductRepo::new()
        .get_by_id(pid)
        .await
        .expect("Query failed")
        .expect("Product missing");
    assert_eq!(product.status, ProductStatus::Sold.as_str());

    // The cart is empty
    let remaining = cart.get_with_products(buyer).await.expect("Query failed");
    assert!(remaining.is_empty(), "Cart should be cleared on success");
}

#[tokio::test]
#[serial_test::serial]
async fn test_place_order_total_spans_all_lines() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let buyer = create_test_user("7000000002").await;
    let doll = create_test_product(seller, "Porcelain Doll", "39.99").await;
    let blocks = create_test_product(seller, "Building Blocks", "12.50").await;

    let cart = CartRepo::new();
    cart.add_or_bump(buyer, doll, 1).await.expect("Cart add failed");
    cart.add_or_bump(buyer, blocks, 3).await.expect("Cart add failed");

    let order = CheckoutService::new(Database::new().await)
        .place_order(buyer, "3 Nursery Road")
        .await
        .expect("Checkout should succeed");

    // 39.99 + 3 x 12.50
    assert_eq!(order.total_amount, BigDecimal::from_str("77.49").unwrap());

    let orders = OrderService::new()
        .get_user_orders(buyer)
        .await
        .expect("Query failed");
    let (_, lines) = &orders[0];
    assert_eq!(lines.len(), 2);

    let recomputed = lines
        .iter()
        .map(|(item, _, _)| &item.price_at_purchase * BigDecimal::from(item.quantity))
        .fold(BigDecimal::from(0), |acc, v| acc + v);
    assert_eq!(order.total_amount, recomputed);
}

#[tokio::test]
#[serial_test::serial]
async fn test_place_order_empty_cart() {
    setup().await.expect("Setup failed");

    let buyer = create_test_user("7000000002").await;

    let result = CheckoutService::new(Database::new().await)
        .place_order(buyer, "12 Rocking Horse Lane")
        .await;

    assert_eq!(result.err(), Some(CheckoutError::EmptyCart));

    let orders = OrderService::new()
        .get_user_orders(buyer)
        .await
        .expect("Query failed");
    assert!(orders.is_empty());
}

#[tokio::test]
#[serial_test::serial]
async fn test_place_order_blank_address() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let buyer = create_test_user("7000000002").await;
    let pid = create_test_product(seller, "Toy Piano", "25.00").await;

    let cart = CartRepo::new();
    cart.add_or_bump(buyer, pid, 1).await.expect("Cart add failed");

    let result = CheckoutService::new(Database::new().await)
        .place_order(buyer, "   ")
        .await;

    assert_eq!(result.err(), Some(CheckoutError::MissingAddress));

    // Nothing moved
    let remaining = cart.get_with_products(buyer).await.expect("Query failed");
    assert_eq!(remaining.len(), 1);
}

#[tokio::test]
#[serial_test::serial]
async fn test_place_order_fails_on_stale_line_with_no_side_effects() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let buyer = create_test_user("7000000002").await;
    let gone = create_test_product(seller, "Rocking Horse", "80.00").await;
    let fine = create_test_product(seller, "Plush Bear", "15.00").await;

    let cart = CartRepo::new();
    cart.add_or_bump(buyer, gone, 1).await.expect("Cart add failed");
    cart.add_or_bump(buyer, fine, 1).await.expect("Cart add failed");

    // The first product sells elsewhere while it sits in this cart
    let products = ProductRepo::new();
    products
        .set_status(gone, ProductStatus::Sold)
        .await
        .expect("Status change failed");

    let result = CheckoutService::new(Database::new().await)
        .place_order(buyer, "4 Attic Row")
        .await;

    assert_eq!(
        result.err(),
        Some(CheckoutError::ProductUnavailable("Rocking Horse".to_string()))
    );

    // All or nothing: no order, the healthy product untouched, cart intact
    let orders = OrderService::new()
        .get_user_orders(buyer)
        .await
        .expect("Query failed");
    assert!(orders.is_empty(), "Failed checkout must not create an order");

    let untouched = products
        .get_by_id(fine)
        .await
        .expect("Query failed")
        .expect("Product missing");
    assert_eq!(untouched.status, ProductStatus::Active.as_str());

    let remaining = cart.get_with_products(buyer).await.expect("Query failed");
    assert_eq!(remaining.len(), 2, "Failed checkout must leave the cart alone");
}

#[tokio::test]
#[serial_test::serial]
async fn test_price_freeze_survives_repricing() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let buyer = create_test_user("7000000002").await;
    let pid = create_test_product(seller, "Tin Robot", "60.00").await;

    let cart = CartRepo::new();
    cart.add_or_bump(buyer, pid, 1).await.expect("Cart add failed");

    let order = CheckoutService::new(Database::new().await)
        .place_order(buyer, "9 Clockwork Close")
        .await
        .expect("Checkout should succeed");

    // Reprice the product after the sale
    let products = ProductRepo::new();
    let reprice = UpdateProduct {
        title: None,
        description: None,
        price: Some(BigDecimal::from_str("999.00").unwrap()),
        condition: None,
    };
    products.update(pid, reprice).await.expect("Update failed");

    let orders = OrderService::new()
        .get_user_orders(buyer)
        .await
        .expect("Query failed");
    let (reloaded, lines) = &orders[0];

    assert_eq!(
        lines[0].0.price_at_purchase,
        BigDecimal::from_str("60.00").unwrap(),
        "price_at_purchase must stay frozen"
    );
    assert_eq!(reloaded.total_amount, order.total_amount);
}

#[tokio::test]
#[serial_test::serial]
async fn test_concurrent_checkouts_sell_once() {
    setup().await.expect("Setup failed");

    let seller = create_test_user("7000000001").await;
    let buyer_a = create_test_user("7000000002").await;
    let buyer_b = create_test_user("7000000003").await;
    let pid = create_test_product(seller, "Model Railway", "150.00").await;

    let cart = CartRepo::new();
    cart.add_or_bump(buyer_a, pid, 1).await.expect("Cart add failed");
    cart.add_or_bump(buyer_b, pid, 1).await.expect("Cart add failed");

    let first = tokio::spawn(async move {
        CheckoutService::new(Database::new().await)
            .place_order(buyer_a, "1 First Street")
            .await
    });
    let second = tokio::spawn(async move {
        CheckoutService::new(Database::new().await)
            .place_order(buyer_b, "2 Second Street")
            .await
    });

    let first = first.await.expect("Join failed");
    let second = second.await.expect("Join failed");

    let wins = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "Exactly one checkout may claim the product");

    let (loser_result, loser_id) = if first.is_ok() {
        (second, buyer_b)
    } else {
        (first, buyer_a)
    };
    assert!(
        matches!(loser_result, Err(CheckoutError::ProductUnavailable(_))),
        "The losing checkout must see the product as unavailable"
    );

    let product = ProductRepo::new()
        .get_by_id(pid)
        .await
        .expect("Query failed")
        .expect("Product missing");
    assert_eq!(product.status, ProductStatus::Sold.as_str());

    // Exactly one order exists across both buyers
    let service = OrderService::new();
    let orders_a = service.get_user_orders(buyer_a).await.expect("Query failed");
    let orders_b = service.get_user_orders(buyer_b).await.expect("Query failed");
    assert_eq!(orders_a.len() + orders_b.len(), 1);

    // The loser keeps their cart line for re-rendering
    let leftover = cart
        .get_with_products(loser_id)
        .await
        .expect("Query failed");
    assert_eq!(leftover.len(), 1);
}
