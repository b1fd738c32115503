pub mod cart_repo;
pub mod order_repo;
pub mod product_repo;
pub mod user_repo;
pub mod wallet_repo;
