pub mod cart_routes;
pub mod order_routes;
pub mod product_routes;
pub mod user_routes;
pub mod wallet_routes;
