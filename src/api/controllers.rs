pub mod cart_controller;
pub mod order_controller;
pub mod product_controller;
pub mod user_controller;
pub mod wallet_controller;
