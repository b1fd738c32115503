pub mod cart_service;
pub mod checkout_service;
pub mod errors;
pub mod order_service;
pub mod product_service;
pub mod user_service;
pub mod wallet_service;
