pub mod cart_item;
pub mod order;
pub mod order_item;
pub mod product;
pub mod product_image;
pub mod schema;
pub mod user;
pub mod wallet;
