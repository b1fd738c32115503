use bigdecimal::BigDecimal;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct PlaceOrderRequest {
    pub address: String,
}

/// Struct for updating order status
#[derive(Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub description: String,
    pub price: BigDecimal,
    pub condition: String,
    pub category_id: i32,
    pub sub_category_id: Option<i32>,
    pub age_group_id: i32,
    pub gender_id: i32,
    pub color_id: i32,
    pub material_id: Option<i32>,
    pub images: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub condition: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProductStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct AddCartItemRequest {
    pub product_id: i32,
    pub quantity: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdateUserStatusRequest {
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct WalletAmountRequest {
    pub user_id: i32,
    pub amount: BigDecimal,
}

#[derive(Deserialize)]
pub struct WalletTransferRequest {
    pub from_user_id: i32,
    pub to_user_id: i32,
    pub amount: BigDecimal,
}
