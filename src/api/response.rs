use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlaceOrderResponse {
    pub message: String,
    pub order_id: i32,
}

/// Enough of a product to render an order or cart line.
#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct ProductSummaryResponse {
    pub product_id: i32,
    pub title: String,
    pub image_url: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub quantity: i32,
    pub price_at_purchase: BigDecimal,
    pub product: ProductSummaryResponse,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: i32,
    pub user_id: i32,
    pub total_amount: BigDecimal,
    pub status: String,
    pub payment_status: String,
    pub shipping_address: String,
    pub items: Vec<OrderItemResponse>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Order row without its lines; what a status update hands back.
#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct OrderSummaryResponse {
    pub order_id: i32,
    pub user_id: i32,
    pub total_amount: BigDecimal,
    pub status: String,
    pub payment_status: String,
    pub shipping_address: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct PurchaserResponse {
    pub user_id: i32,
    pub name: Option<String>,
    pub mobile: String,
    pub email: Option<String>,
}

/// Admin order view: the order plus who bought it.
#[derive(Serialize, Deserialize)]
pub struct AdminOrderResponse {
    pub user: PurchaserResponse,
    #[serde(flatten)]
    pub order: OrderResponse,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct ProductImageResponse {
    pub image_url: String,
    pub is_primary: bool,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct ProductResponse {
    pub product_id: i32,
    pub title: String,
    pub description: String,
    pub price: BigDecimal,
    pub condition: String,
    pub status: String,
    pub seller_id: i32,
    pub category_id: i32,
    pub sub_category_id: Option<i32>,
    pub age_group_id: i32,
    pub gender_id: i32,
    pub color_id: i32,
    pub material_id: Option<i32>,
    pub images: Vec<ProductImageResponse>,
    pub created_at: Option<String>,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct CartItemResponse {
    pub quantity: i32,
    pub price: BigDecimal,
    pub product: ProductSummaryResponse,
    pub status: String,
}

#[derive(Serialize, Deserialize)]
pub struct WalletResponse {
    pub user_id: i32,
    pub balance: BigDecimal,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: i32,
    pub mobile: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: Option<String>,
}
