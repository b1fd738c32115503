use crate::api::response::{
    AdminOrderResponse, CartItemResponse, OrderItemResponse, OrderResponse,
    OrderSummaryResponse, ProductImageResponse, ProductResponse, ProductSummaryResponse,
    PurchaserResponse, UserResponse, WalletResponse,
};
use crate::data::models::cart_item::CartItem;
use crate::data::models::order::Order;
use crate::data::models::product::Product;
use crate::data::models::product_image::ProductImage;
use crate::data::models::user::User;
use crate::data::models::wallet::Wallet;
use crate::data::repos::implementors::order_repo::OrderLine;

impl From<(Order, Vec<OrderLine>)> for OrderResponse {
    fn from((order, lines): (Order, Vec<OrderLine>)) -> Self {
        let items = lines
            .into_iter()
            .map(|(item, product, image)| OrderItemResponse {
                quantity: item.quantity,
                price_at_purchase: item.price_at_purchase,
                product: ProductSummaryResponse {
                    product_id: product.product_id,
                    title: product.title,
                    image_url: image.map(|i| i.image_url),
                },
            })
            .collect();

        OrderResponse {
            order_id: order.order_id,
            user_id: order.user_id,
            total_amount: order.total_amount,
            status: order.status,
            payment_status: order.payment_status,
            shipping_address: order.shipping_address,
            items,
            created_at: order.created_at.map(|d| d.to_string()),
            updated_at: order.updated_at.map(|d| d.to_string()),
        }
    }
}

impl From<Order> for OrderSummaryResponse {
    fn from(order: Order) -> Self {
        OrderSummaryResponse {
            order_id: order.order_id,
            user_id: order.user_id,
            total_amount: order.total_amount,
            status: order.status,
            payment_status: order.payment_status,
            shipping_address: order.shipping_address,
            created_at: order.created_at.map(|d| d.to_string()),
            updated_at: order.updated_at.map(|d| d.to_string()),
        }
    }
}

impl From<(Order, User, Vec<OrderLine>)> for AdminOrderResponse {
    fn from((order, user, lines): (Order, User, Vec<OrderLine>)) -> Self {
        AdminOrderResponse {
            user: PurchaserResponse::from(user),
            order: OrderResponse::from((order, lines)),
        }
    }
}

impl From<User> for PurchaserResponse {
    fn from(user: User) -> Self {
        PurchaserResponse {
            user_id: user.user_id,
            name: user.name,
            mobile: user.mobile,
            email: user.email,
        }
    }
}

impl From<(Product, Vec<ProductImage>)> for ProductResponse {
    fn from((product, images): (Product, Vec<ProductImage>)) -> Self {
        ProductResponse {
            product_id: product.product_id,
            title: product.title,
            description: product.description,
            price: product.price,
            condition: product.condition,
            status: product.status,
            seller_id: product.user_id,
            category_id: product.category_id,
            sub_category_id: product.sub_category_id,
            age_group_id: product.age_group_id,
            gender_id: product.gender_id,
            color_id: product.color_id,
            material_id: product.material_id,
            images: images
                .into_iter()
                .map(|i| ProductImageResponse {
                    image_url: i.image_url,
                    is_primary: i.is_primary,
                })
                .collect(),
            created_at: product.created_at.map(|d| d.to_string()),
        }
    }
}

impl From<(CartItem, Product, Vec<ProductImage>)> for CartItemResponse {
    fn from((item, product, images): (CartItem, Product, Vec<ProductImage>)) -> Self {
        // attach_images orders primary first
        let image_url = images.into_iter().next().map(|i| i.image_url);

        CartItemResponse {
            quantity: item.quantity,
            price: product.price,
            status: product.status,
            product: ProductSummaryResponse {
                product_id: product.product_id,
                title: product.title,
                image_url,
            },
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            user_id: user.user_id,
            mobile: user.mobile,
            name: user.name,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at.map(|d| d.to_string()),
        }
    }
}

impl From<Wallet> for WalletResponse {
    fn from(wallet: Wallet) -> Self {
        WalletResponse {
            user_id: wallet.user_id,
            balance: wallet.balance,
        }
    }
}
