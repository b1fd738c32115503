diesel::table! {
    cart_items (cart_item_id) {
        cart_item_id -> Integer,
        user_id -> Integer,
        product_id -> Integer,
        quantity -> Integer,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    order_items (order_item_id) {
        order_item_id -> Integer,
        order_id -> Integer,
        product_id -> Integer,
        quantity -> Integer,
        price_at_purchase -> Decimal,
    }
}

diesel::table! {
    orders (order_id) {
        order_id -> Integer,
        user_id -> Integer,
        total_amount -> Decimal,
        #[max_length = 20]
        status -> Varchar,
        #[max_length = 20]
        payment_status -> Varchar,
        shipping_address -> Text,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    product_images (image_id) {
        image_id -> Integer,
        product_id -> Integer,
        #[max_length = 512]
        image_url -> Varchar,
        is_primary -> Bool,
        created_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    products (product_id) {
        product_id -> Integer,
        #[max_length = 255]
        title -> Varchar,
        description -> Text,
        price -> Decimal,
        #[max_length = 20]
        condition -> Varchar,
        #[max_length = 20]
        status -> Varchar,
        user_id -> Integer,
        category_id -> Integer,
        sub_category_id -> Nullable<Integer>,
        age_group_id -> Integer,
        gender_id -> Integer,
        color_id -> Integer,
        material_id -> Nullable<Integer>,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    users (user_id) {
        user_id -> Integer,
        #[max_length = 20]
        mobile -> Varchar,
        #[max_length = 100]
        name -> Nullable<Varchar>,
        #[max_length = 255]
        email -> Nullable<Varchar>,
        #[max_length = 20]
        role -> Varchar,
        is_active -> Bool,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    wallets (wallet_id) {
        wallet_id -> Integer,
        user_id -> Integer,
        balance -> Decimal,
        created_at -> Nullable<Timestamp>,
        updated_at -> Nullable<Timestamp>,
    }
}

diesel::joinable!(cart_items -> products (product_id));
diesel::joinable!(cart_items -> users (user_id));
diesel::joinable!(order_items -> orders (order_id));
diesel::joinable!(order_items -> products (product_id));
diesel::joinable!(orders -> users (user_id));
diesel::joinable!(product_images -> products (product_id));
diesel::joinable!(products -> users (user_id));
diesel::joinable!(wallets -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    cart_items,
    order_items,
    orders,
    product_images,
    products,
    users,
    wallets,
);
