use crate::data::models::product::Product;
use crate::data::models::schema::*;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = product_images)]
#[diesel(primary_key(image_id))]
#[diesel(belongs_to(Product, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct ProductImage {
    pub image_id: i32,
    pub product_id: i32,
    pub image_url: String,
    pub is_primary: bool,
    pub created_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = product_images)]
pub struct NewProductImage<'a> {
    pub product_id: i32,
    pub image_url: &'a str,
    pub is_primary: bool,
}
