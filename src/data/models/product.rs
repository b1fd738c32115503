use crate::data::models::schema::*;
use crate::data::models::user::User;
use bigdecimal::BigDecimal;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(primary_key(product_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Product {
    pub product_id: i32,
    pub title: String,
    pub description: String,
    pub price: BigDecimal,
    pub condition: String,
    pub status: String,
    pub user_id: i32,
    pub category_id: i32,
    pub sub_category_id: Option<i32>,
    pub age_group_id: i32,
    pub gender_id: i32,
    pub color_id: i32,
    pub material_id: Option<i32>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

impl Product {
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active.as_str()
    }
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = products)]
pub struct NewProduct<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub price: BigDecimal,
    pub condition: &'a str,
    pub status: &'a str,
    pub user_id: i32,
    pub category_id: i32,
    pub sub_category_id: Option<i32>,
    pub age_group_id: i32,
    pub gender_id: i32,
    pub color_id: i32,
    pub material_id: Option<i32>,
}

#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = products)]
pub struct UpdateProduct<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price: Option<BigDecimal>,
    pub condition: Option<&'a str>,
}

/// Listing lifecycle. A product becomes `Sold` only through checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductStatus {
    Pending,
    Active,
    Sold,
    Rejected,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Pending => "pending",
            ProductStatus::Active => "active",
            ProductStatus::Sold => "sold",
            ProductStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ProductStatus::Pending),
            "active" => Ok(ProductStatus::Active),
            "sold" => Ok(ProductStatus::Sold),
            "rejected" => Ok(ProductStatus::Rejected),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductCondition {
    New,
    LikeNew,
    Good,
    Fair,
}

impl ProductCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCondition::New => "New",
            ProductCondition::LikeNew => "Like New",
            ProductCondition::Good => "Good",
            ProductCondition::Fair => "Fair",
        }
    }
}

impl std::str::FromStr for ProductCondition {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(ProductCondition::New),
            "like new" => Ok(ProductCondition::LikeNew),
            "good" => Ok(ProductCondition::Good),
            "fair" => Ok(ProductCondition::Fair),
            _ => Err(()),
        }
    }
}
