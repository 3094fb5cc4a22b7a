use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub product_number: String,
    pub color: Option<String>,
    pub standard_cost: Option<f64>,
    pub list_price: Option<f64>,
    pub size: Option<String>,
    pub weight: Option<f64>,
    pub product_category_id: Option<i32>,
    pub product_model_id: Option<i32>,
    pub sell_start_date: DateTimeUtc,
    pub sell_end_date: Option<DateTimeUtc>,
    pub discontinued_date: Option<DateTimeUtc>,
    pub thumbnail_photo_file_name: Option<String>,
    pub rowguid: Uuid,
    pub modified_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
