//! Product catalog persistence.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::product::{self, Entity as Product};
use crate::models::ProductInput;

pub async fn list(db: &DatabaseConnection) -> Result<Vec<product::Model>, DbErr> {
    Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
}

pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<product::Model>, DbErr> {
    Product::find_by_id(id).one(db).await
}

pub async fn create(
    db: &DatabaseConnection,
    input: ProductInput,
) -> Result<product::Model, DbErr> {
    let now = Utc::now();
    let active = product::ActiveModel {
        name: Set(input.name),
        product_number: Set(input.product_number),
        color: Set(input.color),
        standard_cost: Set(input.standard_cost),
        list_price: Set(input.list_price),
        size: Set(input.size),
        weight: Set(input.weight),
        product_category_id: Set(input.product_category_id),
        product_model_id: Set(input.product_model_id),
        sell_start_date: Set(input.sell_start_date.unwrap_or(now)),
        sell_end_date: Set(input.sell_end_date),
        discontinued_date: Set(input.discontinued_date),
        thumbnail_photo_file_name: Set(input.thumbnail_photo_file_name),
        rowguid: Set(Uuid::new_v4()),
        modified_date: Set(now),
        ..Default::default()
    };
    active.insert(db).await
}

/// Overwrites name and number, plus any optional field present in `input`.
/// Returns `None` when no product has this id.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: ProductInput,
) -> Result<Option<product::Model>, DbErr> {
    let Some(existing) = find(db, id).await? else {
        return Ok(None);
    };

    let mut active = existing.into_active_model();
    active.name = Set(input.name);
    active.product_number = Set(input.product_number);
    if let Some(v) = input.color {
        active.color = Set(Some(v));
    }
    if let Some(v) = input.standard_cost {
        active.standard_cost = Set(Some(v));
    }
    if let Some(v) = input.list_price {
        active.list_price = Set(Some(v));
    }
    if let Some(v) = input.size {
        active.size = Set(Some(v));
    }
    if let Some(v) = input.weight {
        active.weight = Set(Some(v));
    }
    if let Some(v) = input.product_category_id {
        active.product_category_id = Set(Some(v));
    }
    if let Some(v) = input.product_model_id {
        active.product_model_id = Set(Some(v));
    }
    if let Some(v) = input.sell_start_date {
        active.sell_start_date = Set(v);
    }
    if let Some(v) = input.sell_end_date {
        active.sell_end_date = Set(Some(v));
    }
    if let Some(v) = input.discontinued_date {
        active.discontinued_date = Set(Some(v));
    }
    if let Some(v) = input.thumbnail_photo_file_name {
        active.thumbnail_photo_file_name = Set(Some(v));
    }
    active.modified_date = Set(Utc::now());

    active.update(db).await.map(Some)
}

/// Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    let result = Product::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
