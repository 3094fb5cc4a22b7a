use actix_web::{delete, get, put, routes, web};

use crate::auth::CurrentUser;
use crate::entities::product;
use crate::error::AppError;
use crate::models::{MessageResponse, ProductInput};
use crate::products;
use crate::state::AppState;

const NOT_FOUND: &str = "Product not found";

#[routes]
#[get("/products")]
#[get("/products/")]
pub async fn list_products(
    _user: CurrentUser,
    state: web::Data<AppState>,
) -> Result<web::Json<Vec<product::Model>>, AppError> {
    Ok(web::Json(products::list(&state.db).await?))
}

#[get("/products/{product_id}")]
pub async fn get_product(
    _user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<web::Json<product::Model>, AppError> {
    products::find(&state.db, path.into_inner())
        .await?
        .map(web::Json)
        .ok_or_else(|| AppError::not_found(NOT_FOUND))
}

#[routes]
#[post("/products")]
#[post("/products/")]
pub async fn create_product(
    user: CurrentUser,
    state: web::Data<AppState>,
    body: web::Json<ProductInput>,
) -> Result<web::Json<product::Model>, AppError> {
    let created = products::create(&state.db, body.into_inner()).await?;
    tracing::info!(product_id = created.id, by = user.username(), "product created");
    Ok(web::Json(created))
}

#[put("/products/{product_id}")]
pub async fn update_product(
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<ProductInput>,
) -> Result<web::Json<product::Model>, AppError> {
    let id = path.into_inner();
    let updated = products::update(&state.db, id, body.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    tracing::info!(product_id = id, by = user.username(), "product updated");
    Ok(web::Json(updated))
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    user: CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<web::Json<MessageResponse>, AppError> {
    let id = path.into_inner();
    if !products::delete(&state.db, id).await? {
        return Err(AppError::not_found(NOT_FOUND));
    }
    tracing::info!(product_id = id, by = user.username(), "product deleted");
    Ok(web::Json(MessageResponse {
        message: format!("Product {id} deleted"),
    }))
}
