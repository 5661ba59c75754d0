//! Product catalog logic - The public shop listing and admin CRUD.

use crate::{
    core::require_fields,
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a new shop product, performing input validation.
///
/// Name, image, and category are required; the price must be a finite,
/// non-negative number.
///
/// # Errors
/// Returns a validation error for missing fields or a malformed price,
/// or a database error.
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    price: f64,
    image_url: String,
    category: String,
    description: Option<String>,
) -> Result<product::Model> {
    require_fields(&[
        ("name", !name.trim().is_empty()),
        ("image_url", !image_url.trim().is_empty()),
        ("category", !category.trim().is_empty()),
    ])?;
    if !price.is_finite() || price < 0.0 {
        return Err(Error::Validation {
            fields: "price".to_string(),
        });
    }

    let model = product::ActiveModel {
        name: Set(name.trim().to_string()),
        price: Set(price),
        image_url: Set(image_url.trim().to_string()),
        category: Set(category.trim().to_string()),
        description: Set(description.filter(|d| !d.trim().is_empty())),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Retrieves all products, newest first (shop page order).
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_desc(product::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Hard-deletes a product by id.
///
/// # Errors
/// Returns `NotFound` if the product is absent, or a database error.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "Product",
            id: product_id,
        })?;

    product.delete(db).await?;
    Ok(())
}
