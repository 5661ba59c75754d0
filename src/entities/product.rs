//! Product entity - Items listed on the public shop page.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the product
    pub name: String,
    /// Retail price
    pub price: f64,
    /// Image shown on the shop page
    pub image_url: String,
    /// Shop category, e.g. "car care"
    pub category: String,
    /// Optional display description
    pub description: Option<String>,
    /// When the product was listed
    pub created_at: DateTimeUtc,
}

/// Products stand alone; no relationships to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
