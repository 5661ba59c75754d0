//! Contact message entity - Submissions from the public contact form.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contact message database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_messages")]
pub struct Model {
    /// Unique identifier for the message
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Subject line chosen on the form
    pub subject: String,
    /// Message body
    pub message: String,
    /// When the message was submitted
    pub created_at: DateTimeUtc,
}

/// Contact messages stand alone; no relationships to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
