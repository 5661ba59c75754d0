//! Contact form logic - Message submission and the admin inbox.

use crate::{
    core::{is_well_formed_email, require_fields},
    entities::{ContactMessage, contact_message},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Records a contact form submission after validating all required fields.
///
/// # Errors
/// Returns a validation error for missing fields or a malformed email,
/// or a database error.
pub async fn submit_message(
    db: &DatabaseConnection,
    name: String,
    email: String,
    subject: String,
    message: String,
) -> Result<contact_message::Model> {
    require_fields(&[
        ("name", !name.trim().is_empty()),
        ("email", !email.trim().is_empty()),
        ("subject", !subject.trim().is_empty()),
        ("message", !message.trim().is_empty()),
    ])?;
    if !is_well_formed_email(email.trim()) {
        return Err(Error::Validation {
            fields: "email".to_string(),
        });
    }

    let model = contact_message::ActiveModel {
        name: Set(name.trim().to_string()),
        email: Set(email.trim().to_string()),
        subject: Set(subject.trim().to_string()),
        message: Set(message.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Retrieves all contact messages, newest first (admin inbox order).
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_messages(db: &DatabaseConnection) -> Result<Vec<contact_message::Model>> {
    ContactMessage::find()
        .order_by_desc(contact_message::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Hard-deletes a contact message by id.
///
/// # Errors
/// Returns `NotFound` if the message is absent, or a database error.
pub async fn delete_message(db: &DatabaseConnection, message_id: i64) -> Result<()> {
    let message = ContactMessage::find_by_id(message_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "ContactMessage",
            id: message_id,
        })?;

    message.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_submit_message_requires_every_field() -> Result<()> {
        let db = setup_test_db().await?;

        let result = submit_message(
            &db,
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { fields } if fields == "name, email, subject, message"
        ));

        let result = submit_message(
            &db,
            "Ravi".to_string(),
            "ravi@nodot".to_string(),
            "Service enquiry".to_string(),
            "Do you do Sunday appointments?".to_string(),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { fields } if fields == "email"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_and_list_messages() -> Result<()> {
        let db = setup_test_db().await?;

        let message = submit_message(
            &db,
            "Ravi".to_string(),
            "ravi@example.com".to_string(),
            "Service enquiry".to_string(),
            "Do you do Sunday appointments?".to_string(),
        )
        .await?;
        assert_eq!(message.subject, "Service enquiry");

        let messages = list_messages(&db).await?;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0], message);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_message() -> Result<()> {
        let db = setup_test_db().await?;
        let message = submit_message(
            &db,
            "Ravi".to_string(),
            "ravi@example.com".to_string(),
            "Service enquiry".to_string(),
            "Do you do Sunday appointments?".to_string(),
        )
        .await?;

        delete_message(&db, message.id).await?;
        assert!(list_messages(&db).await?.is_empty());

        let result = delete_message(&db, message.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "ContactMessage",
                ..
            }
        ));

        Ok(())
    }
}
