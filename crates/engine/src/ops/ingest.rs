//! Message ingestion: parse a free-text message and store it as a transaction
//! of the sender.

use crate::{Category, EngineError, NewTransaction, ResultEngine, User, message};

use super::Engine;

/// Result of [`Engine::ingest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    Created { transaction_id: i64 },
    /// The message does not follow the grammar; nothing was written.
    InvalidMessage,
}

impl Engine {
    /// Parse `text` and store it as a transaction of the user owning `phone`.
    ///
    /// Unknown senders become users, named after their phone. A `#category`
    /// that does not exist yet is created. A message that does not parse is
    /// reported as [`IngestOutcome::InvalidMessage`]; every other failure is
    /// returned as an error and nothing is retried.
    pub async fn ingest(&self, phone: &str, text: &str) -> ResultEngine<IngestOutcome> {
        let phone = phone.trim();
        let Some(intent) = message::parse(text) else {
            tracing::debug!("rejected message from {phone}");
            return Ok(IngestOutcome::InvalidMessage);
        };

        let user = self.user_for_sender(phone).await?;
        let category_id = match intent.category.as_deref() {
            Some(name) => Some(self.category_for_tag(name).await?.id),
            None => None,
        };

        let tx = self
            .create_transaction(NewTransaction {
                kind: intent.kind,
                amount: intent.amount,
                description: Some(intent.description),
                user_id: user.id,
                category_id,
            })
            .await?;

        tracing::info!(
            "ingested {} of {} from {phone} as transaction {}",
            tx.kind.as_str(),
            tx.amount,
            tx.id
        );
        Ok(IngestOutcome::Created {
            transaction_id: tx.id,
        })
    }

    /// Create-or-get the user owning `phone`.
    ///
    /// Losing a concurrent first contact surfaces as a unique violation, which
    /// is resolved by reading the row the other request created.
    async fn user_for_sender(&self, phone: &str) -> ResultEngine<User> {
        if let Some(user) = self.user_by_phone(phone).await? {
            return Ok(user);
        }
        self.provision_user(phone).await
    }

    /// Insert a user for `phone`, falling back to the stored row when the
    /// phone is already taken.
    async fn provision_user(&self, phone: &str) -> ResultEngine<User> {
        match self.create_user(phone, phone, None).await {
            Ok(user) => Ok(user),
            Err(EngineError::ExistingKey(_)) => {
                tracing::debug!("user for {phone} created concurrently, reading it back");
                self.user_by_phone(phone)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound(phone.to_string()))
            }
            Err(err) => Err(err),
        }
    }

    /// Create-or-get the category named exactly `name`.
    async fn category_for_tag(&self, name: &str) -> ResultEngine<Category> {
        if let Some(category) = self.category_by_name(name).await? {
            return Ok(category);
        }
        self.provision_category(name).await
    }

    async fn provision_category(&self, name: &str) -> ResultEngine<Category> {
        match self.create_category(name).await {
            Ok(category) => Ok(category),
            Err(EngineError::ExistingKey(_)) => {
                tracing::debug!("category '{name}' created concurrently, reading it back");
                self.category_by_name(name)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound(name.to_string()))
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use migration::MigratorTrait;
    use sea_orm::Database;

    use super::*;

    async fn engine() -> Engine {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        Engine::builder().database(db).build().await.unwrap()
    }

    // The row already exists when the insert runs, as when another request
    // wins the race between lookup and insert.
    #[tokio::test]
    async fn provision_user_reads_back_row_created_concurrently() {
        let engine = engine().await;
        let existing = engine
            .create_user("Alice", "+5511900002222", Some("digest"))
            .await
            .unwrap();

        let user = engine.provision_user("+5511900002222").await.unwrap();

        assert_eq!(user, existing);
    }

    #[tokio::test]
    async fn provision_category_reads_back_row_created_concurrently() {
        let engine = engine().await;
        let existing = engine.create_category("food").await.unwrap();

        let category = engine.provision_category("food").await.unwrap();

        assert_eq!(category, existing);
        assert_eq!(engine.list_categories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn provision_user_creates_missing_user() {
        let engine = engine().await;

        let user = engine.provision_user("+5511900003333").await.unwrap();

        assert_eq!(user.name, "+5511900003333");
        assert_eq!(user.password_hash, None);
    }
}
