use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    Category, EngineError, NewTransaction, ResultEngine, Transaction, TransactionDetail,
    categories, transactions, users,
};

use super::Engine;

fn validate_amount(amount: f64) -> ResultEngine<()> {
    if !amount.is_finite() {
        return Err(EngineError::InvalidAmount(
            "amount must be a finite number".to_string(),
        ));
    }
    if amount < 0.0 {
        return Err(EngineError::InvalidAmount("amount must be >= 0".to_string()));
    }
    Ok(())
}

fn detail(
    (model, category): (transactions::Model, Option<categories::Model>),
) -> ResultEngine<TransactionDetail> {
    Ok(TransactionDetail {
        transaction: Transaction::try_from(model)?,
        category: category.map(Category::from),
    })
}

impl Engine {
    /// Persist a new transaction. `created_at` is assigned here and the
    /// description is stored as given.
    ///
    /// The owner and the category, when given, must exist: a missing one is
    /// reported as [`EngineError::KeyNotFound`] and nothing is written.
    pub async fn create_transaction(&self, cmd: NewTransaction) -> ResultEngine<Transaction> {
        validate_amount(cmd.amount)?;

        if users::Entity::find_by_id(cmd.user_id)
            .one(&self.database)
            .await?
            .is_none()
        {
            return Err(EngineError::KeyNotFound("user not exists".to_string()));
        }
        if let Some(category_id) = cmd.category_id {
            self.category(category_id).await?;
        }

        let active = transactions::ActiveModel {
            id: ActiveValue::NotSet,
            kind: ActiveValue::Set(cmd.kind.as_str().to_string()),
            amount: ActiveValue::Set(cmd.amount),
            description: ActiveValue::Set(cmd.description),
            created_at: ActiveValue::Set(Utc::now()),
            user_id: ActiveValue::Set(cmd.user_id),
            category_id: ActiveValue::Set(cmd.category_id),
        };
        let model = active.insert(&self.database).await?;
        tracing::debug!(
            "stored {} transaction {} for user {}",
            model.kind,
            model.id,
            model.user_id
        );

        Transaction::try_from(model)
    }

    /// Return a transaction with its category.
    pub async fn transaction(&self, transaction_id: i64) -> ResultEngine<TransactionDetail> {
        let row = transactions::Entity::find_by_id(transaction_id)
            .find_also_related(categories::Entity)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;
        detail(row)
    }

    /// Return a transaction only if it belongs to `user_id`.
    ///
    /// Someone else's transaction is reported as missing.
    pub async fn transaction_for_user(
        &self,
        transaction_id: i64,
        user_id: i64,
    ) -> ResultEngine<TransactionDetail> {
        let detail = self.transaction(transaction_id).await?;
        if detail.transaction.user_id != user_id {
            return Err(EngineError::KeyNotFound(
                "transaction not exists".to_string(),
            ));
        }
        Ok(detail)
    }

    /// List the transactions of a user, newest first.
    pub async fn list_transactions(&self, user_id: i64) -> ResultEngine<Vec<TransactionDetail>> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            // Ids grow with insertion, so this is creation order.
            .order_by_desc(transactions::Column::Id)
            .find_also_related(categories::Entity)
            .all(&self.database)
            .await?
            .into_iter()
            .map(detail)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_validation() {
        assert!(validate_amount(0.0).is_ok());
        assert!(validate_amount(12.5).is_ok());
        assert!(matches!(
            validate_amount(-0.01),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate_amount(f64::NAN),
            Err(EngineError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate_amount(f64::INFINITY),
            Err(EngineError::InvalidAmount(_))
        ));
    }
}
