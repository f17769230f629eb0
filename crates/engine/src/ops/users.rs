use sea_orm::{ActiveValue, QueryFilter, prelude::*};

use crate::{EngineError, ResultEngine, User, error::is_unique_violation, users};

use super::{Engine, normalize_required_name};

impl Engine {
    /// Return the user owning `phone`, if any. The match is exact.
    pub async fn user_by_phone(&self, phone: &str) -> ResultEngine<Option<User>> {
        let model = users::Entity::find()
            .filter(users::Column::Phone.eq(phone))
            .one(&self.database)
            .await?;
        Ok(model.map(User::from))
    }

    /// Return a user by id.
    pub async fn user(&self, user_id: i64) -> ResultEngine<User> {
        users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .map(User::from)
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }

    /// Create a new user.
    ///
    /// `password_hash` is an already computed digest; `None` creates a user that
    /// cannot log in (users provisioned by an inbound message).
    ///
    /// Name and phone are stored trimmed. Fails with
    /// [`EngineError::ExistingKey`] when the phone is taken.
    pub async fn create_user(
        &self,
        name: &str,
        phone: &str,
        password_hash: Option<&str>,
    ) -> ResultEngine<User> {
        let name = normalize_required_name(name, "user")?;
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(EngineError::InvalidName(
                "phone must not be empty".to_string(),
            ));
        }

        let active = users::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name),
            phone: ActiveValue::Set(phone.to_string()),
            password_hash: ActiveValue::Set(password_hash.map(ToString::to_string)),
        };

        match active.insert(&self.database).await {
            Ok(model) => {
                tracing::info!("created user {} for phone {}", model.id, model.phone);
                Ok(User::from(model))
            }
            Err(err) if is_unique_violation(&err) => Err(EngineError::ExistingKey(phone.to_string())),
            Err(err) => Err(err.into()),
        }
    }
}
