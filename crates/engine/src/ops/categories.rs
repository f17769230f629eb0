use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{Category, EngineError, ResultEngine, categories, error::is_unique_violation};

use super::{Engine, normalize_required_name};

impl Engine {
    /// Return the category named exactly `name`, if any.
    ///
    /// No normalization is applied: `Food` and `food` are different names.
    pub async fn category_by_name(&self, name: &str) -> ResultEngine<Option<Category>> {
        let model = categories::Entity::find()
            .filter(categories::Column::Name.eq(name))
            .one(&self.database)
            .await?;
        Ok(model.map(Category::from))
    }

    /// Return a category by id.
    pub async fn category(&self, category_id: i64) -> ResultEngine<Category> {
        categories::Entity::find_by_id(category_id)
            .one(&self.database)
            .await?
            .map(Category::from)
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))
    }

    /// List every category, ordered by name.
    pub async fn list_categories(&self) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    /// Create a new category.
    ///
    /// Fails with [`EngineError::ExistingKey`] when the name is taken.
    pub async fn create_category(&self, name: &str) -> ResultEngine<Category> {
        // Only blank names are refused; the stored name is the one received.
        normalize_required_name(name, "category")?;

        let active = categories::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name.to_string()),
        };

        match active.insert(&self.database).await {
            Ok(model) => {
                tracing::info!("created category {} '{}'", model.id, model.name);
                Ok(Category::from(model))
            }
            Err(err) if is_unique_violation(&err) => Err(EngineError::ExistingKey(name.to_string())),
            Err(err) => Err(err.into()),
        }
    }
}
