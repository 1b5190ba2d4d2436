use models::Meal;

use crate::errors::ServiceError;

/// Storage contract for meals, scoped to whoever the ownership check resolves as
/// the current user.
///
/// Only `save` and `delete` fail, and only with [`ServiceError::Permission`].
/// Missing records come back as `None` / `false`.
pub trait MealRepository: Send + Sync {
    /// Insert a new meal (no id) or replace an existing one.
    ///
    /// Returns `Ok(None)` when the meal carries an id that is not stored.
    fn save(&self, meal: Meal) -> Result<Option<Meal>, ServiceError>;

    /// Remove a meal; `false` if nothing was stored under `id`.
    fn delete(&self, id: i32) -> Result<bool, ServiceError>;

    /// `None` both for unknown ids and for meals of other users.
    fn get(&self, id: i32) -> Option<Meal>;

    /// Current user's meals, oldest first.
    fn get_all(&self) -> Vec<Meal>;
}
