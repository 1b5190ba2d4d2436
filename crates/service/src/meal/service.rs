use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use models::{Meal, MealTo};
use tracing::{debug, instrument};

use super::repository::MealRepository;
use super::security::SecurityContext;
use super::util;
use crate::errors::ServiceError;

/// Meal business service independent of web framework.
///
/// Wraps a [`MealRepository`] and turns its silent misses into
/// [`ServiceError::NotFound`].
pub struct MealService<R: MealRepository> {
    repo: Arc<R>,
    ctx: Arc<SecurityContext>,
}

impl<R: MealRepository> Clone for MealService<R> {
    fn clone(&self) -> Self {
        Self { repo: Arc::clone(&self.repo), ctx: Arc::clone(&self.ctx) }
    }
}

impl<R: MealRepository> MealService<R> {
    pub fn new(repo: Arc<R>, ctx: Arc<SecurityContext>) -> Self { Self { repo, ctx } }

    pub fn context(&self) -> &SecurityContext {
        &self.ctx
    }

    /// Store a new meal for its owner.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::meal::{InMemoryMealRepository, MealService, SecurityContext};
    /// let ctx = Arc::new(SecurityContext::new(1, 2000));
    /// let repo = Arc::new(InMemoryMealRepository::new(ctx.clone()));
    /// let svc = MealService::new(repo, ctx);
    /// let at = chrono::NaiveDate::from_ymd_opt(2020, 1, 30).unwrap().and_hms_opt(10, 0, 0).unwrap();
    /// let meal = svc.create(models::Meal::new(1, at, "Breakfast", 500)).unwrap();
    /// assert_eq!(meal.id, Some(1));
    /// ```
    #[instrument(skip(self, meal), fields(user_id = meal.user_id))]
    pub fn create(&self, meal: Meal) -> Result<Meal, ServiceError> {
        if !meal.is_new() {
            return Err(ServiceError::Validation("new meal must not carry an id".into()));
        }
        meal.validate()?;
        self.repo
            .save(meal)?
            .ok_or_else(|| ServiceError::Validation("meal was not stored".into()))
    }

    #[instrument(skip(self, meal), fields(id = ?meal.id, user_id = meal.user_id))]
    pub fn update(&self, meal: Meal) -> Result<Meal, ServiceError> {
        let id = meal.id.ok_or_else(|| ServiceError::Validation("meal id required for update".into()))?;
        meal.validate()?;
        self.repo.save(meal)?.ok_or_else(|| ServiceError::not_found("meal", id))
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if self.repo.delete(id)? {
            Ok(())
        } else {
            Err(ServiceError::not_found("meal", id))
        }
    }

    #[instrument(skip(self))]
    pub fn get(&self, id: i32) -> Result<Meal, ServiceError> {
        self.repo.get(id).ok_or_else(|| ServiceError::not_found("meal", id))
    }

    /// Current user's meals with the excess flag, oldest first.
    #[instrument(skip(self))]
    pub fn get_all(&self) -> Vec<MealTo> {
        util::to_tos(&self.repo.get_all(), self.ctx.calories_per_day())
    }

    /// Meals within `[start_date, end_date]` whose time of day is in
    /// `[start_time, end_time)`. Any bound may be omitted.
    #[instrument(skip(self))]
    pub fn get_between(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    ) -> Vec<MealTo> {
        let meals = self.repo.get_all();
        let tos = util::filter_by_predicate(&meals, self.ctx.calories_per_day(), |m| {
            util::is_between_inclusive(&m.date(), start_date.as_ref(), end_date.as_ref())
                && util::is_between_half_open(&m.time(), start_time.as_ref(), end_time.as_ref())
        });
        debug!(count = tos.len(), "meals_filtered");
        tos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal::{seed, InMemoryMealRepository};

    fn setup() -> MealService<InMemoryMealRepository> {
        let ctx = Arc::new(SecurityContext::new(seed::USER_ID, 2000));
        let repo = Arc::new(InMemoryMealRepository::with_seed(ctx.clone(), seed::meals()));
        MealService::new(repo, ctx)
    }

    fn at(h: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 2, 1).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn create_rejects_existing_id_and_invalid_meal() {
        let svc = setup();
        let with_id = Meal::new(seed::USER_ID, at(9), "Porridge", 300).with_id(1);
        assert!(matches!(svc.create(with_id), Err(ServiceError::Validation(_))));
        let blank = Meal::new(seed::USER_ID, at(9), "", 300);
        assert!(matches!(svc.create(blank), Err(ServiceError::Model(_))));
    }

    #[test]
    fn update_missing_is_not_found() {
        let svc = setup();
        let ghost = Meal::new(seed::USER_ID, at(9), "Ghost", 300).with_id(1000);
        assert!(matches!(svc.update(ghost), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn foreign_meal_is_not_found_on_get_but_denied_on_delete() {
        let svc = setup();
        assert!(matches!(svc.get(8), Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(8), Err(ServiceError::Permission(_))));
        assert!(matches!(svc.delete(1000), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn get_between_filters_dates_and_times() {
        let svc = setup();
        let day = NaiveDate::from_ymd_opt(2020, 1, 31);
        let lunch_only = svc.get_between(
            day,
            day,
            NaiveTime::from_hms_opt(13, 0, 0),
            NaiveTime::from_hms_opt(14, 0, 0),
        );
        assert_eq!(lunch_only.len(), 1);
        assert_eq!(lunch_only[0].description, "Lunch");
        assert!(lunch_only[0].excess);

        let everything = svc.get_between(None, None, None, None);
        assert_eq!(everything, svc.get_all());
    }

    #[test]
    fn calorie_norm_change_is_reflected() {
        let svc = setup();
        svc.context().set_calories_per_day(3000);
        assert!(svc.get_all().iter().all(|t| !t.excess));
    }
}
