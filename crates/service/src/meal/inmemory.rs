use std::sync::{
    atomic::{AtomicI32, Ordering},
    Arc,
};

use dashmap::{mapref::entry::Entry, DashMap};
use models::Meal;
use tracing::{debug, info, warn};

use super::repository::MealRepository;
use super::security::OwnershipChecker;
use crate::errors::ServiceError;

/// Process-lifetime meal store backed by a sharded concurrent map.
///
/// Ids come from an atomic counter starting at 1 and are never reused.
/// Updates and deletes go through `DashMap::entry`, so the presence check,
/// the owner check and the mutation for one id happen under that id's shard
/// write lock.
pub struct InMemoryMealRepository {
    meals: DashMap<i32, Meal>,
    counter: AtomicI32,
    ownership: Arc<dyn OwnershipChecker>,
}

impl InMemoryMealRepository {
    pub fn new(ownership: Arc<dyn OwnershipChecker>) -> Self {
        Self { meals: DashMap::new(), counter: AtomicI32::new(0), ownership }
    }

    /// Build a store pre-populated with `seed`.
    ///
    /// Seed meals skip the ownership check but still get fresh ids, in order.
    pub fn with_seed<I>(ownership: Arc<dyn OwnershipChecker>, seed: I) -> Self
    where
        I: IntoIterator<Item = Meal>,
    {
        let repo = Self::new(ownership);
        for mut meal in seed {
            let id = repo.next_id();
            meal.id = Some(id);
            repo.meals.insert(id, meal);
        }
        info!(count = repo.meals.len(), "meal_store_seeded");
        repo
    }

    fn next_id(&self) -> i32 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn owned(&self, meal: &Meal) -> bool {
        self.ownership.belongs_to_current_user(meal)
    }

    /// Number of stored meals across all users.
    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

impl MealRepository for InMemoryMealRepository {
    fn save(&self, mut meal: Meal) -> Result<Option<Meal>, ServiceError> {
        info!(?meal, "save");
        if !self.owned(&meal) {
            warn!(user_id = meal.user_id, "saved meal does not belong to current user");
            return Err(ServiceError::permission("saved meal does not belong to you"));
        }

        let Some(id) = meal.id else {
            let id = self.next_id();
            meal.id = Some(id);
            self.meals.insert(id, meal.clone());
            return Ok(Some(meal));
        };

        match self.meals.entry(id) {
            Entry::Occupied(mut entry) => {
                if !self.owned(entry.get()) {
                    warn!(id, "updated meal does not belong to current user");
                    return Err(ServiceError::permission("updated meal does not belong to you"));
                }
                entry.insert(meal.clone());
                Ok(Some(meal))
            }
            Entry::Vacant(_) => {
                debug!(id, "update target missing");
                Ok(None)
            }
        }
    }

    fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        info!(id, "delete");
        match self.meals.entry(id) {
            Entry::Occupied(entry) => {
                if !self.owned(entry.get()) {
                    warn!(id, "deleted meal does not belong to current user");
                    return Err(ServiceError::permission("deleted meal does not belong to you"));
                }
                entry.remove();
                Ok(true)
            }
            Entry::Vacant(_) => Ok(false),
        }
    }

    fn get(&self, id: i32) -> Option<Meal> {
        info!(id, "get");
        let meal = self.meals.get(&id).map(|r| r.value().clone())?;
        self.owned(&meal).then_some(meal)
    }

    fn get_all(&self) -> Vec<Meal> {
        info!("getAll");
        let mut meals: Vec<Meal> = self
            .meals
            .iter()
            .filter(|r| self.owned(r.value()))
            .map(|r| r.value().clone())
            .collect();
        meals.sort_by_key(|m| m.date_time);
        meals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal::{seed, security::SecurityContext};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 2, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn setup() -> (Arc<SecurityContext>, InMemoryMealRepository) {
        let ctx = Arc::new(SecurityContext::new(seed::USER_ID, 2000));
        let repo = InMemoryMealRepository::with_seed(ctx.clone(), seed::meals());
        (ctx, repo)
    }

    #[test]
    fn seed_assigns_sequential_ids() {
        let (_, repo) = setup();
        assert_eq!(repo.len(), seed::meals().len());
        let ids: Vec<i32> = repo.get_all().iter().filter_map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn save_new_mints_greater_id() -> Result<(), ServiceError> {
        let (_, repo) = setup();
        let saved = repo.save(Meal::new(seed::USER_ID, at(1, 9), "Porridge", 300))?.unwrap();
        assert_eq!(saved.id, Some(seed::meals().len() as i32 + 1));
        assert_eq!(repo.get(saved.id.unwrap()), Some(saved));
        Ok(())
    }

    #[test]
    fn save_foreign_new_meal_is_denied_and_store_unchanged() {
        let (_, repo) = setup();
        let before = repo.len();
        let err = repo.save(Meal::new(seed::ADMIN_ID, at(1, 9), "Porridge", 300)).unwrap_err();
        assert!(matches!(err, ServiceError::Permission(_)));
        assert_eq!(repo.len(), before);
    }

    #[test]
    fn update_replaces_owned_meal() -> Result<(), ServiceError> {
        let (_, repo) = setup();
        let mut meal = repo.get(1).unwrap();
        meal.calories = 777;
        let updated = repo.save(meal.clone())?;
        assert_eq!(updated, Some(meal.clone()));
        assert_eq!(repo.get(1), Some(meal));
        Ok(())
    }

    #[test]
    fn update_over_foreign_meal_is_denied() {
        let (_, repo) = setup();
        // id 8 is the admin's lunch; the incoming record claims the current user
        let hijack = Meal::new(seed::USER_ID, at(1, 9), "Mine now", 300).with_id(8);
        let err = repo.save(hijack).unwrap_err();
        assert!(matches!(err, ServiceError::Permission(_)));
    }

    #[test]
    fn update_of_missing_id_returns_none_without_insert() -> Result<(), ServiceError> {
        let (_, repo) = setup();
        let before = repo.len();
        let ghost = Meal::new(seed::USER_ID, at(1, 9), "Ghost", 300).with_id(1000);
        assert_eq!(repo.save(ghost)?, None);
        assert_eq!(repo.len(), before);
        Ok(())
    }

    #[test]
    fn delete_semantics() -> Result<(), ServiceError> {
        let (_, repo) = setup();
        assert!(!repo.delete(1000)?);
        assert!(matches!(repo.delete(8), Err(ServiceError::Permission(_))));
        assert_eq!(repo.len(), seed::meals().len());
        assert!(repo.delete(1)?);
        assert_eq!(repo.get(1), None);
        assert!(!repo.delete(1)?);
        Ok(())
    }

    #[test]
    fn get_hides_foreign_meals() {
        let (ctx, repo) = setup();
        assert_eq!(repo.get(8), None);
        assert_eq!(repo.get(8), repo.get(1000));
        ctx.set_auth_user_id(seed::ADMIN_ID);
        assert_eq!(repo.get(8).map(|m| m.description), Some("Admin lunch".to_string()));
    }

    #[test]
    fn get_all_is_owner_scoped_and_sorted() {
        let ctx = Arc::new(SecurityContext::new(1, 2000));
        let repo = InMemoryMealRepository::with_seed(
            ctx,
            vec![
                Meal::new(1, at(3, 10), "T3", 500),
                Meal::new(2, at(1, 5), "T0", 500),
                Meal::new(1, at(1, 10), "T1", 500),
                Meal::new(1, at(2, 10), "T2", 500),
            ],
        );
        let names: Vec<String> = repo.get_all().into_iter().map(|m| m.description).collect();
        assert_eq!(names, vec!["T1", "T2", "T3"]);
    }
}
