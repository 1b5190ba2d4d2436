use std::sync::atomic::{AtomicI32, Ordering};

use models::Meal;
use tracing::info;

/// Decides whether a meal belongs to the identity behind the current request.
///
/// The in-memory store calls this while holding a shard lock, so
/// implementations must not call back into the store.
pub trait OwnershipChecker: Send + Sync {
    fn belongs_to_current_user(&self, meal: &Meal) -> bool;
}

/// Active user and their daily calorie norm.
///
/// There is one active user per process; switching it affects every
/// subsequent check.
#[derive(Debug)]
pub struct SecurityContext {
    auth_user_id: AtomicI32,
    calories_per_day: AtomicI32,
}

impl SecurityContext {
    pub fn new(auth_user_id: i32, calories_per_day: i32) -> Self {
        Self {
            auth_user_id: AtomicI32::new(auth_user_id),
            calories_per_day: AtomicI32::new(calories_per_day),
        }
    }

    pub fn auth_user_id(&self) -> i32 {
        self.auth_user_id.load(Ordering::Acquire)
    }

    pub fn set_auth_user_id(&self, user_id: i32) {
        let previous = self.auth_user_id.swap(user_id, Ordering::AcqRel);
        info!(previous, user_id, "auth_user_switched");
    }

    pub fn calories_per_day(&self) -> i32 {
        self.calories_per_day.load(Ordering::Acquire)
    }

    pub fn set_calories_per_day(&self, calories: i32) {
        self.calories_per_day.store(calories, Ordering::Release);
    }
}

impl OwnershipChecker for SecurityContext {
    fn belongs_to_current_user(&self, meal: &Meal) -> bool {
        meal.user_id == self.auth_user_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn meal_of(user_id: i32) -> Meal {
        let at = NaiveDate::from_ymd_opt(2020, 1, 30).unwrap().and_hms_opt(10, 0, 0).unwrap();
        Meal::new(user_id, at, "Breakfast", 500)
    }

    #[test]
    fn checks_owner_against_active_user() {
        let ctx = SecurityContext::new(1, 2000);
        assert!(ctx.belongs_to_current_user(&meal_of(1)));
        assert!(!ctx.belongs_to_current_user(&meal_of(2)));

        ctx.set_auth_user_id(2);
        assert_eq!(ctx.auth_user_id(), 2);
        assert!(ctx.belongs_to_current_user(&meal_of(2)));
        assert!(!ctx.belongs_to_current_user(&meal_of(1)));
    }
}
