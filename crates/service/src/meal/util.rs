use std::collections::HashMap;

use chrono::NaiveDate;
use models::{Meal, MealTo};

/// All meals as transfer objects with the per-day excess flag.
pub fn to_tos(meals: &[Meal], calories_per_day: i32) -> Vec<MealTo> {
    filter_by_predicate(meals, calories_per_day, |_| true)
}

/// Excess is computed over every meal in `meals`; `filter` only selects
/// which of them are returned.
pub fn filter_by_predicate<F>(meals: &[Meal], calories_per_day: i32, filter: F) -> Vec<MealTo>
where
    F: Fn(&Meal) -> bool,
{
    let mut calories_by_date: HashMap<NaiveDate, i32> = HashMap::new();
    for meal in meals {
        *calories_by_date.entry(meal.date()).or_insert(0) += meal.calories;
    }

    meals
        .iter()
        .filter(|m| filter(m))
        .map(|m| {
            let total = calories_by_date.get(&m.date()).copied().unwrap_or(0);
            MealTo::from_meal(m, total > calories_per_day)
        })
        .collect()
}

/// `start <= value < end`; a missing bound is open.
pub fn is_between_half_open<T: PartialOrd>(value: &T, start: Option<&T>, end: Option<&T>) -> bool {
    start.map_or(true, |s| value >= s) && end.map_or(true, |e| value < e)
}

/// `start <= value <= end`; a missing bound is open.
pub fn is_between_inclusive<T: PartialOrd>(value: &T, start: Option<&T>, end: Option<&T>) -> bool {
    start.map_or(true, |s| value >= s) && end.map_or(true, |e| value <= e)
}
