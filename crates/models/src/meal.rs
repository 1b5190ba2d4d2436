use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const MIN_CALORIES: i32 = 10;
pub const MAX_CALORIES: i32 = 5000;
pub const MAX_DESCRIPTION_LEN: usize = 120;

/// A single meal owned by one user.
///
/// `id` is `None` until the store assigns one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(default)]
    pub id: Option<i32>,
    pub user_id: i32,
    pub date_time: NaiveDateTime,
    pub description: String,
    pub calories: i32,
}

impl Meal {
    pub fn new(user_id: i32, date_time: NaiveDateTime, description: impl Into<String>, calories: i32) -> Self {
        Self { id: None, user_id, date_time, description: description.into(), calories }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn date(&self) -> NaiveDate {
        self.date_time.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.date_time.time()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ModelError::Validation("description required".into()));
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ModelError::Validation(format!("description longer than {MAX_DESCRIPTION_LEN} chars")));
        }
        if !(MIN_CALORIES..=MAX_CALORIES).contains(&self.calories) {
            return Err(ModelError::Validation(format!(
                "calories must be in {MIN_CALORIES}..={MAX_CALORIES}"
            )));
        }
        Ok(())
    }
}

/// Meal as shown to its owner, flagged when the day's total is over the norm.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealTo {
    pub id: Option<i32>,
    pub date_time: NaiveDateTime,
    pub description: String,
    pub calories: i32,
    pub excess: bool,
}

impl MealTo {
    pub fn from_meal(meal: &Meal, excess: bool) -> Self {
        Self {
            id: meal.id,
            date_time: meal.date_time,
            description: meal.description.clone(),
            calories: meal.calories,
            excess,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, 5, 30).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn new_meal_has_no_id() {
        let m = Meal::new(1, at(10), "Breakfast", 500);
        assert!(m.is_new());
        assert!(!m.clone().with_id(3).is_new());
        assert_eq!(m.time(), NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn validation_rejects_blank_description_and_out_of_range_calories() {
        assert!(Meal::new(1, at(10), "  ", 500).validate().is_err());
        assert!(Meal::new(1, at(10), "Snack", 5).validate().is_err());
        assert!(Meal::new(1, at(10), "Feast", 5001).validate().is_err());
        assert!(Meal::new(1, at(10), "Lunch", 10).validate().is_ok());
    }

    #[test]
    fn deserializes_without_id() {
        let m: Meal = serde_json::from_str(
            r#"{"user_id":1,"date_time":"2015-05-30T10:00:00","description":"Breakfast","calories":500}"#,
        )
        .unwrap();
        assert!(m.is_new());
        assert_eq!(m.date_time, at(10));
    }
}
