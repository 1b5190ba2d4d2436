use chrono::{NaiveDate, NaiveDateTime};
use models::Meal;

pub const USER_ID: i32 = 1;
pub const ADMIN_ID: i32 = 2;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .unwrap_or_default()
}

/// Initial meals loaded into a fresh store, in insertion order.
pub fn meals() -> Vec<Meal> {
    vec![
        Meal::new(USER_ID, at(30, 10), "Breakfast", 500),
        Meal::new(USER_ID, at(30, 13), "Lunch", 1000),
        Meal::new(USER_ID, at(30, 20), "Dinner", 500),
        Meal::new(USER_ID, at(31, 0), "Midnight snack", 100),
        Meal::new(USER_ID, at(31, 10), "Breakfast", 1000),
        Meal::new(USER_ID, at(31, 13), "Lunch", 500),
        Meal::new(USER_ID, at(31, 20), "Dinner", 410),
        Meal::new(ADMIN_ID, at(31, 14), "Admin lunch", 510),
        Meal::new(ADMIN_ID, at(31, 21), "Admin dinner", 1500),
    ]
}
