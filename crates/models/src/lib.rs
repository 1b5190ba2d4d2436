//! Domain types shared by the service and web layers.

pub mod errors;
pub mod meal;

pub use meal::{Meal, MealTo};
