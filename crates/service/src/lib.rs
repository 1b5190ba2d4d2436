//! Service layer for meals.
//! - `meal::inmemory` holds the concurrent per-user store.
//! - `meal::service` adds validation, not-found mapping and calorie views.

pub mod errors;
pub mod meal;
